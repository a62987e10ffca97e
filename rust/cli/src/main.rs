fn main() {
    majiang_cli::logging::init_logging();
    let code = majiang_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
