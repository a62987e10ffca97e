//! Shared helpers for the CLI integration tests.
//!
//! - `run_cli` runs the CLI in-process and captures exit code, stdout and stderr.
//! - `EnvGuard` sets or clears environment variables and restores them on drop;
//!   tests using it must be `#[serial]`.

use majiang_cli::run;

#[allow(dead_code)]
#[derive(Debug)]
pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliOutput {
    let mut argv = vec!["majiang"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(argv, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

#[allow(dead_code)]
pub const CONFIG_VARS: &[&str] = &[
    "MAJIANG_CONFIG",
    "MAJIANG_SEED",
    "MAJIANG_SEATS",
    "MAJIANG_AI",
    "MAJIANG_MAX_STEPS",
];

#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Clears every configuration variable.
    pub fn clean() -> Self {
        let mut guard = EnvGuard::default();
        for key in CONFIG_VARS {
            guard.unset(key);
        }
        guard
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.restores.push((key.to_string(), std::env::var(key).ok()));
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub fn unset(&mut self, key: &str) {
        self.restores.push((key.to_string(), std::env::var(key).ok()));
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
