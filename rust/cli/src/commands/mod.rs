//! Command handler modules for the `majiang` CLI.
//!
//! Each command is implemented in its own module file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers: Helper functions specific to that command
//! - Dependency injection: Output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: All errors propagated via `CliError` enum

pub mod cfg;
pub mod deal;
pub mod replay;
pub mod rng;
pub mod sim;
pub mod snapshot;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use replay::handle_replay_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use snapshot::handle_snapshot_command;
