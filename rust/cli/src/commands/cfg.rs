//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of every value
//! (default, configuration file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "seats": {
//!     "value": ["East", "South", "West", "North"],
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let seats: Vec<String> = config.seats.iter().map(|s| s.to_string()).collect();
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "seats": {
            "value": seats,
            "source": sources.seats,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        },
        "max_steps": {
            "value": config.max_steps,
            "source": sources.max_steps,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
