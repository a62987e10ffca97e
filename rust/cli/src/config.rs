use majiang_ai::AI_TYPES;
use majiang_engine::player::Seat;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub seats: Vec<Seat>,
    pub ai: String,
    pub max_steps: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub seats: ValueSource,
    pub ai: ValueSource,
    pub max_steps: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            seats: ValueSource::Default,
            ai: ValueSource::Default,
            max_steps: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            seats: Seat::ALL.to_vec(),
            ai: "baseline".into(),
            max_steps: 2_000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("MAJIANG_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v
                .iter()
                .map(|name| parse_seat(name).ok_or_else(|| invalid_seat(name)))
                .collect::<Result<_, _>>()?;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.max_steps {
            cfg.max_steps = v;
            sources.max_steps = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("MAJIANG_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(seats) = std::env::var("MAJIANG_SEATS")
        && !seats.is_empty()
    {
        cfg.seats = parse_seats(&seats)?;
        sources.seats = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("MAJIANG_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }
    if let Ok(steps) = std::env::var("MAJIANG_MAX_STEPS")
        && !steps.is_empty()
    {
        cfg.max_steps = steps
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_steps".into()))?;
        sources.max_steps = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    seats: Option<Vec<String>>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    max_steps: Option<usize>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.seats.is_empty() || cfg.seats.len() > 4 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: seats must name 1 to 4 seats".into(),
        ));
    }
    for (i, seat) in cfg.seats.iter().enumerate() {
        if cfg.seats[..i].contains(seat) {
            return Err(ConfigError::Invalid(format!(
                "Invalid configuration: seat {} listed twice",
                seat
            )));
        }
    }
    if !AI_TYPES.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (expected one of {})",
            cfg.ai,
            AI_TYPES.join(", ")
        )));
    }
    if cfg.max_steps == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_steps must be >0".into(),
        ));
    }
    Ok(())
}

/// Seat by name (`east`, `E`) or index (`0`).
pub fn parse_seat(s: &str) -> Option<Seat> {
    match s.trim().to_ascii_lowercase().as_str() {
        "east" | "e" | "0" => Some(Seat::East),
        "south" | "s" | "1" => Some(Seat::South),
        "west" | "w" | "2" => Some(Seat::West),
        "north" | "n" | "3" => Some(Seat::North),
        _ => None,
    }
}

/// Comma-separated seat list, e.g. `east,west`.
pub fn parse_seats(s: &str) -> Result<Vec<Seat>, ConfigError> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_seat(part).ok_or_else(|| invalid_seat(part)))
        .collect()
}

fn invalid_seat(name: &str) -> ConfigError {
    ConfigError::Invalid(format!("Invalid seat '{}'", name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_parse_by_name_letter_or_index() {
        assert_eq!(parse_seat("North"), Some(Seat::North));
        assert_eq!(parse_seat(" w "), Some(Seat::West));
        assert_eq!(parse_seat("1"), Some(Seat::South));
        assert_eq!(parse_seat("centre"), None);
        assert_eq!(
            parse_seats("east, south").unwrap(),
            vec![Seat::East, Seat::South]
        );
        assert!(parse_seats("east,up").is_err());
    }

    #[test]
    fn validation_rejects_bad_tables() {
        assert!(validate(&Config::default()).is_ok());

        let empty = Config {
            seats: vec![],
            ..Config::default()
        };
        assert!(validate(&empty).is_err());

        let twice = Config {
            seats: vec![Seat::East, Seat::East],
            ..Config::default()
        };
        assert!(validate(&twice).is_err());

        let unknown = Config {
            ai: "oracle".into(),
            ..Config::default()
        };
        assert!(validate(&unknown).is_err());

        let no_steps = Config {
            max_steps: 0,
            ..Config::default()
        };
        assert!(validate(&no_steps).is_err());
    }
}
