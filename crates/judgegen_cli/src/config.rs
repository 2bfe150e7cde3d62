//! Generator configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! CLI arguments.

use std::path::PathBuf;
use std::str::FromStr;

use judgegen_sampling::rng::DEFAULT_SEED;
use judgegen_sampling::SamplerConfig;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the seed
pub const ENV_SEED: &str = "JUDGEGEN_SEED";
/// Environment variable overriding the engine
pub const ENV_ENGINE: &str = "JUDGEGEN_ENGINE";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "JUDGEGEN_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Seed is not an unsigned 64-bit integer
    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    /// Unknown engine name
    #[error("Invalid engine: {0}. Must be one of: xoshiro, mt64")]
    InvalidEngine(String),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A sampler budget is zero or negative
    #[error("Invalid sampler budgets: {0}")]
    InvalidSampler(String),

    /// The configuration file could not be read or parsed
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Bit generator backing the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// xoshiro256**
    #[default]
    Xoshiro,
    /// 64-bit Mersenne Twister
    Mt64,
}

impl FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xoshiro" | "xoshiro256starstar" => Ok(EngineKind::Xoshiro),
            "mt64" | "mt19937_64" | "mt" => Ok(EngineKind::Mt64),
            _ => Err(ConfigError::InvalidEngine(s.to_string())),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Xoshiro => write!(f, "xoshiro"),
            EngineKind::Mt64 => write!(f, "mt64"),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every polygon retry
    Trace,
    /// Reseeds and exhausted budgets
    Debug,
    /// Configuration summary
    Info,
    /// Warnings only
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Generator configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Engine seed
    pub seed: u64,
    /// Engine kind
    #[serde(deserialize_with = "deserialize_engine")]
    pub engine: EngineKind,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Retry budgets and memory caps
    pub sampler: SamplerConfig,
}

fn deserialize_engine<'de, D>(deserializer: D) -> Result<EngineKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EngineKind::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            engine: EngineKind::Xoshiro,
            log_level: LogLevel::Warn,
            sampler: SamplerConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from variables found by `lookup`.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = parse_seed(&seed)?;
        }
        if let Some(engine) = lookup(ENV_ENGINE) {
            self.engine = EngineKind::from_str(&engine)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(engine) = &cli.engine {
            self.engine = EngineKind::from_str(engine)?;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sampler.is_valid() {
            return Err(ConfigError::InvalidSampler(format!("{:?}", self.sampler)));
        }
        Ok(())
    }
}

/// Parses a seed, accepting decimal or `0x`-prefixed hexadecimal.
pub fn parse_seed(s: &str) -> Result<u64, ConfigError> {
    let trimmed = s.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidSeed(s.to_string()))
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u64>,
    /// Engine override
    pub engine: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<GeneratorConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<GeneratorConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    config.merge_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, 3141592653589793238);
        assert_eq!(config.engine, EngineKind::Xoshiro);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.sampler, SamplerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_parsing() {
        assert_eq!(EngineKind::from_str("xoshiro").unwrap(), EngineKind::Xoshiro);
        assert_eq!(EngineKind::from_str("MT64").unwrap(), EngineKind::Mt64);
        assert_eq!(EngineKind::from_str("mt19937_64").unwrap(), EngineKind::Mt64);
        assert!(EngineKind::from_str("pcg").is_err());
        assert_eq!(EngineKind::Mt64.to_string(), "mt64");
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("123456789").unwrap(), 123456789);
        assert_eq!(parse_seed(" 0xFF ").unwrap(), 255);
        assert_eq!(parse_seed("18446744073709551615").unwrap(), u64::MAX);
        assert!(parse_seed("-1").is_err());
        assert!(parse_seed("seed").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            seed = 42
            engine = "mt64"
            log_level = "debug"

            [sampler]
            max_rejections = 500
            max_polygon_attempts = 20
        "#;

        let config = GeneratorConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.engine, EngineKind::Mt64);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.sampler.max_rejections, 500);
        assert_eq!(config.sampler.max_polygon_attempts, 20);
        // unspecified budgets keep their defaults
        assert_eq!(
            config.sampler.max_prime_trials,
            SamplerConfig::default().max_prime_trials
        );
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = GeneratorConfig::from_toml("seed = 7").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.engine, EngineKind::Xoshiro);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_toml_rejects_bad_values() {
        assert!(matches!(
            GeneratorConfig::from_toml("engine = \"pcg\""),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_toml("[sampler]\nmax_rejections = 0"),
            Err(ConfigError::InvalidSampler(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::from_file(&PathBuf::from("/nonexistent/judgegen.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = GeneratorConfig::default();
        config
            .merge_env(env(&[(ENV_SEED, "0x10"), (ENV_ENGINE, "mt64"), (ENV_LOG_LEVEL, "info")]))
            .unwrap();
        assert_eq!(config.seed, 16);
        assert_eq!(config.engine, EngineKind::Mt64);
        assert_eq!(config.log_level, LogLevel::Info);

        let mut config = GeneratorConfig::default();
        assert!(matches!(
            config.merge_env(env(&[(ENV_SEED, "abc")])),
            Err(ConfigError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let cli = CliArgs {
            config_file: None,
            seed: Some(99),
            engine: Some("xoshiro".to_string()),
            log_level: None,
        };
        let config =
            build_config_with_env(&cli, env(&[(ENV_SEED, "5"), (ENV_ENGINE, "mt64"), (ENV_LOG_LEVEL, "trace")]))
                .unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.engine, EngineKind::Xoshiro);
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with_env(&CliArgs::default(), |_| None).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn engine_name() -> impl Strategy<Value = Option<&'static str>> {
            prop::option::of(prop::sample::select(vec!["xoshiro", "mt64"]))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(128))]

            #[test]
            fn test_seed_text_forms(seed in any::<u64>()) {
                prop_assert_eq!(parse_seed(&seed.to_string()).unwrap(), seed);
                prop_assert_eq!(parse_seed(&format!("0x{:x}", seed)).unwrap(), seed);
                prop_assert_eq!(parse_seed(&format!("0X{:X}", seed)).unwrap(), seed);
            }

            #[test]
            fn test_layering_priority(
                file_seed in prop::option::of(0_u64..i64::MAX as u64),
                env_seed in prop::option::of(any::<u64>()),
                cli_seed in prop::option::of(any::<u64>()),
                file_engine in engine_name(),
                env_engine in engine_name(),
                cli_engine in engine_name(),
            ) {
                let mut toml_str = String::new();
                if let Some(seed) = file_seed {
                    toml_str.push_str(&format!("seed = {}\n", seed));
                }
                if let Some(engine) = file_engine {
                    toml_str.push_str(&format!("engine = \"{}\"\n", engine));
                }

                let mut vars: Vec<(&str, String)> = Vec::new();
                if let Some(seed) = env_seed {
                    vars.push((ENV_SEED, format!("0x{:x}", seed)));
                }
                if let Some(engine) = env_engine {
                    vars.push((ENV_ENGINE, engine.to_string()));
                }
                let cli = CliArgs {
                    config_file: None,
                    seed: cli_seed,
                    engine: cli_engine.map(str::to_string),
                    log_level: None,
                };

                let mut config = GeneratorConfig::from_toml(&toml_str).unwrap();
                config
                    .merge_env(|key| vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone()))
                    .unwrap();
                config.merge_with_cli(&cli).unwrap();

                let seed = cli_seed.or(env_seed).or(file_seed).unwrap_or(DEFAULT_SEED);
                let engine = cli_engine
                    .or(env_engine)
                    .or(file_engine)
                    .map(|name| EngineKind::from_str(name).unwrap())
                    .unwrap_or(EngineKind::Xoshiro);
                prop_assert_eq!(config.seed, seed);
                prop_assert_eq!(config.engine, engine);
                prop_assert_eq!(config.log_level, LogLevel::Warn);
            }
        }
    }
}
