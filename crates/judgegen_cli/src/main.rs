//! judgegen - Reproducible Test Data from the Command Line
//!
//! This is the operational entry point for the judgegen sampling engine.
//! Every command prints its data to stdout; diagnostics go to stderr.
//!
//! # Commands
//!
//! - `judgegen integers --count 10 --lower 1 --upper 100` - Integer sequences
//! - `judgegen perm --n 8` - Permutations, optionally with cycles or fixed points
//! - `judgegen partition --n 20 --k 4` - Compositions of an integer
//! - `judgegen string --length 16 --alphabet lower` - Random strings
//! - `judgegen brackets --pairs 5` - Balanced bracket sequences
//! - `judgegen prime --lower 1000 --upper 2000` - Random primes
//! - `judgegen primes --lower 0 --upper 100` - All primes of a range
//! - `judgegen convex --n 10 --dim-x 100` - Convex polygons
//! - `judgegen polygon --n 10 --dim 100` - Simple polygons
//! - `judgegen points --n 10 --dim 100` - Points with no three collinear
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate resolves configuration
//! (file, environment, flags), builds one sampler for the selected engine and
//! dispatches to the command modules.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use judgegen_sampling::rng::{Mt19937_64, Xoshiro256StarStar};
use judgegen_sampling::Sampler;
use rand_core::RngCore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::sequence::Order;
use config::{build_config, parse_seed, CliArgs, EngineKind};
pub use error::{CliError, Result};

/// judgegen test data generator CLI
#[derive(Parser, Debug)]
#[command(name = "judgegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Engine seed, decimal or 0x-prefixed hexadecimal
    #[arg(short, long, global = true, value_parser = parse_seed_arg)]
    seed: Option<u64>,

    /// Bit generator (xoshiro, mt64)
    #[arg(short, long, global = true)]
    engine: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print integers drawn from [lower, upper)
    Integers {
        /// Number of values
        #[arg(short = 'n', long)]
        count: i64,

        /// Inclusive lower bound
        #[arg(short, long)]
        lower: i64,

        /// Exclusive upper bound
        #[arg(short, long)]
        upper: i64,

        /// Ordering constraint
        #[arg(short, long, value_enum, default_value_t = Order::Any)]
        order: Order,
    },

    /// Print a permutation of [offset, offset + n)
    Perm {
        /// Length of the permutation
        #[arg(short, long)]
        n: i64,

        /// Smallest value
        #[arg(short, long, default_value = "1")]
        offset: i64,

        /// Cycle lengths, comma separated; must add up to n
        #[arg(long, value_delimiter = ',', conflicts_with = "fixed")]
        cycles: Vec<i64>,

        /// Values that must map to themselves, comma separated
        #[arg(long, value_delimiter = ',')]
        fixed: Vec<i64>,
    },

    /// Print k parts, each at least min, adding up to n
    Partition {
        /// Total
        #[arg(short, long)]
        n: i64,

        /// Number of parts
        #[arg(short, long)]
        k: i64,

        /// Smallest allowed part
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        min: i64,
    },

    /// Print a random string
    String {
        /// Length of the string
        #[arg(short, long)]
        length: i64,

        /// Named character set (letter, lower, upper, digits, alnum, ...) or literal characters
        #[arg(short, long, default_value = "lower")]
        alphabet: String,
    },

    /// Print a balanced bracket sequence
    Brackets {
        /// Number of bracket pairs
        #[arg(short, long)]
        pairs: i64,

        /// Opening character
        #[arg(long, default_value = "(")]
        open: char,

        /// Closing character
        #[arg(long, default_value = ")")]
        close: char,
    },

    /// Print random primes from [lower, upper)
    Prime {
        /// Inclusive lower bound
        #[arg(short, long)]
        lower: i64,

        /// Exclusive upper bound
        #[arg(short, long)]
        upper: i64,

        /// Number of primes
        #[arg(short = 'n', long, default_value = "1")]
        count: i64,
    },

    /// Print every prime in [lower, upper)
    Primes {
        /// Inclusive lower bound
        #[arg(short, long)]
        lower: i64,

        /// Exclusive upper bound
        #[arg(short, long)]
        upper: i64,
    },

    /// Print a convex polygon in counter-clockwise order
    Convex {
        /// Number of vertices
        #[arg(short, long)]
        n: i64,

        /// Coordinates satisfy |x| < dim-x
        #[arg(long)]
        dim_x: i64,

        /// Coordinates satisfy |y| < dim-y; defaults to dim-x
        #[arg(long)]
        dim_y: Option<i64>,
    },

    /// Print a simple polygon
    Polygon {
        /// Number of vertices
        #[arg(short, long)]
        n: i64,

        /// Coordinates lie strictly inside (-dim, dim)
        #[arg(short, long)]
        dim: i64,
    },

    /// Print points with no three collinear
    Points {
        /// Number of points
        #[arg(short, long)]
        n: i64,

        /// Coordinates lie strictly inside (-dim, dim)
        #[arg(short, long)]
        dim: i64,
    },
}

fn parse_seed_arg(s: &str) -> std::result::Result<u64, String> {
    parse_seed(s).map_err(|e| e.to_string())
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            seed: cli.seed,
            engine: cli.engine.clone(),
            log_level: cli.log_level.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs one command against `sampler`, writing its data to `out`.
fn execute<E: RngCore>(command: &Commands, sampler: &mut Sampler<E>, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Integers {
            count,
            lower,
            upper,
            order,
        } => commands::sequence::run_integers(sampler, *count, *lower, *upper, *order, out),
        Commands::Perm {
            n,
            offset,
            cycles,
            fixed,
        } => commands::permutation::run(sampler, *n, *offset, cycles, fixed, out),
        Commands::Partition { n, k, min } => commands::sequence::run_partition(sampler, *n, *k, *min, out),
        Commands::String { length, alphabet } => commands::text::run_string(sampler, *length, alphabet, out),
        Commands::Brackets { pairs, open, close } => {
            commands::text::run_brackets(sampler, *pairs, *open, *close, out)
        }
        Commands::Prime { lower, upper, count } => {
            commands::primes::run_prime(sampler, *count, *lower, *upper, out)
        }
        Commands::Primes { lower, upper } => commands::primes::run_primes(sampler, *lower, *upper, out),
        Commands::Convex { n, dim_x, dim_y } => {
            commands::geometry::run_convex(sampler, *n, *dim_x, dim_y.unwrap_or(*dim_x), out)
        }
        Commands::Polygon { n, dim } => commands::geometry::run_simple(sampler, *n, *dim, out),
        Commands::Points { n, dim } => commands::geometry::run_points(sampler, *n, *dim, out),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(&CliArgs::from(cli))?;
    init_tracing(config.log_level.as_filter_str());

    info!(
        seed = config.seed,
        engine = %config.engine,
        log_level = %config.log_level,
        max_rejections = config.sampler.max_rejections,
        max_polygon_attempts = config.sampler.max_polygon_attempts,
        "Generator configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match config.engine {
        EngineKind::Xoshiro => {
            let mut sampler = Sampler::<Xoshiro256StarStar>::from_seed(config.seed).with_config(config.sampler);
            execute(&cli.command, &mut sampler, &mut out)?;
        }
        EngineKind::Mt64 => {
            let mut sampler = Sampler::<Mt19937_64>::from_seed(config.seed).with_config(config.sampler);
            execute(&cli.command, &mut sampler, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("judgegen: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn output(args: &[&str], engine: EngineKind, seed: u64) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut buf = Vec::new();
        let result = match engine {
            EngineKind::Xoshiro => execute(&cli.command, &mut Sampler::<Xoshiro256StarStar>::from_seed(seed), &mut buf),
            EngineKind::Mt64 => execute(&cli.command, &mut Sampler::<Mt19937_64>::from_seed(seed), &mut buf),
        };
        result.unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "judgegen", "--seed", "0x2A", "--engine", "mt64", "primes", "-l", "0", "-u", "10",
        ])
        .unwrap();
        let args = CliArgs::from(&cli);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.engine.as_deref(), Some("mt64"));
        assert!(args.config_file.is_none());
    }

    #[test]
    fn test_bad_seed_rejected() {
        assert!(Cli::try_parse_from(["judgegen", "--seed", "x", "primes", "-l", "0", "-u", "10"]).is_err());
    }

    #[test]
    fn test_integers_reference_output() {
        let text = output(
            &["judgegen", "integers", "-n", "7", "-l", "123", "-u", "123456789"],
            EngineKind::Mt64,
            123456789,
        );
        assert_eq!(text, "7\n43070660 32948942 16870018 3525658 107275727 43315498 8778520\n");

        let text = output(
            &["judgegen", "integers", "-n", "7", "-l", "123", "-u", "123456789"],
            EngineKind::Xoshiro,
            123456789,
        );
        assert_eq!(text, "7\n103657373 83240723 14542107 118648527 38081356 39243128 30308572\n");
    }

    #[test]
    fn test_perm_cycles_parsing() {
        let cli = Cli::try_parse_from(["judgegen", "perm", "-n", "5", "--cycles", "3,2"]).unwrap();
        match cli.command {
            Commands::Perm { cycles, offset, .. } => {
                assert_eq!(cycles, vec![3, 2]);
                assert_eq!(offset, 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["judgegen", "perm", "-n", "5", "--cycles", "5", "--fixed", "1"]).is_err());
    }

    #[test]
    fn test_primes_output() {
        let text = output(&["judgegen", "primes", "-l", "0", "-u", "20"], EngineKind::Xoshiro, 1);
        assert_eq!(text, "8\n2 3 5 7 11 13 17 19\n");
    }

    #[test]
    fn test_convex_default_dim_y() {
        let text = output(&["judgegen", "convex", "-n", "6", "--dim-x", "10"], EngineKind::Xoshiro, 2);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0], "6");
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn test_same_seed_same_output() {
        let args = ["judgegen", "polygon", "-n", "12", "-d", "100"];
        assert_eq!(
            output(&args, EngineKind::Mt64, 77),
            output(&args, EngineKind::Mt64, 77)
        );
    }
}
