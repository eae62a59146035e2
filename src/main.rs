//! Stonecrest balance simulator CLI.
//!
//! Runs seeded auto-battles to analyze class and enemy balance.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                                       # 1000 Fighter runs at the forest entrance
//!   cargo run -- -n 200 --class wizard             # 200 Wizard runs
//!   cargo run -- --location deep_woods --seed 42   # Reproducible run in the deep woods

use stonecrest::build_info;
use stonecrest::character::CharacterClass;
use stonecrest::simulator::{run_simulation, SimConfig};
use stonecrest::BalanceConfig;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    config: SimConfig,
    config_path: Option<String>,
    json: bool,
}

enum Command {
    Run(Box<CliArgs>),
    Help,
    Version,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(Command::Run(cli)) => *cli,
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CliArgs) -> Result<(), String> {
    let mut config = cli.config;
    if let Some(path) = &cli.config_path {
        config.balance = BalanceConfig::from_path(path).map_err(|e| e.to_string())?;
    }
    // A seed from the command line wins over one in the config file.
    if config.seed.is_none() {
        config.seed = config.balance.seed;
    }

    if !cli.json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              STONECREST BALANCE SIMULATOR                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Class:          {}", config.class);
        println!("  Location:       {}", config.location_id);
        println!("  Potions:        {}", config.starting_potions);
        if config.flee_below > 0.0 {
            println!("  Flee below:     {:.0}% health", config.flee_below * 100.0);
        }
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config).map_err(|e| e.to_string())?;

    if cli.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut cli = CliArgs {
        config: SimConfig::default(),
        config_path: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                cli.config.num_runs = parse_value(flag, value_after(args, i)?)?;
                i += 1;
            }
            "-s" | "--seed" => {
                cli.config.seed = Some(parse_value(flag, value_after(args, i)?)?);
                i += 1;
            }
            "-c" | "--class" => {
                let name = value_after(args, i)?;
                cli.config.class = CharacterClass::from_name(name)
                    .ok_or_else(|| format!("unknown class '{}'", name))?;
                i += 1;
            }
            "-l" | "--location" => {
                cli.config.location_id = value_after(args, i)?.to_ascii_lowercase();
                i += 1;
            }
            "-p" | "--potions" => {
                cli.config.starting_potions = parse_value(flag, value_after(args, i)?)?;
                i += 1;
            }
            "--flee-below" => {
                let ratio: f64 = parse_value(flag, value_after(args, i)?)?;
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(format!("--flee-below must be within 0.0..=1.0, got {}", ratio));
                }
                cli.config.flee_below = ratio;
                i += 1;
            }
            "--config" => {
                cli.config_path = Some(value_after(args, i)?.to_string());
                i += 1;
            }
            "--json" => {
                cli.json = true;
            }
            "-V" | "--version" => return Ok(Command::Version),
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(format!("unrecognized option '{}'", other)),
        }
        i += 1;
    }

    Ok(Command::Run(Box::new(cli)))
}

fn value_after(args: &[String], i: usize) -> Result<&str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", args[i]))
}

fn parse_value<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid value '{}' for {}", raw, flag))
}

fn print_help() {
    println!("Stonecrest Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    stonecrest [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Number of fights (default: 1000)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -c, --class <CLASS>     Fighter, Wizard, Scout, Ranger or Cleric (default: Fighter)");
    println!("    -l, --location <ID>     Location whose enemies are fought (default: forest_entrance)");
    println!("    -p, --potions <N>       Healing potions at the start of each fight (default: 1)");
    println!("    --flee-below <RATIO>    Flee at or below this fraction of max health");
    println!("    --config <FILE>         Balance settings as JSON");
    println!("    --json                  Print the report as JSON");
    println!("    -V, --version           Show version and build info");
    println!("    -h, --help              Show this help");
    println!();
    println!("Set RUST_LOG=debug to trace individual rolls.");
    println!();
    println!("EXAMPLES:");
    println!("    stonecrest -n 500 --class cleric");
    println!("    stonecrest --location deep_woods --seed 42 --json");
}
