#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;

use oracle_os::OracleDeployConfig;
use oracle_tools::replay::replay;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: oracle <replay|check-config> --config <deploy.toml> [--script <steps.json>] [--log-level <filter>]";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

struct Args {
    subcommand: String,
    config: PathBuf,
    script: Option<PathBuf>,
    log_level: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut it = env::args().skip(1);
    let subcommand = it.next().ok_or_else(|| USAGE.to_string())?;
    let mut config = None;
    let mut script = None;
    let mut log_level = None;
    while let Some(flag) = it.next() {
        let value = it
            .next()
            .ok_or_else(|| format!("missing value for {flag}\n{USAGE}"))?;
        match flag.as_str() {
            "--config" => config = Some(PathBuf::from(value)),
            "--script" => script = Some(PathBuf::from(value)),
            "--log-level" => log_level = Some(value),
            _ => return Err(format!("unknown flag: {flag}\n{USAGE}")),
        }
    }
    Ok(Args {
        subcommand,
        config: config.ok_or_else(|| USAGE.to_string())?,
        script,
        log_level,
    })
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::try_new(l).ok(),
        None => EnvFilter::try_from_env("ORACLE_LOG").ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    init_logging(args.log_level.as_deref());

    let config = OracleDeployConfig::from_file(&args.config).map_err(|e| e.to_string())?;
    match args.subcommand.as_str() {
        "check-config" => {
            println!("{}", config.to_toml().map_err(|e| e.to_string())?);
            Ok(())
        }
        "replay" => {
            let path = args
                .script
                .ok_or_else(|| format!("replay needs --script\n{USAGE}"))?;
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            let report = replay(&config, &json)?;
            let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
            println!("{out}");
            Ok(())
        }
        other => Err(format!("unknown subcommand: {other}\n{USAGE}")),
    }
}
