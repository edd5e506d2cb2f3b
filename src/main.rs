use peppol_lookup::config::{LoggingSettings, Settings};
use peppol_lookup::core::normalize_all;
use peppol_lookup::{LookupOptions, LookupService};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Company numbers looked up when none are given on the command line
const SAMPLE_IDENTIFIERS: &[&str] = &[
    "BE 0769.377.373",
    "BE0123.456.749",
    "123-456-47125",
    "NL 8123.45.678.B01",
];

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn print_section<T: serde::Serialize>(title: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}:\n{}", title, json),
        Err(e) => error!("Failed to render {}: {}", title, e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let identifiers = if args.is_empty() {
        normalize_all(SAMPLE_IDENTIFIERS)
    } else {
        normalize_all(&args)
    };

    info!(
        "Looking up {} identifiers against {}",
        identifiers.len(),
        settings.directory.base_url
    );

    let service = match LookupService::from_settings(&settings.directory) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create directory client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = match service.lookup(&identifiers, &LookupOptions::default()).await {
        Ok(r) => r,
        Err(e) => {
            error!("Lookup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_section("Registered", &report.registered);
    print_section("Unregistered", &report.unregistered);
    if !report.failed.is_empty() {
        print_section("Failed", &report.failed);
    }

    ExitCode::SUCCESS
}
