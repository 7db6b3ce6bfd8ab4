// Room Inventory - Main Entry Point
//
// Generate the default layout and write it:
//
// ```console
// $ ./target/release/room-inventory --output layout.json
// ```
//
// Check a saved layout:
//
// ```console
// $ ./target/release/room-inventory --layout layout.json --dry-run --verbose
// ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use hotel_room_inventory::session::{EditorSession, LoggingConfig};
use hotel_room_inventory::types::{CliArgs, InventoryConfig, OutputFormat};
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match InventoryConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::init_quiet()
    };
    let _guard = match logging {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    info!("Starting room inventory");

    let config = InventoryConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let format = config.output_format()?;

    let session = match &args.layout {
        Some(path) => EditorSession::load(path, config.allocator())
            .with_context(|| format!("Failed to load layout {}", path))?,
        None => EditorSession::from_config(&config).context("Failed to generate layout")?,
    };

    print_report(&config, &session, format)?;

    if let Err(refusal) = session.validate() {
        bail!("Layout cannot be saved: {}", refusal);
    }

    if args.dry_run {
        eprintln!("Dry run mode - no output written.");
        return Ok(());
    }

    if let Some(path) = &args.output {
        session.save(path).with_context(|| format!("Failed to write {}", path))?;
        eprintln!("Inventory written to {}", path);
    }

    info!("Room inventory completed successfully");
    Ok(())
}

/// Print the summary and consistency report
fn print_report(config: &InventoryConfig, session: &EditorSession, format: OutputFormat) -> Result<()> {
    let summary = session.summary();
    let violations = session.check();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            eprintln!("{}", config.hotel_name);
            eprintln!("{}", "=".repeat(config.hotel_name.chars().count().max(1)));
            eprint!("{}", summary);
        }
    }

    if violations.is_empty() {
        eprintln!("Consistency: OK");
    } else {
        eprintln!("Consistency: {} problem(s)", violations.len());
        for violation in &violations {
            eprintln!("  - {}", violation);
        }
    }
    Ok(())
}
