mod consumer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use cyclicbuf_core::config::CaptureConfig;
use cyclicbuf_core::serial::{
    list_serial_ports, parse_serial_config, serial_reader_loop, SerialStatus,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("Usage: cyclicbuf-agent --config <file>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file>  Capture the configured serial port to stdout");
    eprintln!("  --list-ports     List available serial ports and exit");
    eprintln!("  --version        Print version and exit");
    eprintln!("  --help           Print this help message");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--version" => {
            println!("cyclicbuf-agent {}", VERSION);
            Ok(())
        }
        "--help" => {
            print_usage();
            Ok(())
        }
        "--list-ports" => {
            for port in list_serial_ports() {
                println!("{port}");
            }
            Ok(())
        }
        "--config" => {
            let Some(path) = args.get(2) else {
                eprintln!("Missing value for --config");
                print_usage();
                std::process::exit(1);
            };

            // Logs go to stderr; stdout carries only captured bytes.
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            info!("cyclicbuf-agent {} starting", VERSION);
            run_capture(path)
        }
        other => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Capture the configured port until it closes, draining to stdout.
fn run_capture(path: &str) -> anyhow::Result<()> {
    let config = CaptureConfig::load(path)
        .with_context(|| format!("Failed to load config {path}"))?
        .expand();
    let parsed = parse_serial_config(&config.serial)?;
    let store = config
        .store
        .build()
        .context("Failed to create ring store")?;

    info!(
        port = %parsed.port,
        capacity = store.total_size(),
        window = store.window_size(),
        "Ring store ready"
    );

    let store = Arc::new(Mutex::new(store));
    let closed = Arc::new(AtomicBool::new(false));

    let reader = {
        let store = store.clone();
        let closed = closed.clone();
        std::thread::spawn(move || {
            serial_reader_loop(&parsed, store, closed, |status| match status {
                SerialStatus::Error(msg) => warn!("Serial status: {msg}"),
                other => info!("Serial status: {other:?}"),
            })
        })
    };

    let mut stdout = std::io::stdout().lock();
    let drained = consumer::run_consumer(
        &store,
        &mut stdout,
        Duration::from_millis(config.poll_interval_ms),
        || reader.is_finished(),
    );
    closed.store(true, Ordering::SeqCst);
    let total = drained.context("Failed to write captured data")?;

    if reader.join().is_err() {
        warn!("Serial reader thread panicked");
    }
    info!(total, "Capture finished");
    Ok(())
}
