//! Interactive car park manager.
//!
//! Seeds the demo fleet (unless `--no-seed`), wires the file-backed audit
//! sink and the charge/refuel observers, then hands stdin/stdout to the
//! shell. Observer notifications go to stderr so they never interleave with
//! the menu output. With `--list-json` it prints the fleet as NDJSON
//! summaries and exits without touching the audit log.

use anyhow::{Context, Result};
use carpark::runtime::{AUDIT_LOG_ENV, Config, DEFAULT_AUDIT_LOG, Mode};
use carpark::shell::Shell;
use carpark::{CarPark, FileAuditSink, Registry, demo_fleet};
use std::env;
use std::io::{self, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_args(env::args_os().skip(1))?;
    if config.mode == Mode::Help {
        usage(0);
    }

    if config.mode == Mode::ListJson {
        let mut registry = Registry::new();
        if config.seed_demo_fleet {
            demo_fleet().into_iter().for_each(|vehicle| registry.add(vehicle));
        }
        return list_json(&registry);
    }

    let sink = FileAuditSink::new(&config.audit_log);
    log::debug!("appending audit records to {}", sink.path().display());
    let mut park = CarPark::new(sink);
    park.on_vehicle_charged(|v| {
        log::info!("charged {} ({})", v.model(), v.kind_name());
        eprintln!("Notification: {} has been charged.", v.model());
    });
    park.on_vehicle_refueled(|v| {
        log::info!("refueled {} ({})", v.model(), v.kind_name());
        eprintln!("Notification: {} has been refueled.", v.model());
    });

    if config.seed_demo_fleet {
        for vehicle in demo_fleet() {
            park.add_vehicle(vehicle);
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut park, stdin.lock(), stdout.lock())
        .run()
        .context("interactive shell failed")
}

fn list_json(registry: &Registry) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in registry.list() {
        serde_json::to_writer(&mut out, &row)?;
        writeln!(out)?;
    }
    Ok(())
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: carpark [--audit-log PATH] [--no-seed] [--list-json]\n\nOptions:\n  --audit-log PATH  Append audit records to PATH (default: ${AUDIT_LOG_ENV} or {DEFAULT_AUDIT_LOG}).\n  --no-seed         Start with an empty fleet instead of the demo vehicles.\n  --list-json       Print the fleet as NDJSON vehicle summaries and exit (no audit records).\n  --help, -h        Show this message.\n\nCharge/refuel notifications are printed to stderr."
    );
    std::process::exit(code);
}
