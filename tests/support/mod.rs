use anyhow::{Context, Result, bail};
use carpark::{CarPark, MemoryAuditSink, VehicleKindId};
use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the `carpark` binary Cargo built for this test run.
pub fn helper_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_carpark"))
}

/// `carpark` command with logging and the audit-log variable cleared so the
/// environment of the test runner cannot leak in.
pub fn carpark_command() -> Command {
    let mut cmd = Command::new(helper_binary());
    cmd.env_remove("RUST_LOG")
        .env_remove(carpark::runtime::AUDIT_LOG_ENV);
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Car park backed by an in-memory audit sink, pre-populated with one
/// vehicle per `(kind, model, year)` entry.
pub fn memory_park(entries: &[(VehicleKindId, &str, i32)]) -> CarPark<MemoryAuditSink> {
    let mut park = CarPark::new(MemoryAuditSink::new());
    for (kind, model, year) in entries {
        park.add_vehicle(kind.build(*model, *year));
    }
    park
}

/// Audit messages recorded after the initial `Added ...` entries.
pub fn operation_messages(park: &CarPark<MemoryAuditSink>) -> Vec<String> {
    park.audit().messages()[park.registry().len()..]
        .iter()
        .map(|m| m.to_string())
        .collect()
}
