//! Runtime configuration shared by the binary and the integration tests.
//!
//! Centralizes the audit log resolution order so every entry point agrees:
//! an explicit `--audit-log` path, then `CARPARK_AUDIT_LOG`, then
//! `carpark_log.txt` in the working directory.

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const AUDIT_LOG_ENV: &str = "CARPARK_AUDIT_LOG";
pub const DEFAULT_AUDIT_LOG: &str = "carpark_log.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    ListJson,
    Help,
}

/// Parsed command-line options for the `carpark` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub audit_log: PathBuf,
    pub seed_demo_fleet: bool,
    pub mode: Mode,
}

impl Config {
    /// Parse arguments (without the program name), consulting the
    /// environment for the audit log when no flag is given.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::from_args_with_env(args, env::var_os(AUDIT_LOG_ENV))
    }

    pub fn from_args_with_env<I>(args: I, env_audit_log: Option<OsString>) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut audit_log: Option<PathBuf> = None;
        let mut seed_demo_fleet = true;
        let mut mode = Mode::Interactive;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let flag = arg
                .to_str()
                .with_context(|| format!("Invalid UTF-8 in argument {arg:?}"))?;
            match flag {
                "--audit-log" => {
                    let value = args.next().context("--audit-log requires a path")?;
                    if audit_log.is_some() {
                        bail!("--audit-log provided multiple times");
                    }
                    audit_log = Some(PathBuf::from(value));
                }
                "--no-seed" => seed_demo_fleet = false,
                "--list-json" => mode = Mode::ListJson,
                "--help" | "-h" => mode = Mode::Help,
                other => bail!("Unknown argument: {other}"),
            }
        }

        let audit_log = audit_log
            .or_else(|| audit_log_from_env(env_audit_log))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG));

        Ok(Self {
            audit_log,
            seed_demo_fleet,
            mode,
        })
    }
}

fn audit_log_from_env(value: Option<OsString>) -> Option<PathBuf> {
    value
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let config = Config::from_args_with_env(args(&[]), None).unwrap();
        assert_eq!(config.audit_log, PathBuf::from(DEFAULT_AUDIT_LOG));
        assert!(config.seed_demo_fleet);
        assert_eq!(config.mode, Mode::Interactive);
    }

    #[test]
    fn flag_beats_env_and_env_beats_default() {
        let from_env =
            Config::from_args_with_env(args(&[]), Some(OsString::from("/tmp/env.log"))).unwrap();
        assert_eq!(from_env.audit_log, PathBuf::from("/tmp/env.log"));

        let from_flag = Config::from_args_with_env(
            args(&["--audit-log", "/tmp/flag.log"]),
            Some(OsString::from("/tmp/env.log")),
        )
        .unwrap();
        assert_eq!(from_flag.audit_log, PathBuf::from("/tmp/flag.log"));
    }

    #[test]
    fn blank_env_is_ignored() {
        let config =
            Config::from_args_with_env(args(&[]), Some(OsString::from("   "))).unwrap();
        assert_eq!(config.audit_log, PathBuf::from(DEFAULT_AUDIT_LOG));
    }

    #[test]
    fn parses_mode_flags() {
        let config = Config::from_args_with_env(args(&["--no-seed", "--list-json"]), None).unwrap();
        assert!(!config.seed_demo_fleet);
        assert_eq!(config.mode, Mode::ListJson);
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        let err = Config::from_args_with_env(args(&["--fly"]), None).unwrap_err();
        assert!(err.to_string().contains("Unknown argument: --fly"));
        let err = Config::from_args_with_env(args(&["--audit-log"]), None).unwrap_err();
        assert!(err.to_string().contains("requires a path"));
        let err = Config::from_args_with_env(
            args(&["--audit-log", "a", "--audit-log", "b"]),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("multiple times"));
    }
}
