//! Command-line front end for `silentnotes_core`.
//!
//! # Responsibility
//! - Verify core crate linkage (`ping`, `version`).
//! - Inspect a repository snapshot: fingerprint before and after maintenance.
//!
//! Usage: `silentnotes_cli [snapshot-path]`. Set `SILENTNOTES_LOG_DIR` to an
//! absolute directory to enable file logging.

use silentnotes_core::{default_log_level, init_logging, parse_repository};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "SILENTNOTES_LOG_DIR";

fn main() -> ExitCode {
    println!("silentnotes_core ping={}", silentnotes_core::ping());
    println!("silentnotes_core version={}", silentnotes_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level().as_str(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match inspect(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=snapshot_inspect module=cli status=error");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn inspect(path: &str) -> Result<(), String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("repository not found at `{path}`: {err}"))?;
    let mut repository = parse_repository(&text).map_err(|err| err.to_string())?;

    println!("repository id={}", repository.id);
    println!("repository revision={}", repository.revision);
    println!(
        "repository notes={} deleted_notes={} safes={} tags={}",
        repository.notes.len(),
        repository.deleted_notes.len(),
        repository.safes.len(),
        repository.tags.len()
    );

    let report = repository.run_maintenance();
    println!("fingerprint before={}", report.fingerprint_before);
    println!("fingerprint after={}", report.fingerprint_after);
    println!(
        "maintenance cleared_markers={} removed_safes={} removed_tags={} changed={}",
        report.cleared_markers,
        report.removed_safes,
        report.removed_tags,
        report.changed()
    );
    Ok(())
}
