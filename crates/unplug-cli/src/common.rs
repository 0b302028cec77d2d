//! Shared helpers for CLI commands.

use std::io::Write;
use std::time::Duration;

use unplug_core::storage::{Config, UsageDb};
use unplug_core::{BackendClient, UsageError};

/// Build the backend client from config.
pub fn backend_client(config: &Config) -> Result<BackendClient, Box<dyn std::error::Error>> {
    Ok(BackendClient::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
    )?)
}

/// Runtime for commands that await backend calls.
pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Open the usage database, printing grant-access guidance when it is
/// missing. `None` means the command should exit cleanly without data.
pub fn open_usage_db() -> Result<Option<UsageDb>, Box<dyn std::error::Error>> {
    match UsageDb::open() {
        Ok(db) => Ok(Some(db)),
        Err(UsageError::PermissionMissing { path }) => {
            println!("Usage access is not granted.");
            println!(
                "Start the usage recorder so it can populate {}.",
                path.display()
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read one trimmed line from stdin, erroring on EOF.
pub fn read_line(prompt: &str) -> Result<String, std::io::Error> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let n = std::io::stdin().read_line(&mut line)?;
    if n == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stdin closed",
        ));
    }
    Ok(line.trim().to_string())
}
