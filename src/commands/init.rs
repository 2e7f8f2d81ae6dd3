use crate::commands::Out;
use crate::config::BackendKind;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and:
/// - Creates an initial `config.json` file selecting `backend`
/// - Creates the empty storage for that backend
///
/// # Arguments
/// - `flow_home` - The directory that will be the root of data directory, e.g. `$HOME/finance-flow`
/// - `backend` - Where transactions will be persisted.
///
/// # Errors
/// - Returns an error if the directory was already initialized or any file operations fail.
pub fn init(flow_home: &Path, backend: BackendKind) -> Result<Out<()>> {
    let config = Config::create(flow_home, backend)
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the flow directory at {} using the {} backend",
        config.root().display(),
        config.backend()
    )
    .into())
}
