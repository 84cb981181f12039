use std::io;

use dispatch_core::fleet_store::FleetStoreError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    FleetStore(#[from] FleetStoreError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}
