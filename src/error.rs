use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while configuring the controller or attaching it to a MIDI port.
///
/// The decoding core never fails; everything here comes from the file system,
/// the YAML layer or the MIDI backend.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to initialise MIDI input: {0}")]
    MidiInit(String),
    #[error("no MIDI input port matching \"{0}\" was found")]
    PortNotFound(String),
    #[error("failed to open MIDI connection: {0}")]
    Connection(String),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
