use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LaunchError {
    #[error("{0}")]
    Configuration(String),

    #[error("Unable to locate Application path located at {}", path.display())]
    AppNotFound { path: PathBuf },

    #[error("Unable to locate Node executable located at {}", path.display())]
    InterpreterNotFound { path: PathBuf },

    #[error("Failed to start process {command}: {source}")]
    ProcessStart {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Caption used when the error is shown to the user.
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "Error - Configuration Failure",
            Self::AppNotFound { .. } => "Error - Path Not Found",
            Self::InterpreterNotFound { .. } => "Error - Node Not Found",
            Self::ProcessStart { .. } => "Error - Process Start Failure",
        }
    }
}
