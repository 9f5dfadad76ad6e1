use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] netnet_core::ValidationError),

    #[error("failed to load ticker universe: {0}")]
    Universe(#[from] netnet_core::SourceError),

    #[error("export failed: {0}")]
    Export(#[from] netnet_core::ExportError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Universe(_) => 3,
            Self::Export(_) => 10,
        }
    }
}
