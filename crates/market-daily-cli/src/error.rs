use market_daily_core::PipelineError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Every fatal pipeline error exits with 1; bad arguments follow clap's 2.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Pipeline(_) => 1,
            Self::InvalidArgument(_) => 2,
        }
    }
}
