use thiserror::Error;

use crate::program::ShaderStage;

/// Why a program could not be built. Neither case is recoverable: the source text has to change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    /// The driver rejected the source of one stage.
    #[error("could not compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// Both stages compiled but the driver refused to link them together.
    #[error("could not link program: {log}")]
    Link { log: String },
}

impl ShaderError {
    /// The driver's diagnostic text, already bounded by [`crate::INFO_LOG_CAPACITY`].
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => log,
        }
    }

    /// `"vertex"`, `"fragment"` or `"program"`, depending on which step failed.
    pub fn tag(&self) -> &'static str {
        match self {
            ShaderError::Compile { stage, .. } => stage.name(),
            ShaderError::Link { .. } => "program",
        }
    }
}
