use thiserror::Error;

/// Errors surfaced to the embedding page.
///
/// Nothing here is retried internally; the host decides whether to mount again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackdropError {
    #[error("no container element to mount the backdrop into")]
    MissingContainer,

    #[error("container element `{0}` is not attached to a document")]
    DetachedContainer(String),

    #[error("WebGL2 is not available: {0}")]
    SurfaceUnavailable(String),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("failed to allocate GPU resource: {0}")]
    GpuResource(&'static str),

    #[error("invalid backdrop option: {0}")]
    InvalidConfig(String),

    #[error("browser call failed: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, BackdropError>;
