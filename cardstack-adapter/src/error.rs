use thiserror::Error;

pub type Result<T> = std::result::Result<T, StackError>;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("card stack was disposed before the requested layout pass ran")]
    Disposed,

    #[error("no tokio runtime available to schedule navigation: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
