use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid colour `{0}`, expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("unknown colour mode `{0}`")]
    UnknownColorMode(String),
    #[error("hand has {got} landmarks, expected {expected}")]
    MissingLandmarks { got: usize, expected: usize },
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
