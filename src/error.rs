use thiserror::Error;

/// Errors raised while building or compiling a pattern.
#[derive(Debug, Error)]
pub enum Error {
    #[error("range list must hold an even number of characters, got {len}")]
    OddRangeList { len: usize },

    #[error("invalid pattern literal `{literal}`: {reason}")]
    InvalidLiteral { literal: String, reason: &'static str },

    #[error("invalid flag `{0}`")]
    InvalidFlag(char),

    #[error("flag `{0}` is not supported by the matching engine")]
    UnsupportedFlag(char),

    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
