use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Module not loaded: {0}")]
    ModuleNotFound(String),

    #[error("Signature not found in module ({0} strategy)")]
    SignatureNotFound(&'static str),

    #[error("Tick interval target is unresolved")]
    Unresolved,

    #[error("Requested tickrate equals the current tickrate")]
    NoOpSameValue,

    #[error("Invalid signature pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// A suppressed no-op rather than a real failure.
    pub fn is_noop(&self) -> bool {
        matches!(self, Error::NoOpSameValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_is_not_a_real_failure() {
        assert!(Error::NoOpSameValue.is_noop());
        assert!(!Error::Unresolved.is_noop());
        assert!(!Error::ModuleNotFound("engine.dll".to_string()).is_noop());
    }
}
