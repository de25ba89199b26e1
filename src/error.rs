//! Crate error type
//!
//! Only startup and settings loading can fail; play itself never does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("no browser window")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("missing element #{0}")]
    MissingElement(&'static str),

    #[error("element #{id} is not a {expected}")]
    WrongElement {
        id: &'static str,
        expected: &'static str,
    },

    #[error("canvas has no 2d context")]
    NoContext,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::MissingElement("game").to_string(), "missing element #game");
        let err = Error::WrongElement {
            id: "game",
            expected: "canvas",
        };
        assert_eq!(err.to_string(), "element #game is not a canvas");
    }
}
