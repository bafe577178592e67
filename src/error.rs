use std::path::PathBuf;

use thiserror::Error;

use crate::core::agent::AgentKind;

/// Errors raised while loading a puzzle. All of them are fatal: no search is attempted.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("failed to read {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input ended early, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("token #{position} ({token:?}) is not a valid {expected}")]
    InvalidToken {
        position: usize,
        token: String,
        expected: &'static str,
    },

    #[error("declared {declared} {kind:?} agent(s) but the board holds {found}")]
    AgentCountMismatch {
        kind: AgentKind,
        declared: usize,
        found: usize,
    },

    #[error("a {width}x{height} board exceeds the supported {max} padded cells")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
}
