use timeline_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to write {path}: {message}")]
    Output { path: String, message: String },
}

/// A single entry that could not be normalized. The entry is skipped; the rest of the
/// timeline still renders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryIssue {
    #[error("entry {index} in category {category:?} is malformed: {reason}")]
    MalformedEntry {
        category: String,
        index: usize,
        reason: String,
    },

    #[error("entry {index} in category {category:?} has malformed date {value:?}, expected {expected}")]
    MalformedDate {
        category: String,
        index: usize,
        value: String,
        expected: &'static str,
    },
}
