//! Typed failures of the record and descriptor parsers.

/// A retained (non-blank) line that cannot be turned into a dependency record.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Neither the tab split nor the space fallback produced two fields.
    #[error("record line has fewer than two fields: {line:?}")]
    TooFewFields { line: String },
    /// Every field parsed as a number, so there is no `To` entity.
    #[error("record line has no entity fields: {line:?}")]
    NoEntities { line: String },
    /// `record()` was called before `scan()` accepted a line.
    #[error("no line has been scanned yet")]
    NoCurrentLine,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("descriptor is not class-scoped: {descriptor:?}")]
    NotClassScoped { descriptor: String },
}
