use thiserror::Error;

use super::node::NodeRef;
use crate::constants::MAX_NUMBER_LEN;

/// Errors produced by decoding, pool allocation, queries and tree construction.
///
/// Use [`BencodeError::kind`] to tell the broad failure classes apart, e.g. a
/// malformed document from an exhausted pool.
#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    #[error("unexpected character {byte:?} at byte {offset}")]
    UnexpectedChar { byte: char, offset: usize },

    #[error("invalid integer at byte {0}")]
    InvalidInteger(usize),

    #[error("invalid string length at byte {0}")]
    InvalidStringLength(usize),

    #[error("string of {len} bytes at byte {offset} exceeds the limit of {max}")]
    StringTooLong { len: usize, max: u32, offset: usize },

    #[error("integer at byte {0} has more than {max} characters", max = MAX_NUMBER_LEN)]
    NumberTooLong(usize),

    #[error("container at byte {offset} has more than {max} entries")]
    TooManyEntries { max: u32, offset: usize },

    #[error("nesting too deep at byte {0}")]
    NestingTooDeep(usize),

    #[error("trailing data at byte {0}")]
    TrailingData(usize),

    #[error("empty input")]
    EmptyInput,

    #[error("input of {len} bytes exceeds the limit of {max}")]
    InputTooLarge { len: usize, max: u64 },

    #[error("node pool exhausted ({capacity} slots)")]
    OutOfCapacity { capacity: u32 },

    #[error("node pool cannot grow beyond {capacity} slots")]
    OutOfMemory { capacity: u32 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed query: {0}")]
    QueryMalformed(String),

    #[error("invalid node reference {0}")]
    InvalidNodeRef(NodeRef),

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("container already holds the maximum of {max} entries")]
    EntryLimit { max: u32 },

    #[error("value of {len} bytes exceeds the limit of {max}")]
    ValueTooLong { len: usize, max: u32 },

    #[error("node {0} is already linked into a container")]
    AlreadyLinked(NodeRef),

    #[error("linking node {0} would make a container its own descendant")]
    CyclicLink(NodeRef),

    #[error("cannot change the width profile of a pool holding {used} slots")]
    PoolInUse { used: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad failure classes of [`BencodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grammar violation or limit exceeded while decoding. Aborts the whole decode.
    MalformedInput,
    /// A fixed pool ran out of slots.
    OutOfCapacity,
    /// A growable pool could not grow.
    OutOfMemory,
    /// A query named a missing key or an out-of-range index.
    NotFound,
    /// A query path could not be parsed.
    QueryMalformed,
    /// The construction API was handed a node it cannot use.
    InvalidOperation,
    /// Writing encoded output failed.
    Io,
}

impl BencodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BencodeError::UnexpectedEof(_)
            | BencodeError::UnexpectedChar { .. }
            | BencodeError::InvalidInteger(_)
            | BencodeError::InvalidStringLength(_)
            | BencodeError::StringTooLong { .. }
            | BencodeError::NumberTooLong(_)
            | BencodeError::TooManyEntries { .. }
            | BencodeError::NestingTooDeep(_)
            | BencodeError::TrailingData(_)
            | BencodeError::EmptyInput
            | BencodeError::InputTooLarge { .. } => ErrorKind::MalformedInput,
            BencodeError::OutOfCapacity { .. } => ErrorKind::OutOfCapacity,
            BencodeError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            BencodeError::NotFound(_) => ErrorKind::NotFound,
            BencodeError::QueryMalformed(_) => ErrorKind::QueryMalformed,
            BencodeError::InvalidNodeRef(_)
            | BencodeError::TypeMismatch { .. }
            | BencodeError::EntryLimit { .. }
            | BencodeError::ValueTooLong { .. }
            | BencodeError::AlreadyLinked(_)
            | BencodeError::CyclicLink(_)
            | BencodeError::PoolInUse { .. } => ErrorKind::InvalidOperation,
            BencodeError::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns `true` for allocation failures of either pool flavour.
    pub fn is_allocation(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfCapacity | ErrorKind::OutOfMemory)
    }
}
