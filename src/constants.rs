//! Format limits and tuning defaults.
//!
//! This module contains the constants used throughout the decoder and node pool,
//! including the nesting limit, the number length cap, and the heuristics used to
//! size a pool before decoding.

// ============================================================================
// Decoder limits
// ============================================================================

/// Default maximum nesting of lists and dictionaries.
///
/// A document may nest up to `DEFAULT_MAX_DEPTH - 1` containers; the next level
/// is rejected. Because the decoder is recursive this also bounds stack usage.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Maximum number of characters (sign included) in an integer literal.
pub const MAX_NUMBER_LEN: u32 = 19;

// ============================================================================
// Node pool sizing
// ============================================================================

/// Accounting size of one pool slot in bytes (packed header, payload, next link).
///
/// Pool-owned string bytes are charged against the slot budget at this rate.
pub const SLOT_BYTES: usize = 12;

/// Expected input bytes per decoded node, used to guess an initial pool size.
pub const NODE_GUESS_RATIO: usize = 6;

// ============================================================================
// CLI
// ============================================================================

/// Environment variable consulted for the log filter before `RUST_LOG`.
pub const LOG_ENV: &str = "BENTREE_LOG";
