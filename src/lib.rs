//! bentree - A bencode decoder and in-memory DOM
//!
//! This library parses complete bencode buffers into a compact tree of
//! index-linked nodes held in a single arena, then supports path queries,
//! in-place updates and construction of new nodes in the same arena.
//!
//! # Modules
//!
//! - [`bencode`] - Node pool, decoder, query engine, construction API and encoder
//! - [`constants`] - Format limits and tuning defaults

pub mod bencode;
pub mod constants;

pub use bencode::{
    decode, decode_with, encode, query, BencodeError, DecodeOptions, Document, ErrorKind, Format,
    Node, NodeRef, Pool, WidthProfile,
};
