//! Bencode decoding into an arena-backed DOM ([BEP-3]).
//!
//! A bencode buffer is parsed into a compact tree of fixed-size nodes that
//! live in a single [`Pool`]. Nodes are addressed by [`NodeRef`] indices, and
//! string and number nodes point back into the input buffer instead of
//! copying it, so decoding performs no per-node heap allocation.
//!
//! # Data Types
//!
//! | Type | Format | Example | Node |
//! |------|--------|---------|------|
//! | Integer | `i<number>e` | `i42e` | [`Node::Number`] holding the text `42` |
//! | Byte String | `<length>:<data>` | `4:spam` | [`Node::String`] |
//! | List | `l<items>e` | `l4:spami42ee` | [`Node::List`] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` | [`Node::Dictionary`] |
//!
//! Integers are never converted to a numeric type; their digits are kept as
//! text. Dictionary keys are kept in input order and are neither sorted nor
//! checked for duplicates; lookups return the first match.
//!
//! # Examples
//!
//! ## Decoding and querying
//!
//! ```
//! use bentree::bencode::{decode, Node};
//!
//! let doc = decode(b"d4:name3:bob5:itemsli1ei2eee").unwrap();
//!
//! let name = doc.get("name").unwrap();
//! assert_eq!(doc.as_str(name), Some("bob"));
//!
//! let second = doc.get("items[1]").unwrap();
//! assert!(matches!(doc.node(second).unwrap(), Node::Number(_)));
//! assert_eq!(doc.as_bytes(second), Some(b"2".as_slice()));
//! ```
//!
//! ## Decoding into caller-owned storage
//!
//! ```
//! use bentree::bencode::{DecodeOptions, Document, ErrorKind, Pool, Slot};
//!
//! let mut slots = [Slot::EMPTY; 3];
//! let pool = Pool::fixed(&mut slots);
//! let doc = Document::decode_into(b"l4:spam4:eggse", pool, DecodeOptions::default()).unwrap();
//! assert_eq!(doc.pool().len(), 3);
//!
//! let mut slots = [Slot::EMPTY; 2];
//! let pool = Pool::fixed(&mut slots);
//! let err = Document::decode_into(b"l4:spam4:eggse", pool, DecodeOptions::default()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::OutOfCapacity);
//! ```
//!
//! ## Building and editing
//!
//! ```
//! use bentree::bencode::{Document, Format, Pool};
//!
//! let mut doc = Document::new(Pool::growable(8).unwrap());
//! let key = doc.new_string(b"spam").unwrap();
//! let a = doc.new_string(b"a").unwrap();
//! let list = doc.new_list(&[a]).unwrap();
//! let dict = doc.new_dict(&[(key, list)]).unwrap();
//!
//! let b = doc.new_number(7).unwrap();
//! doc.list_push(list, b).unwrap();
//!
//! assert_eq!(doc.to_vec(dict, Format::Bencode).unwrap(), b"d4:spaml1:ai7eee");
//! ```
//!
//! # Error Handling
//!
//! Every failure is a [`BencodeError`]; [`BencodeError::kind`] sorts them into:
//!
//! - [`ErrorKind::MalformedInput`] - Grammar violation, nesting or size limit exceeded
//! - [`ErrorKind::OutOfCapacity`] - A fixed pool ran out of slots
//! - [`ErrorKind::OutOfMemory`] - A growable pool could not grow
//! - [`ErrorKind::NotFound`] - A query missed
//! - [`ErrorKind::QueryMalformed`] - A query path did not parse
//! - [`ErrorKind::InvalidOperation`] - The construction API was misused
//!
//! A failed decode drops the pool it was filling; a failed query leaves the
//! tree untouched.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod document;
mod encode;
mod error;
mod modify;
mod node;
mod packed;
mod pool;
mod query;

pub use decode::{decode, decode_with, DecodeOptions};
pub use document::{Children, Document, Entries};
pub use encode::{encode, encode_into, encoded_len, Format};
pub use error::{BencodeError, ErrorKind};
pub use node::{ByteRef, Node, NodeRef};
pub use packed::{Header, Tag, WidthProfile};
pub use pool::{Pool, Slot};
pub use query::query;

#[cfg(test)]
mod tests;
