use std::fmt;

use super::document::Document;
use super::error::BencodeError;
use super::node::NodeRef;

/// One step of a parsed query path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'p> {
    /// Dictionary key, compared byte for byte.
    Key(&'p [u8]),
    /// Zero-based list index.
    Index(u32),
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "key {:?}", String::from_utf8_lossy(key)),
            Segment::Index(index) => write!(f, "index [{index}]"),
        }
    }
}

fn malformed(path: &str, reason: impl fmt::Display) -> BencodeError {
    BencodeError::QueryMalformed(format!("{reason} in {path:?}"))
}

/// Splits `path` into segments without touching any tree.
///
/// Grammar: `Segment ("." Segment | "[" Digits "]")*`, where a segment is a
/// non-empty run of characters other than `.`, `[` and `]`. The path may also
/// start with an index.
fn parse_path(path: &str) -> Result<Vec<Segment<'_>>, BencodeError> {
    let bytes = path.as_bytes();
    if bytes.is_empty() {
        return Err(malformed(path, "empty path"));
    }

    let mut segments = Vec::new();
    let mut pos = 0;
    let mut expect_key = bytes[0] != b'[';

    while expect_key || pos < bytes.len() {
        if expect_key {
            let end = bytes[pos..]
                .iter()
                .position(|b| matches!(b, b'.' | b'[' | b']'))
                .map_or(bytes.len(), |n| pos + n);
            if end == pos {
                return Err(malformed(path, format_args!("empty key at byte {pos}")));
            }
            segments.push(Segment::Key(&bytes[pos..end]));
            pos = end;
            expect_key = false;
            continue;
        }

        match bytes[pos] {
            b'[' => {
                let (index, end) = parse_index(bytes, pos)
                    .ok_or_else(|| malformed(path, format_args!("bad index at byte {pos}")))?;
                segments.push(Segment::Index(index));
                pos = end;
            }
            b'.' => {
                pos += 1;
                expect_key = true;
            }
            _ => return Err(malformed(path, format_args!("unexpected ']' at byte {pos}"))),
        }
    }

    Ok(segments)
}

/// Parses `[N]` at `pos`, where `N` is `0` or digits without a leading zero.
fn parse_index(bytes: &[u8], pos: usize) -> Option<(u32, usize)> {
    let mut pos = pos + 1;
    let index: u32 = match *bytes.get(pos)? {
        b'0' => {
            pos += 1;
            0
        }
        d @ b'1'..=b'9' => {
            pos += 1;
            let mut index = u32::from(d - b'0');
            while let Some(&d @ b'0'..=b'9') = bytes.get(pos) {
                index = index.checked_mul(10)?.checked_add(u32::from(d - b'0'))?;
                pos += 1;
            }
            index
        }
        _ => return None,
    };
    if *bytes.get(pos)? != b']' {
        return None;
    }
    Some((index, pos + 1))
}

/// Evaluates `path` starting at `start`.
///
/// Key segments need a dictionary and take the first entry whose key matches;
/// index segments need a list. Any miss aborts the whole query.
///
/// # Errors
///
/// - [`BencodeError::QueryMalformed`] if the path does not parse; the tree is
///   not visited at all.
/// - [`BencodeError::NotFound`] if a key is absent, an index is out of range or
///   a node has the wrong type for its segment.
///
/// # Examples
///
/// ```
/// use bentree::bencode::{decode, query, ErrorKind};
///
/// let doc = decode(b"d5:itemsld4:name3:fooed4:name3:baree4:name3:bobe").unwrap();
/// let root = doc.root().unwrap();
///
/// let name = query(&doc, root, "items[1].name").unwrap();
/// assert_eq!(doc.as_str(name), Some("bar"));
///
/// let err = query(&doc, root, "missing").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
pub fn query(doc: &Document<'_>, start: NodeRef, path: &str) -> Result<NodeRef, BencodeError> {
    let segments = parse_path(path)?;
    doc.node(start)?;

    segments.iter().try_fold(start, |node, segment| {
        let found = match *segment {
            Segment::Key(key) => doc.dict_get(node, key),
            Segment::Index(index) => doc.list_get(node, index),
        };
        found.ok_or_else(|| BencodeError::NotFound(format!("{segment} in {path:?}")))
    })
}

impl Document<'_> {
    /// Evaluates `path` starting at `start`. See [`query`].
    pub fn query(&self, start: NodeRef, path: &str) -> Result<NodeRef, BencodeError> {
        query(self, start, path)
    }

    /// Evaluates `path` from the root.
    pub fn get(&self, path: &str) -> Result<NodeRef, BencodeError> {
        let root = self
            .root()
            .ok_or_else(|| BencodeError::NotFound("document has no root".to_string()))?;
        query(self, root, path)
    }
}
