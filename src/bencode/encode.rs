use std::io::{self, Write};

use super::document::Document;
use super::error::BencodeError;
use super::node::{Node, NodeRef};

/// Output format of the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Bencode, reproducing decoded input byte for byte.
    #[default]
    Bencode,
    /// Compact JSON-like text.
    Json,
    /// JSON-like text indented by two spaces.
    JsonPretty,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bencode" => Ok(Format::Bencode),
            "json" => Ok(Format::Json),
            "json-pretty" => Ok(Format::JsonPretty),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Encodes the subtree at `node` to a byte vector.
///
/// Dictionary entries and list elements are written in stored order; nothing is
/// sorted, so decoding then encoding reproduces the input.
///
/// In the JSON forms strings are quoted with `"`, `\` and control bytes
/// escaped; all other bytes are copied as they are. Numbers are copied verbatim.
///
/// # Examples
///
/// ```
/// use bentree::bencode::{decode, encode, Format};
///
/// let doc = decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
/// let root = doc.root().unwrap();
///
/// assert_eq!(encode(&doc, root, Format::Bencode).unwrap(), b"d3:cow3:moo4:spaml1:a1:bee");
/// assert_eq!(
///     encode(&doc, root, Format::Json).unwrap(),
///     br#"{"cow":"moo","spam":["a","b"]}"#
/// );
/// ```
pub fn encode(doc: &Document<'_>, node: NodeRef, format: Format) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::with_capacity(encoded_len(doc, node, format)?);
    encode_value(doc, node, format, &mut buf)?;
    Ok(buf)
}

/// Measures the encoded size of the subtree at `node` without writing anything.
pub fn encoded_len(doc: &Document<'_>, node: NodeRef, format: Format) -> Result<usize, BencodeError> {
    encode_into(doc, node, format, &mut [])
}

/// Writes as much of the encoding as fits into `buf`.
///
/// Returns the full encoded size, which is larger than `buf.len()` when the
/// output was truncated. Callers can size a buffer with one call and fill it
/// with a second.
///
/// ```
/// use bentree::bencode::{decode, encode_into, Format};
///
/// let doc = decode(b"l4:spam4:eggse").unwrap();
/// let root = doc.root().unwrap();
///
/// let mut small = [0u8; 4];
/// let needed = encode_into(&doc, root, Format::Bencode, &mut small).unwrap();
/// assert_eq!(needed, 14);
/// assert_eq!(&small, b"l4:s");
///
/// let mut buf = vec![0u8; needed];
/// encode_into(&doc, root, Format::Bencode, &mut buf).unwrap();
/// assert_eq!(buf, b"l4:spam4:eggse");
/// ```
pub fn encode_into(
    doc: &Document<'_>,
    node: NodeRef,
    format: Format,
    buf: &mut [u8],
) -> Result<usize, BencodeError> {
    let mut sink = Bounded { buf, total: 0 };
    encode_value(doc, node, format, &mut sink)?;
    Ok(sink.total)
}

impl Document<'_> {
    /// Encodes the subtree at `node`. See [`encode`].
    pub fn to_vec(&self, node: NodeRef, format: Format) -> Result<Vec<u8>, BencodeError> {
        encode(self, node, format)
    }

    /// Writes the subtree at `node` to `writer`.
    pub fn write_to<W: Write>(
        &self,
        node: NodeRef,
        format: Format,
        writer: &mut W,
    ) -> Result<(), BencodeError> {
        encode_value(self, node, format, writer)
    }
}

/// Sink that keeps the first `buf.len()` bytes and counts the rest.
struct Bounded<'b> {
    buf: &'b mut [u8],
    total: usize,
}

impl Write for Bounded<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Some(room) = self.buf.get_mut(self.total..) {
            let n = room.len().min(data.len());
            room[..n].copy_from_slice(&data[..n]);
        }
        self.total += data.len();
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn encode_value<W: Write>(
    doc: &Document<'_>,
    node: NodeRef,
    format: Format,
    writer: &mut W,
) -> Result<(), BencodeError> {
    match format {
        Format::Bencode => encode_bencode(doc, node, writer),
        Format::Json => encode_json(doc, node, None, writer),
        Format::JsonPretty => encode_json(doc, node, Some(0), writer),
    }
}

fn encode_bencode<W: Write>(
    doc: &Document<'_>,
    node: NodeRef,
    writer: &mut W,
) -> Result<(), BencodeError> {
    match doc.node(node)? {
        Node::String(bytes) => {
            write!(writer, "{}:", bytes.len())?;
            writer.write_all(doc.bytes(bytes))?;
        }
        Node::Number(bytes) => {
            writer.write_all(b"i")?;
            writer.write_all(doc.bytes(bytes))?;
            writer.write_all(b"e")?;
        }
        Node::List { .. } => {
            writer.write_all(b"l")?;
            for child in doc.children(node) {
                encode_bencode(doc, child, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Node::Dictionary { .. } => {
            writer.write_all(b"d")?;
            for child in doc.children(node) {
                encode_bencode(doc, child, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

/// `indent` is the current depth for pretty output, `None` for compact output.
fn encode_json<W: Write>(
    doc: &Document<'_>,
    node: NodeRef,
    indent: Option<usize>,
    writer: &mut W,
) -> Result<(), BencodeError> {
    let inner = indent.map(|depth| depth + 1);
    match doc.node(node)? {
        Node::String(bytes) => write_json_string(doc.bytes(bytes), writer)?,
        Node::Number(bytes) => writer.write_all(doc.bytes(bytes))?,
        Node::List { count, .. } => {
            writer.write_all(b"[")?;
            for (i, child) in doc.children(node).enumerate() {
                if i > 0 {
                    writer.write_all(b",")?;
                }
                newline(inner, writer)?;
                encode_json(doc, child, inner, writer)?;
            }
            if count > 0 {
                newline(indent, writer)?;
            }
            writer.write_all(b"]")?;
        }
        Node::Dictionary { count, .. } => {
            writer.write_all(b"{")?;
            for (i, (key, value)) in doc.entries(node).enumerate() {
                if i > 0 {
                    writer.write_all(b",")?;
                }
                newline(inner, writer)?;
                encode_json(doc, key, inner, writer)?;
                let colon: &[u8] = if indent.is_some() { b": " } else { b":" };
                writer.write_all(colon)?;
                encode_json(doc, value, inner, writer)?;
            }
            if count > 0 {
                newline(indent, writer)?;
            }
            writer.write_all(b"}")?;
        }
    }
    Ok(())
}

fn newline<W: Write>(indent: Option<usize>, writer: &mut W) -> io::Result<()> {
    if let Some(depth) = indent {
        writer.write_all(b"\n")?;
        for _ in 0..depth {
            writer.write_all(b"  ")?;
        }
    }
    Ok(())
}

fn write_json_string<W: Write>(bytes: &[u8], writer: &mut W) -> io::Result<()> {
    writer.write_all(b"\"")?;
    for &b in bytes {
        match b {
            b'"' => writer.write_all(b"\\\"")?,
            b'\\' => writer.write_all(b"\\\\")?,
            b'\n' => writer.write_all(b"\\n")?,
            b'\r' => writer.write_all(b"\\r")?,
            b'\t' => writer.write_all(b"\\t")?,
            0x00..=0x1f => write!(writer, "\\u{:04x}", b)?,
            _ => writer.write_all(&[b])?,
        }
    }
    writer.write_all(b"\"")
}
