use super::document::Document;
use super::error::BencodeError;
use super::node::{ByteRef, Node, NodeRef};
use super::packed::WidthProfile;
use super::pool::Pool;
use crate::constants::{DEFAULT_MAX_DEPTH, MAX_NUMBER_LEN};

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Containers may nest up to `max_depth - 1` levels.
    pub max_depth: u32,
    /// Width profile of the pool created by [`decode_with`].
    pub profile: WidthProfile,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            profile: WidthProfile::default(),
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_profile(mut self, profile: WidthProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Decodes a complete bencode buffer into a fresh self-owned pool.
///
/// # Errors
///
/// Fails with a [`MalformedInput`](super::ErrorKind::MalformedInput) error on any
/// grammar or limit violation and with
/// [`OutOfMemory`](super::ErrorKind::OutOfMemory) if the pool cannot grow.
///
/// # Examples
///
/// ```
/// use bentree::bencode::decode;
///
/// let doc = decode(b"l4:spam4:eggse").unwrap();
/// let root = doc.root().unwrap();
/// assert_eq!(doc.count(root), Some(2));
///
/// assert!(decode(b"i01e").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Document<'_>, BencodeError> {
    decode_with(data, DecodeOptions::default())
}

/// Like [`decode`], with explicit options.
pub fn decode_with(data: &[u8], options: DecodeOptions) -> Result<Document<'_>, BencodeError> {
    let pool = Pool::for_input(data.len())?.with_profile(options.profile)?;
    Document::decode_into(data, pool, options)
}

impl<'a> Document<'a> {
    /// Decodes `input` into `pool`, using the pool's own width profile.
    ///
    /// On failure the pool is dropped along with whatever was decoded so far.
    pub fn decode_into(
        input: &'a [u8],
        pool: Pool<'a>,
        options: DecodeOptions,
    ) -> Result<Self, BencodeError> {
        let mut decoder = Decoder {
            input,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
            pool,
        };

        match decoder.document() {
            Ok(root) => {
                tracing::debug!(
                    "Decoded {} bytes into {} nodes, root {}",
                    input.len(),
                    decoder.pool.len(),
                    root
                );
                Ok(Document::from_parts(input, decoder.pool, root))
            }
            Err(e) => {
                tracing::debug!("Decode failed: {}", e);
                Err(e)
            }
        }
    }
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    depth: u32,
    max_depth: u32,
    pool: Pool<'a>,
}

impl Decoder<'_> {
    /// `Value+`, consuming the whole buffer. The last value is the root.
    fn document(&mut self) -> Result<NodeRef, BencodeError> {
        let max = self.pool.profile().max_input_len();
        if self.input.len() as u64 > max {
            return Err(BencodeError::InputTooLarge {
                len: self.input.len(),
                max,
            });
        }
        if self.input.is_empty() {
            return Err(BencodeError::EmptyInput);
        }

        let mut root = self.value()?;
        while let Some(&byte) = self.input.get(self.pos) {
            if !matches!(byte, b'0'..=b'9' | b'i' | b'l' | b'd') {
                return Err(BencodeError::TrailingData(self.pos));
            }
            root = self.value()?;
        }

        debug_assert_eq!(root.0 + 1, self.pool.len());
        Ok(root)
    }

    fn peek(&self) -> Result<u8, BencodeError> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::UnexpectedEof(self.pos))
    }

    fn bump(&mut self) -> Result<u8, BencodeError> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn value(&mut self) -> Result<NodeRef, BencodeError> {
        match self.peek()? {
            b'0'..=b'9' => self.string(),
            b'i' => self.number(),
            b'l' => self.list(),
            b'd' => self.dictionary(),
            c => Err(BencodeError::UnexpectedChar {
                byte: c as char,
                offset: self.pos,
            }),
        }
    }

    fn string(&mut self) -> Result<NodeRef, BencodeError> {
        let start = self.pos;
        let len = self.string_length()?;

        let max = self.pool.profile().max_string_len();
        if len > max as usize {
            return Err(BencodeError::StringTooLong {
                len,
                max,
                offset: start,
            });
        }

        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(BencodeError::UnexpectedEof(self.input.len()))?;

        let bytes = ByteRef::Borrowed {
            offset: self.pos as u32,
            len: len as u32,
        };
        self.pos = end;
        self.pool.push(Node::String(bytes))
    }

    /// `"0:"` or a decimal length without leading zeros, followed by `:`.
    fn string_length(&mut self) -> Result<usize, BencodeError> {
        let start = self.pos;
        let len = match self.bump()? {
            b'0' => 0,
            c @ b'1'..=b'9' => {
                let mut len = (c - b'0') as usize;
                while let Some(&d @ b'0'..=b'9') = self.input.get(self.pos) {
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add((d - b'0') as usize))
                        .ok_or(BencodeError::InvalidStringLength(start))?;
                    self.pos += 1;
                }
                len
            }
            _ => return Err(BencodeError::InvalidStringLength(start)),
        };

        match self.bump()? {
            b':' => Ok(len),
            _ => Err(BencodeError::InvalidStringLength(start)),
        }
    }

    /// `i`, optional `-`, then `0` or digits without a leading zero, then `e`.
    /// Only the delimiting is validated; the digits are kept as text.
    fn number(&mut self) -> Result<NodeRef, BencodeError> {
        let start = self.pos;
        self.pos += 1;

        let digits = self.pos;
        if self.input.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }

        match self.bump()? {
            b'0' => {}
            b'1'..=b'9' => {
                while matches!(self.input.get(self.pos), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            _ => return Err(BencodeError::InvalidInteger(start)),
        }

        if self.bump()? != b'e' {
            return Err(BencodeError::InvalidInteger(start));
        }

        let len = self.pos - 1 - digits;
        if len > MAX_NUMBER_LEN as usize {
            return Err(BencodeError::NumberTooLong(start));
        }

        self.pool.push(Node::Number(ByteRef::Borrowed {
            offset: digits as u32,
            len: len as u32,
        }))
    }

    /// Checks the nesting limit before a container's opening delimiter is consumed.
    fn enter(&mut self) -> Result<(), BencodeError> {
        self.depth += 1;
        if self.depth >= self.max_depth {
            return Err(BencodeError::NestingTooDeep(self.pos));
        }
        self.pos += 1;
        Ok(())
    }

    /// Consumes the closing `e` if it is next.
    fn at_end(&mut self) -> Result<bool, BencodeError> {
        if self.peek()? == b'e' {
            self.pos += 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn list(&mut self) -> Result<NodeRef, BencodeError> {
        let start = self.pos;
        self.enter()?;

        let mut chain = Chain::new(self.pool.profile().max_count(), start);
        while !self.at_end()? {
            let value = self.value()?;
            chain.link(&mut self.pool, value)?;
        }

        self.depth -= 1;
        self.pool.push(Node::List {
            count: chain.count,
            first_child: chain.first,
        })
    }

    fn dictionary(&mut self) -> Result<NodeRef, BencodeError> {
        let start = self.pos;
        self.enter()?;

        let mut chain = Chain::new(self.pool.profile().max_count(), start);
        while !self.at_end()? {
            let key = match self.peek()? {
                b'0'..=b'9' => self.string()?,
                c => {
                    return Err(BencodeError::UnexpectedChar {
                        byte: c as char,
                        offset: self.pos,
                    })
                }
            };
            chain.link(&mut self.pool, key)?;

            let value = self.value()?;
            chain.link(&mut self.pool, value)?;
        }

        self.depth -= 1;
        self.pool.push(Node::Dictionary {
            count: chain.count,
            first_child: chain.first,
        })
    }
}

/// Children of a container being decoded, linked as they complete.
struct Chain {
    first: Option<NodeRef>,
    last: Option<NodeRef>,
    count: u32,
    max: u32,
    offset: usize,
}

impl Chain {
    fn new(max: u32, offset: usize) -> Self {
        Chain {
            first: None,
            last: None,
            count: 0,
            max,
            offset,
        }
    }

    fn link(&mut self, pool: &mut Pool<'_>, node: NodeRef) -> Result<(), BencodeError> {
        if self.count >= self.max {
            return Err(BencodeError::TooManyEntries {
                max: self.max,
                offset: self.offset,
            });
        }
        match self.last {
            Some(last) => pool.set_next(last, Some(node))?,
            None => self.first = Some(node),
        }
        self.last = Some(node);
        self.count += 1;
        Ok(())
    }
}
