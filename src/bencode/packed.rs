//! Bit-packed node headers.
//!
//! Every pool slot stores its type tag and its length (or entry count) in a
//! single integer. The top two bits hold the [`Tag`]; for strings and numbers
//! the next bit says whether the bytes live in the input buffer or in the
//! pool's own storage, and the remaining bits hold the length.
//!
//! | Profile | Header bits | Len bits | Max count | Max string | Max slots / input |
//! |---------|-------------|----------|-----------|------------|-------------------|
//! | `Narrow` | 8 | 6 | 63 | 31 | 255 |
//! | `Compact` | 16 | 14 | 16383 | 8191 | 65535 |
//! | `Standard` | 32 | 30 | 2^30-1 | 2^29-1 | 2^32-1 |

/// Integer width used for headers, offsets and pool indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthProfile {
    /// 8-bit layout for tiny documents.
    Narrow,
    /// 16-bit layout.
    Compact,
    /// 32-bit layout.
    #[default]
    Standard,
}

impl WidthProfile {
    const TAG_BITS: u32 = 2;

    /// Total header width in bits.
    pub const fn header_bits(self) -> u32 {
        match self {
            WidthProfile::Narrow => 8,
            WidthProfile::Compact => 16,
            WidthProfile::Standard => 32,
        }
    }

    /// Bits available for a length or count.
    pub const fn len_bits(self) -> u32 {
        self.header_bits() - Self::TAG_BITS
    }

    /// Maximum entry count of a list or dictionary (keys and values both count).
    pub const fn max_count(self) -> u32 {
        (1 << self.len_bits()) - 1
    }

    /// Maximum string or number length; one length bit is taken by the owned flag.
    pub const fn max_string_len(self) -> u32 {
        (1 << (self.len_bits() - 1)) - 1
    }

    /// Maximum number of slots a pool may hold.
    pub const fn max_slots(self) -> u32 {
        match self {
            WidthProfile::Narrow => u8::MAX as u32,
            WidthProfile::Compact => u16::MAX as u32,
            WidthProfile::Standard => u32::MAX,
        }
    }

    /// Maximum input buffer length in bytes.
    pub const fn max_input_len(self) -> u64 {
        self.max_slots() as u64
    }
}

impl std::str::FromStr for WidthProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "narrow" | "8" => Ok(WidthProfile::Narrow),
            "compact" | "16" => Ok(WidthProfile::Compact),
            "standard" | "32" => Ok(WidthProfile::Standard),
            other => Err(format!("unknown width profile: {other}")),
        }
    }
}

/// Node type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Dictionary = 0,
    List = 1,
    String = 2,
    Number = 3,
}

impl Tag {
    fn from_bits(bits: u32) -> Tag {
        match bits & 0b11 {
            0 => Tag::Dictionary,
            1 => Tag::List,
            2 => Tag::String,
            _ => Tag::Number,
        }
    }

    /// Whether this tag carries a byte reference rather than a child chain.
    pub fn is_scalar(self) -> bool {
        matches!(self, Tag::String | Tag::Number)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Dictionary => "dictionary",
            Tag::List => "list",
            Tag::String => "string",
            Tag::Number => "number",
        }
    }
}

/// Unpacked form of a slot header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub tag: Tag,
    pub owned: bool,
    pub len: u32,
}

impl Header {
    /// Packs the header for `profile`.
    ///
    /// `len` must already be within the profile's limit for the tag; the
    /// decoder and the construction API check this before building a slot.
    pub fn pack(self, profile: WidthProfile) -> u32 {
        let len_bits = profile.len_bits();
        let mut raw = (self.tag as u32) << len_bits;
        if self.tag.is_scalar() {
            debug_assert!(self.len <= profile.max_string_len());
            raw |= (self.owned as u32) << (len_bits - 1);
            raw |= self.len & profile.max_string_len();
        } else {
            debug_assert!(self.len <= profile.max_count());
            raw |= self.len & profile.max_count();
        }
        raw
    }

    pub fn unpack(raw: u32, profile: WidthProfile) -> Header {
        let len_bits = profile.len_bits();
        let tag = Tag::from_bits(raw >> len_bits);
        if tag.is_scalar() {
            Header {
                tag,
                owned: (raw >> (len_bits - 1)) & 1 == 1,
                len: raw & profile.max_string_len(),
            }
        } else {
            Header {
                tag,
                owned: false,
                len: raw & profile.max_count(),
            }
        }
    }
}
