use std::fmt;

use super::packed::Tag;

/// Index of a node in its [`Pool`](super::Pool).
///
/// Node identity is always an offset, never an address: the pool may move its
/// storage when it grows, but a `NodeRef` stays valid for the pool's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(pub(crate) u32);

impl NodeRef {
    /// Sentinel for "no sibling" and "no child".
    pub(crate) const NONE: u32 = u32::MAX;

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_raw(raw: u32) -> Option<NodeRef> {
        (raw != Self::NONE).then_some(NodeRef(raw))
    }

    pub(crate) fn raw(link: Option<NodeRef>) -> u32 {
        link.map_or(Self::NONE, |r| r.0)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Location of the bytes of a string or number node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRef {
    /// Bytes inside the caller's input buffer.
    Borrowed { offset: u32, len: u32 },
    /// Bytes copied into the pool's own storage by the construction API.
    Owned { offset: u32, len: u32 },
}

impl ByteRef {
    pub fn len(&self) -> u32 {
        match *self {
            ByteRef::Borrowed { len, .. } | ByteRef::Owned { len, .. } => len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, ByteRef::Owned { .. })
    }
}

/// A decoded or constructed value, unpacked from its pool slot.
///
/// Dictionary children alternate key, value, key, value along one sibling
/// chain, so `count` is always even for a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Dictionary {
        count: u32,
        first_child: Option<NodeRef>,
    },
    List {
        count: u32,
        first_child: Option<NodeRef>,
    },
    String(ByteRef),
    /// The literal digits of an integer with optional leading `-`, never evaluated.
    Number(ByteRef),
}

impl Node {
    pub fn tag(&self) -> Tag {
        match self {
            Node::Dictionary { .. } => Tag::Dictionary,
            Node::List { .. } => Tag::List,
            Node::String(_) => Tag::String,
            Node::Number(_) => Tag::Number,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    /// Entry count for containers, byte length for strings and numbers.
    pub fn len(&self) -> u32 {
        match self {
            Node::Dictionary { count, .. } | Node::List { count, .. } => *count,
            Node::String(bytes) | Node::Number(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first_child(&self) -> Option<NodeRef> {
        match self {
            Node::Dictionary { first_child, .. } | Node::List { first_child, .. } => *first_child,
            _ => None,
        }
    }

    pub fn byte_ref(&self) -> Option<ByteRef> {
        match self {
            Node::String(bytes) | Node::Number(bytes) => Some(*bytes),
            _ => None,
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Node::Dictionary { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List { .. })
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }
}
