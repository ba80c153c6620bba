use super::error::BencodeError;
use super::node::{ByteRef, Node, NodeRef};
use super::pool::Pool;

/// A tree of bencode nodes living in one [`Pool`].
///
/// String and number nodes produced by the decoder borrow their bytes from the
/// input buffer, which therefore has to outlive the document. Nodes created
/// through the construction API own their bytes inside the pool.
///
/// # Examples
///
/// ```
/// use bentree::bencode::decode;
///
/// let doc = decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
/// let root = doc.root().unwrap();
///
/// let moo = doc.dict_get(root, b"cow").unwrap();
/// assert_eq!(doc.as_str(moo), Some("moo"));
///
/// let spam = doc.dict_get(root, b"spam").unwrap();
/// let second = doc.list_get(spam, 1).unwrap();
/// assert_eq!(doc.as_bytes(second), Some(b"b".as_slice()));
/// ```
#[derive(Debug)]
pub struct Document<'a> {
    input: &'a [u8],
    pool: Pool<'a>,
    root: Option<NodeRef>,
}

impl<'a> Document<'a> {
    /// Creates an empty document for building a tree from scratch.
    pub fn new(pool: Pool<'a>) -> Self {
        Document {
            input: &[],
            pool,
            root: None,
        }
    }

    pub(crate) fn from_parts(input: &'a [u8], pool: Pool<'a>, root: NodeRef) -> Self {
        Document {
            input,
            pool,
            root: Some(root),
        }
    }

    /// The root node. Always set for a decoded document.
    pub fn root(&self) -> Option<NodeRef> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeRef) -> Result<(), BencodeError> {
        if !self.pool.contains(root) {
            return Err(BencodeError::InvalidNodeRef(root));
        }
        self.root = Some(root);
        Ok(())
    }

    /// The buffer the document was decoded from.
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn pool(&self) -> &Pool<'a> {
        &self.pool
    }

    pub(crate) fn pool_mut(&mut self) -> &mut Pool<'a> {
        &mut self.pool
    }

    /// Releases the tree and hands back the pool.
    pub fn into_pool(self) -> Pool<'a> {
        self.pool
    }

    pub fn node(&self, r: NodeRef) -> Result<Node, BencodeError> {
        self.pool.node(r).ok_or(BencodeError::InvalidNodeRef(r))
    }

    pub fn next(&self, r: NodeRef) -> Option<NodeRef> {
        self.pool.next(r)
    }

    /// Resolves a byte reference against the input buffer or the pool.
    pub fn bytes(&self, bytes: ByteRef) -> &[u8] {
        match bytes {
            ByteRef::Borrowed { offset, len } => {
                let start = offset as usize;
                self.input
                    .get(start..start + len as usize)
                    .unwrap_or_default()
            }
            ByteRef::Owned { offset, len } => self.pool.owned_bytes(offset, len),
        }
    }

    /// Raw bytes of a string node, or the literal digits of a number node.
    pub fn as_bytes(&self, r: NodeRef) -> Option<&[u8]> {
        let bytes = self.pool.node(r)?.byte_ref()?;
        Some(self.bytes(bytes))
    }

    /// The string node's bytes as UTF-8, if they are valid UTF-8.
    pub fn as_str(&self, r: NodeRef) -> Option<&str> {
        match self.pool.node(r)? {
            Node::String(bytes) => std::str::from_utf8(self.bytes(bytes)).ok(),
            _ => None,
        }
    }

    /// Entry count of a list or dictionary (a dictionary counts keys and values).
    pub fn count(&self, r: NodeRef) -> Option<u32> {
        match self.pool.node(r)? {
            Node::Dictionary { count, .. } | Node::List { count, .. } => Some(count),
            _ => None,
        }
    }

    /// Iterates the sibling chain below `r`. Dictionaries yield keys and values alternately.
    pub fn children(&self, r: NodeRef) -> Children<'_, 'a> {
        Children {
            doc: self,
            next: self.pool.node(r).and_then(|node| node.first_child()),
        }
    }

    /// Iterates the `(key, value)` pairs of a dictionary in stored order.
    pub fn entries(&self, r: NodeRef) -> Entries<'_, 'a> {
        let chain = match self.pool.node(r) {
            Some(Node::Dictionary { first_child, .. }) => first_child,
            _ => None,
        };
        Entries {
            inner: Children {
                doc: self,
                next: chain,
            },
        }
    }

    /// The `index`-th element of a list.
    pub fn list_get(&self, list: NodeRef, index: u32) -> Option<NodeRef> {
        match self.pool.node(list)? {
            Node::List { count, .. } if index < count => {
                self.children(list).nth(index as usize)
            }
            _ => None,
        }
    }

    /// Value of the first entry of a dictionary whose key equals `key`.
    pub fn dict_get(&self, dict: NodeRef, key: &[u8]) -> Option<NodeRef> {
        self.entries(dict)
            .find(|&(k, _)| self.as_bytes(k) == Some(key))
            .map(|(_, v)| v)
    }
}

/// Iterator over a sibling chain, see [`Document::children`].
#[derive(Debug, Clone)]
pub struct Children<'d, 'a> {
    doc: &'d Document<'a>,
    next: Option<NodeRef>,
}

impl Iterator for Children<'_, '_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let current = self.next?;
        self.next = self.doc.pool.next(current);
        Some(current)
    }
}

/// Iterator over dictionary entries, see [`Document::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'d, 'a> {
    inner: Children<'d, 'a>,
}

impl Iterator for Entries<'_, '_> {
    type Item = (NodeRef, NodeRef);

    fn next(&mut self) -> Option<(NodeRef, NodeRef)> {
        let key = self.inner.next()?;
        let value = self.inner.next()?;
        Some((key, value))
    }
}
