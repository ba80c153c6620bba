//! Building and editing trees in place.
//!
//! New nodes are allocated from the document's own pool, next to any decoded
//! nodes. Composite constructors link the given nodes into a fresh sibling
//! chain, so a node handed to them must not already sit in a container. Such
//! nodes are refused with [`BencodeError::AlreadyLinked`]; the check scans the
//! whole pool.

use std::collections::HashSet;

use super::document::Document;
use super::error::BencodeError;
use super::node::{Node, NodeRef};
use crate::constants::MAX_NUMBER_LEN;

impl Document<'_> {
    /// Copies `bytes` into the pool and returns a new string node owning them.
    ///
    /// # Examples
    ///
    /// ```
    /// use bentree::bencode::{decode, Format};
    ///
    /// let input = b"d9:publisher3:bob17:publisher-webpage15:www.example.come";
    /// let mut doc = decode(input).unwrap();
    ///
    /// let webpage = doc.get("publisher-webpage").unwrap();
    /// let replacement = doc.new_string(b"mywebpage").unwrap();
    /// doc.update(webpage, replacement).unwrap();
    ///
    /// let root = doc.root().unwrap();
    /// assert_eq!(
    ///     doc.to_vec(root, Format::Bencode).unwrap(),
    ///     b"d9:publisher3:bob17:publisher-webpage9:mywebpagee"
    /// );
    /// ```
    pub fn new_string(&mut self, bytes: &[u8]) -> Result<NodeRef, BencodeError> {
        let max = self.pool().profile().max_string_len();
        if bytes.len() > max as usize {
            return Err(BencodeError::ValueTooLong {
                len: bytes.len(),
                max,
            });
        }
        let pool = self.pool_mut();
        let owned = pool.store_bytes(bytes)?;
        pool.push(Node::String(owned))
    }

    /// Creates a number node holding the decimal text of `value`.
    ///
    /// `i64::MIN` needs 20 characters and is rejected like it would be by the decoder.
    pub fn new_number(&mut self, value: i64) -> Result<NodeRef, BencodeError> {
        let text = value.to_string();
        if text.len() > MAX_NUMBER_LEN as usize {
            return Err(BencodeError::ValueTooLong {
                len: text.len(),
                max: MAX_NUMBER_LEN,
            });
        }
        let pool = self.pool_mut();
        let owned = pool.store_bytes(text.as_bytes())?;
        pool.push(Node::Number(owned))
    }

    /// Creates a list whose elements are `items`, in order.
    ///
    /// Every item must be an unlinked node and appear once.
    pub fn new_list(&mut self, items: &[NodeRef]) -> Result<NodeRef, BencodeError> {
        let count = self.check_count(items.len())?;
        self.check_unlinked(items)?;
        let first_child = self.link_chain(items)?;
        self.pool_mut().push(Node::List { count, first_child })
    }

    /// Creates a dictionary from `(key, value)` pairs, in order. Keys must be strings.
    ///
    /// Key order and uniqueness are not checked.
    pub fn new_dict(&mut self, entries: &[(NodeRef, NodeRef)]) -> Result<NodeRef, BencodeError> {
        let count = self.check_count(entries.len().saturating_mul(2))?;
        for &(key, _) in entries {
            self.expect_string(key)?;
        }
        let chain: Vec<NodeRef> = entries.iter().flat_map(|&(k, v)| [k, v]).collect();
        self.check_unlinked(&chain)?;
        let first_child = self.link_chain(&chain)?;
        self.pool_mut().push(Node::Dictionary { count, first_child })
    }

    /// Appends `value` to the end of `list`.
    ///
    /// Walks the whole chain to find its tail.
    pub fn list_push(&mut self, list: NodeRef, value: NodeRef) -> Result<(), BencodeError> {
        let (count, first_child) = match self.node(list)? {
            Node::List { count, first_child } => (count, first_child),
            other => return Err(mismatch("list", &other)),
        };
        let count = self.check_count(count as usize + 1)?;
        self.check_unlinked(&[value])?;
        self.check_acyclic(value, list)?;

        let first_child = self.append(first_child, &[value])?;
        self.pool_mut()
            .set_content(list, Node::List { count, first_child })
    }

    /// Appends a `key`/`value` entry to the end of `dict`.
    pub fn dict_insert(
        &mut self,
        dict: NodeRef,
        key: NodeRef,
        value: NodeRef,
    ) -> Result<(), BencodeError> {
        let (count, first_child) = match self.node(dict)? {
            Node::Dictionary { count, first_child } => (count, first_child),
            other => return Err(mismatch("dictionary", &other)),
        };
        self.expect_string(key)?;
        let count = self.check_count(count as usize + 2)?;
        self.check_unlinked(&[key, value])?;
        self.check_acyclic(value, dict)?;

        let first_child = self.append(first_child, &[key, value])?;
        self.pool_mut()
            .set_content(dict, Node::Dictionary { count, first_child })
    }

    /// Replaces the content of `target` with that of `source`, keeping
    /// `target`'s sibling link so parents and siblings see the new value.
    ///
    /// A container source shares its child chain with `target` afterwards.
    /// It fails with [`BencodeError::CyclicLink`] if `target` lies below `source`.
    pub fn update(&mut self, target: NodeRef, source: NodeRef) -> Result<(), BencodeError> {
        let node = self.node(source)?;
        self.node(target)?;
        if self.children(source).any(|child| self.reaches(child, target)) {
            return Err(BencodeError::CyclicLink(source));
        }
        self.pool_mut().set_content(target, node)
    }

    fn check_count(&self, count: usize) -> Result<u32, BencodeError> {
        let max = self.pool().profile().max_count();
        u32::try_from(count)
            .ok()
            .filter(|&c| c <= max)
            .ok_or(BencodeError::EntryLimit { max })
    }

    fn expect_string(&self, r: NodeRef) -> Result<(), BencodeError> {
        match self.node(r)? {
            Node::String(_) => Ok(()),
            other => Err(mismatch("string", &other)),
        }
    }

    /// Fails if a node in `nodes` is out of range, repeated, or already the
    /// sibling or first child of some slot in the pool.
    fn check_unlinked(&self, nodes: &[NodeRef]) -> Result<(), BencodeError> {
        let mut pending = HashSet::with_capacity(nodes.len());
        for &r in nodes {
            self.node(r)?;
            if !pending.insert(r) {
                return Err(BencodeError::AlreadyLinked(r));
            }
        }

        for i in 0..self.pool().len() {
            let slot = NodeRef(i);
            let first_child = self.pool().node(slot).and_then(|node| node.first_child());
            if let Some(r) = [self.next(slot), first_child]
                .into_iter()
                .flatten()
                .find(|r| pending.contains(r))
            {
                return Err(BencodeError::AlreadyLinked(r));
            }
        }
        Ok(())
    }

    /// Fails if attaching `node` below `container` would put `container` under itself.
    fn check_acyclic(&self, node: NodeRef, container: NodeRef) -> Result<(), BencodeError> {
        if self.reaches(node, container) {
            return Err(BencodeError::CyclicLink(node));
        }
        Ok(())
    }

    /// Whether `to` is `from` or lies anywhere below it.
    fn reaches(&self, from: NodeRef, to: NodeRef) -> bool {
        let mut stack = vec![from];
        while let Some(r) = stack.pop() {
            if r == to {
                return true;
            }
            stack.extend(self.children(r));
        }
        false
    }

    /// Links `nodes` into a chain and returns its head.
    fn link_chain(&mut self, nodes: &[NodeRef]) -> Result<Option<NodeRef>, BencodeError> {
        let mut first = None;
        let mut last: Option<NodeRef> = None;
        for &r in nodes {
            match last {
                Some(prev) => self.pool_mut().set_next(prev, Some(r))?,
                None => first = Some(r),
            }
            last = Some(r);
        }
        if let Some(tail) = last {
            self.pool_mut().set_next(tail, None)?;
        }
        Ok(first)
    }

    /// Attaches `nodes` after the tail of the chain starting at `head`.
    fn append(
        &mut self,
        head: Option<NodeRef>,
        nodes: &[NodeRef],
    ) -> Result<Option<NodeRef>, BencodeError> {
        let tail = head.map(|head| {
            let mut tail = head;
            while let Some(next) = self.next(tail) {
                tail = next;
            }
            tail
        });

        let added = self.link_chain(nodes)?;
        match tail {
            Some(tail) => {
                self.pool_mut().set_next(tail, added)?;
                Ok(head)
            }
            None => Ok(added),
        }
    }
}

fn mismatch(expected: &'static str, found: &Node) -> BencodeError {
    BencodeError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}
