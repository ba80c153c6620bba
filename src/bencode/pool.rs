use bytes::BytesMut;

use super::error::BencodeError;
use super::node::{ByteRef, Node, NodeRef};
use super::packed::{Header, Tag, WidthProfile};
use crate::constants::{NODE_GUESS_RATIO, SLOT_BYTES};

/// One fixed-size node slot: packed header, payload and sibling link.
///
/// The payload is the first child's index for containers and the byte offset
/// for strings and numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    header: u32,
    payload: u32,
    next: u32,
}

impl Slot {
    pub const EMPTY: Slot = Slot {
        header: 0,
        payload: NodeRef::NONE,
        next: NodeRef::NONE,
    };
}

impl Default for Slot {
    fn default() -> Self {
        Slot::EMPTY
    }
}

#[derive(Debug)]
enum Storage<'a> {
    Growable(Vec<Slot>),
    Fixed(&'a mut [Slot]),
}

/// Arena holding every node of a tree.
///
/// A pool either owns growable storage or borrows a fixed slice of slots from
/// the caller. Growth appends capacity and may move the storage; nodes are
/// therefore addressed by [`NodeRef`] and never by reference across a call
/// that can allocate. The pool never shrinks and never frees single nodes.
///
/// # Examples
///
/// ```
/// use bentree::bencode::{Pool, Slot};
///
/// // Self-owned storage grows on demand.
/// let mut pool = Pool::growable(2).unwrap();
/// let first = pool.allocate(3).unwrap();
/// assert_eq!(first.index(), 0);
/// assert_eq!(pool.capacity(), 7);
///
/// // Caller-owned storage never grows.
/// let mut slots = [Slot::EMPTY; 4];
/// let mut pool = Pool::fixed(&mut slots);
/// assert!(pool.allocate(5).is_err());
/// ```
#[derive(Debug)]
pub struct Pool<'a> {
    storage: Storage<'a>,
    capacity: u32,
    used: u32,
    heap: BytesMut,
    profile: WidthProfile,
}

impl Pool<'static> {
    /// Creates a self-owned pool with room for `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::OutOfMemory`] if the initial storage cannot be reserved.
    pub fn growable(capacity: u32) -> Result<Self, BencodeError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity as usize)
            .map_err(|_| BencodeError::OutOfMemory { capacity: 0 })?;
        Ok(Pool {
            storage: Storage::Growable(slots),
            capacity,
            used: 0,
            heap: BytesMut::new(),
            profile: WidthProfile::default(),
        })
    }

    /// Creates a self-owned pool sized for decoding `input_len` bytes.
    pub fn for_input(input_len: usize) -> Result<Self, BencodeError> {
        let guess = (input_len / NODE_GUESS_RATIO).max(NODE_GUESS_RATIO);
        Pool::growable(u32::try_from(guess).unwrap_or(u32::MAX))
    }
}

impl<'a> Pool<'a> {
    /// Creates a pool over caller-owned slots. It fails with
    /// [`BencodeError::OutOfCapacity`] once the slice is used up.
    pub fn fixed(slots: &'a mut [Slot]) -> Self {
        let capacity = u32::try_from(slots.len()).unwrap_or(u32::MAX);
        Pool {
            storage: Storage::Fixed(slots),
            capacity,
            used: 0,
            heap: BytesMut::new(),
            profile: WidthProfile::default(),
        }
    }

    /// Selects the width profile.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::PoolInUse`] once anything has been allocated,
    /// since existing headers were packed for the old profile.
    pub fn with_profile(mut self, profile: WidthProfile) -> Result<Self, BencodeError> {
        if self.used > 0 {
            return Err(BencodeError::PoolInUse { used: self.used });
        }
        self.profile = profile;
        self.capacity = self.capacity.min(profile.max_slots());
        Ok(self)
    }

    pub fn profile(&self) -> WidthProfile {
        self.profile
    }

    /// Number of slots in use, including slots charged for owned bytes.
    pub fn len(&self) -> u32 {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.storage, Storage::Fixed(_))
    }

    /// Reserves `count` contiguous fresh slots and returns the first one.
    ///
    /// Any slot view obtained before this call may refer to moved storage
    /// afterwards; look nodes up again by index.
    pub fn allocate(&mut self, count: u32) -> Result<NodeRef, BencodeError> {
        let end = self
            .used
            .checked_add(count)
            .ok_or_else(|| self.exhausted())?;
        if end > self.capacity {
            self.grow(count)?;
        }

        let start = self.used as usize;
        match &mut self.storage {
            Storage::Growable(slots) => slots.resize(end as usize, Slot::EMPTY),
            Storage::Fixed(slots) => slots[start..end as usize].fill(Slot::EMPTY),
        }

        let first = NodeRef(self.used);
        self.used = end;
        Ok(first)
    }

    fn grow(&mut self, count: u32) -> Result<(), BencodeError> {
        let old = self.capacity;
        let Storage::Growable(slots) = &mut self.storage else {
            return Err(BencodeError::OutOfCapacity { capacity: old });
        };

        let new = old
            .checked_mul(2)
            .and_then(|c| c.checked_add(count))
            .filter(|&c| c <= self.profile.max_slots())
            .ok_or(BencodeError::OutOfMemory { capacity: old })?;

        slots
            .try_reserve_exact(new as usize - slots.len())
            .map_err(|_| BencodeError::OutOfMemory { capacity: old })?;

        tracing::trace!("Growing node pool from {} to {} slots", old, new);
        self.capacity = new;
        Ok(())
    }

    fn exhausted(&self) -> BencodeError {
        match self.storage {
            Storage::Fixed(_) => BencodeError::OutOfCapacity {
                capacity: self.capacity,
            },
            Storage::Growable(_) => BencodeError::OutOfMemory {
                capacity: self.capacity,
            },
        }
    }

    fn slots(&self) -> &[Slot] {
        match &self.storage {
            Storage::Growable(slots) => slots.as_slice(),
            Storage::Fixed(slots) => &slots[..self.used as usize],
        }
    }

    fn slot_mut(&mut self, r: NodeRef) -> Result<&mut Slot, BencodeError> {
        let used = self.used as usize;
        let slots: &mut [Slot] = match &mut self.storage {
            Storage::Growable(slots) => slots.as_mut_slice(),
            Storage::Fixed(slots) => &mut slots[..used],
        };
        slots
            .get_mut(r.index())
            .ok_or(BencodeError::InvalidNodeRef(r))
    }

    pub fn contains(&self, r: NodeRef) -> bool {
        r.0 < self.used
    }

    /// Unpacks the node stored at `r`.
    pub fn node(&self, r: NodeRef) -> Option<Node> {
        let slot = self.slots().get(r.index())?;
        let header = Header::unpack(slot.header, self.profile);
        let bytes = |len| {
            if header.owned {
                ByteRef::Owned {
                    offset: slot.payload,
                    len,
                }
            } else {
                ByteRef::Borrowed {
                    offset: slot.payload,
                    len,
                }
            }
        };
        Some(match header.tag {
            Tag::Dictionary => Node::Dictionary {
                count: header.len,
                first_child: NodeRef::from_raw(slot.payload),
            },
            Tag::List => Node::List {
                count: header.len,
                first_child: NodeRef::from_raw(slot.payload),
            },
            Tag::String => Node::String(bytes(header.len)),
            Tag::Number => Node::Number(bytes(header.len)),
        })
    }

    /// The next sibling of `r` within its parent's chain.
    pub fn next(&self, r: NodeRef) -> Option<NodeRef> {
        self.slots()
            .get(r.index())
            .and_then(|slot| NodeRef::from_raw(slot.next))
    }

    /// Allocates one slot holding `node` with no sibling.
    pub(crate) fn push(&mut self, node: Node) -> Result<NodeRef, BencodeError> {
        let r = self.allocate(1)?;
        self.set_content(r, node)?;
        Ok(r)
    }

    /// Overwrites the header and payload of `r`, keeping its sibling link.
    pub(crate) fn set_content(&mut self, r: NodeRef, node: Node) -> Result<(), BencodeError> {
        let profile = self.profile;
        let (header, payload) = match node {
            Node::Dictionary { count, first_child } | Node::List { count, first_child } => (
                Header {
                    tag: node.tag(),
                    owned: false,
                    len: count,
                },
                NodeRef::raw(first_child),
            ),
            Node::String(bytes) | Node::Number(bytes) => {
                let offset = match bytes {
                    ByteRef::Borrowed { offset, .. } | ByteRef::Owned { offset, .. } => offset,
                };
                (
                    Header {
                        tag: node.tag(),
                        owned: bytes.is_owned(),
                        len: bytes.len(),
                    },
                    offset,
                )
            }
        };
        let slot = self.slot_mut(r)?;
        slot.header = header.pack(profile);
        slot.payload = payload;
        Ok(())
    }

    pub(crate) fn set_next(&mut self, r: NodeRef, next: Option<NodeRef>) -> Result<(), BencodeError> {
        self.slot_mut(r)?.next = NodeRef::raw(next);
        Ok(())
    }

    /// Copies `bytes` into pool-owned storage.
    ///
    /// Owned bytes are charged against the slot budget at [`SLOT_BYTES`] per
    /// slot, so a fixed pool stays bounded.
    pub(crate) fn store_bytes(&mut self, bytes: &[u8]) -> Result<ByteRef, BencodeError> {
        let charge = u32::try_from(bytes.len().div_ceil(SLOT_BYTES)).map_err(|_| self.exhausted())?;
        let len = u32::try_from(bytes.len()).map_err(|_| self.exhausted())?;
        let offset = u32::try_from(self.heap.len()).map_err(|_| self.exhausted())?;
        self.allocate(charge)?;
        self.heap.extend_from_slice(bytes);
        Ok(ByteRef::Owned { offset, len })
    }

    /// Pool-owned bytes at `offset..offset + len`.
    pub(crate) fn owned_bytes(&self, offset: u32, len: u32) -> &[u8] {
        let start = offset as usize;
        self.heap
            .get(start..start + len as usize)
            .unwrap_or_default()
    }
}
