//! Address planes and pools.
//!
//! A pool is the ordered, immutable address sequence for one network plane.
//! Expanded ranges are kept as inclusive blocks so that a large CIDR costs
//! the same as a single address until it is actually iterated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// One of the four independent address namespaces of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    Management,
    Business,
    StoragePublic,
    StorageCluster,
}

impl Plane {
    /// All planes in canonical draw order
    pub const ALL: [Plane; 4] = [
        Plane::Management,
        Plane::Business,
        Plane::StoragePublic,
        Plane::StorageCluster,
    ];

    pub fn index(self) -> usize {
        match self {
            Plane::Management => 0,
            Plane::Business => 1,
            Plane::StoragePublic => 2,
            Plane::StorageCluster => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Plane::Management => "management",
            Plane::Business => "business",
            Plane::StoragePublic => "storage_public",
            Plane::StorageCluster => "storage_cluster",
        }
    }

    /// Human-readable label used in warnings and reports
    pub fn label(self) -> &'static str {
        match self {
            Plane::Management => "Management network",
            Plane::Business => "Business network",
            Plane::StoragePublic => "Storage public network",
            Plane::StorageCluster => "Storage cluster network",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a plane name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown network plane: {0}")]
pub struct UnknownPlane(pub String);

impl FromStr for Plane {
    type Err = UnknownPlane;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "management" | "mng" | "manage" => Ok(Plane::Management),
            "business" | "biz" => Ok(Plane::Business),
            "storage_public" | "storagepublic" | "storage-public" | "public" => Ok(Plane::StoragePublic),
            "storage_cluster" | "storagecluster" | "storage-cluster" | "cluster" => Ok(Plane::StorageCluster),
            _ => Err(UnknownPlane(s.to_string())),
        }
    }
}

/// Inclusive, non-empty run of consecutive IPv4 addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressBlock {
    first: u32,
    last: u32,
}

impl AddressBlock {
    /// Build a block from two endpoints; `None` when `start > end`
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Option<Self> {
        let (first, last) = (u32::from(start), u32::from(end));
        (first <= last).then_some(Self { first, last })
    }

    pub fn single(addr: Ipv4Addr) -> Self {
        let value = u32::from(addr);
        Self { first: value, last: value }
    }

    pub fn first(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.first)
    }

    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.last)
    }

    pub(crate) fn bounds(&self) -> (u32, u32) {
        (self.first, self.last)
    }

    /// Number of addresses; a block spanning the whole space holds 2^32
    pub fn len(&self) -> u64 {
        u64::from(self.last) - u64::from(self.first) + 1
    }

    pub fn get(&self, index: u64) -> Option<Ipv4Addr> {
        if index < self.len() {
            Some(Ipv4Addr::from(self.first + index as u32))
        } else {
            None
        }
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let value = u32::from(addr);
        self.first <= value && value <= self.last
    }

    /// Addresses held by both blocks
    pub fn intersection(&self, other: &AddressBlock) -> Option<AddressBlock> {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        (first <= last).then_some(Self { first, last })
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        (self.first..=self.last).map(Ipv4Addr::from)
    }
}

/// Ordered sequence of addresses made of blocks in specification order.
///
/// Duplicates are preserved; detecting them is the validator's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    blocks: Vec<AddressBlock>,
    len: u64,
}

impl AddressList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: AddressBlock) {
        self.len += block.len();
        self.blocks.push(block);
    }

    pub fn extend(&mut self, other: AddressList) {
        for block in other.blocks {
            self.push(block);
        }
    }

    pub fn blocks(&self) -> &[AddressBlock] {
        &self.blocks
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address at a position in the flattened sequence
    pub fn get(&self, mut index: u64) -> Option<Ipv4Addr> {
        for block in &self.blocks {
            let len = block.len();
            if index < len {
                return block.get(index);
            }
            index -= len;
        }
        None
    }

    pub fn first(&self) -> Option<Ipv4Addr> {
        self.blocks.first().map(AddressBlock::first)
    }

    pub fn last(&self) -> Option<Ipv4Addr> {
        self.blocks.last().map(AddressBlock::last)
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.blocks.iter().flat_map(AddressBlock::iter)
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.blocks.iter().any(|block| block.contains(addr))
    }

    /// Blocks shared with `other`, in the order of `self`.
    ///
    /// Cost is one comparison per pair of blocks; nothing is expanded.
    pub fn overlap(&self, other: &AddressList) -> AddressList {
        self.blocks
            .iter()
            .flat_map(|a| other.blocks.iter().filter_map(move |b| a.intersection(b)))
            .collect()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|addr| addr.to_string()).collect()
    }
}

impl From<AddressBlock> for AddressList {
    fn from(block: AddressBlock) -> Self {
        let mut list = AddressList::new();
        list.push(block);
        list
    }
}

impl FromIterator<AddressBlock> for AddressList {
    fn from_iter<I: IntoIterator<Item = AddressBlock>>(iter: I) -> Self {
        let mut list = AddressList::new();
        for block in iter {
            list.push(block);
        }
        list
    }
}

/// Immutable address pool for a single plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPool {
    plane: Plane,
    addresses: AddressList,
}

impl AddressPool {
    pub fn new(plane: Plane, addresses: AddressList) -> Self {
        Self { plane, addresses }
    }

    pub fn empty(plane: Plane) -> Self {
        Self::new(plane, AddressList::new())
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn addresses(&self) -> &AddressList {
        &self.addresses
    }

    pub fn len(&self) -> u64 {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn get(&self, index: u64) -> Option<Ipv4Addr> {
        self.addresses.get(index)
    }
}
