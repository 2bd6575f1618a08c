//! IP address parsing, pooling and allocation.
//!
//! Range text is parsed once into per-plane pools when an `IpManager` is
//! constructed. Generators then draw from the manager one address at a time
//! in a fixed order.

pub mod manager;
pub mod pool;
pub mod range;
pub mod report;
pub mod slot;

// Re-export commonly used types
pub use manager::{IpManager, IpRanges, PlaneCursors, ValidationErrorRecord};
pub use pool::{AddressBlock, AddressList, AddressPool, Plane};
pub use range::{parse_list, validate_list, ParsedList, RangeError};
pub use report::{PoolUsage, Requirement, Requirements, UsageReport};
pub use slot::AddressSlot;
