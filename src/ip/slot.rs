//! Address slot values carried by plan entities.

use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

/// Display value for a plane that does not apply to an entity
pub const NOT_APPLICABLE_DISPLAY: &str = "-";

/// Display value for an address that could not be allocated
pub const PENDING_DISPLAY: &str = "PENDING (insufficient IPs)";

/// The address an entity holds on one plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressSlot {
    /// Address drawn from the plane's pool
    Concrete(Ipv4Addr),
    /// The entity's role never uses this plane
    NotApplicable,
    /// The plane was unconfigured or exhausted when the draw was made
    Pending,
}

impl AddressSlot {
    pub fn address(&self) -> Option<Ipv4Addr> {
        match self {
            AddressSlot::Concrete(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, AddressSlot::Concrete(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AddressSlot::Pending)
    }
}

impl fmt::Display for AddressSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSlot::Concrete(addr) => write!(f, "{}", addr),
            AddressSlot::NotApplicable => f.write_str(NOT_APPLICABLE_DISPLAY),
            AddressSlot::Pending => f.write_str(PENDING_DISPLAY),
        }
    }
}

/// Slots are rendered to their display strings only at the output boundary
impl Serialize for AddressSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_display_and_accessors() {
        let slot = AddressSlot::Concrete(Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(slot.to_string(), "10.0.0.7");
        assert_eq!(slot.address(), Some(Ipv4Addr::new(10, 0, 0, 7)));
        assert!(slot.is_concrete());

        assert_eq!(AddressSlot::NotApplicable.to_string(), NOT_APPLICABLE_DISPLAY);
        assert_eq!(AddressSlot::Pending.address(), None);
        assert!(AddressSlot::Pending.is_pending());
    }

    #[test]
    fn test_slot_serializes_as_display_string() {
        let slots = vec![
            AddressSlot::Concrete(Ipv4Addr::new(192, 168, 1, 1)),
            AddressSlot::NotApplicable,
            AddressSlot::Pending,
        ];
        let json = serde_json::to_string(&slots).unwrap();
        assert_eq!(json, format!(r#"["192.168.1.1","{}","{}"]"#, NOT_APPLICABLE_DISPLAY, PENDING_DISPLAY));
    }
}
