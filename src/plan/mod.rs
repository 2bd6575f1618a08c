//! Plan entities and the generators that produce them.
//!
//! Generators take the parameters plus the live [`IpManager`] and draw
//! addresses in a fixed order. They never decide plane applicability from
//! pool supply: a plane either applies to an entity or it does not, and an
//! applicable plane with no address left yields a pending slot.

pub mod requirements;
pub mod servers;
pub mod storage;
pub mod types;
pub mod vms;

pub use requirements::estimate_requirements;
pub use servers::{generate_servers, MNG_FLOAT_NAME};
pub use storage::generate_storage_clusters;
pub use types::{
    AddressAssignment, FloatingAddress, Plan, PlanDraft, PlanStage, PlanSummary, Server, StageRecord,
    StorageCluster, VirtualMachine,
};
pub use vms::generate_vms;

use crate::ip::{AddressSlot, IpManager, Plane};

/// Draw from `plane` when it applies, otherwise leave the slot not applicable
/// without touching the cursor
pub(crate) fn draw_if(manager: &mut IpManager, plane: Plane, applies: bool) -> AddressSlot {
    if applies {
        manager.next_address(plane)
    } else {
        AddressSlot::NotApplicable
    }
}
