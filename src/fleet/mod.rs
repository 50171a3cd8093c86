//! Fleet data model.
//!
//! `capability` defines the four behaviors a vehicle may support and the
//! traits that expose them; `vehicle` holds the closed set of kinds and the
//! factory; `registry` is the ordered store the operations engine iterates.

pub mod capability;
pub mod registry;
pub mod vehicle;

pub use capability::{
    Capability, CapabilitySet, Drivable, ElectricChargeable, FuelRefuelable, Maintainable,
    VehicleIdentity,
};
pub use registry::{Registry, VehicleSummary};
pub use vehicle::{KIND_MENU, Vehicle, VehicleKind, VehicleKindId, kind_for_menu_choice};
