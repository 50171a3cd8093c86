//! Shared library for the car park manager.
//!
//! The crate models a heterogeneous fleet whose vehicles support different
//! subsets of four capabilities (drive, repair, charge, refuel). The
//! operations engine in [`operations`] applies bulk actions across the fleet
//! by testing each vehicle for a capability before acting, records every
//! event through an [`audit::AuditSink`], and notifies registered observers
//! after charges and refuels. The interactive [`shell`] and the `carpark`
//! binary are thin glue on top of that contract.

pub mod audit;
pub mod error;
pub mod fleet;
pub mod hooks;
pub mod operations;
pub mod runtime;
pub mod shell;

pub use audit::{
    AuditReadError, AuditRecord, AuditSink, FileAuditSink, MemoryAuditSink, read_audit_records,
};
pub use error::{FleetError, InputError, RepairError};
pub use fleet::{
    Capability, CapabilitySet, Drivable, ElectricChargeable, FuelRefuelable, KIND_MENU,
    Maintainable, Registry, Vehicle, VehicleIdentity, VehicleKind, VehicleKindId, VehicleSummary,
    kind_for_menu_choice,
};
pub use hooks::FleetHooks;
pub use operations::{CarPark, OperationReport, Outcome};

/// Vehicles the interactive binary starts with unless `--no-seed` is given.
pub fn demo_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle::new(
            "Sedan",
            2020,
            VehicleKind::LuxuryCar {
                passenger_capacity: 4,
                features: "Leather seats".to_string(),
            },
        ),
        Vehicle::new(
            "T8",
            2018,
            VehicleKind::DeliveryTruck {
                cargo_capacity: 12_000,
                cargo_type: "Furniture".to_string(),
            },
        ),
        Vehicle::new(
            "Tesla",
            2021,
            VehicleKind::ElectricCar {
                passenger_capacity: 5,
            },
        ),
        Vehicle::new(
            "BYD",
            2022,
            VehicleKind::PassengerElectricBus {
                passenger_capacity: 60,
                has_wifi: true,
            },
        ),
        Vehicle::new(
            "e-NV200",
            2023,
            VehicleKind::CargoElectricVan {
                passenger_capacity: 2,
                cargo_capacity: 800,
            },
        ),
    ]
}
