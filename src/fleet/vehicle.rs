//! Vehicle record, the closed set of vehicle kinds, and the kind factory.
//!
//! A vehicle is a single record (model, year, kind). Kind-specific
//! attributes live on the `VehicleKind` variant; which capabilities a vehicle
//! supports is a pure function of its kind via the `CAPABILITY_TABLE` below.
//! Capability actions are only reachable through the `as_*` accessors, which
//! return `None` for kinds lacking the capability.

use crate::error::FleetError;
use crate::fleet::capability::{
    Capability, CapabilitySet, Drivable, ElectricChargeable, FuelRefuelable, Maintainable,
    VehicleIdentity,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DRIVE: Capability = Capability::Drivable;
const REPAIR: Capability = Capability::Maintainable;
const CHARGE: Capability = Capability::ElectricChargeable;
const REFUEL: Capability = Capability::FuelRefuelable;

/// Identifier for each concrete vehicle kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum VehicleKindId {
    Car,
    LuxuryCar,
    Truck,
    DeliveryTruck,
    ElectricCar,
    ElectricBus,
    PassengerElectricBus,
    CargoElectricVan,
}

impl VehicleKindId {
    pub const ALL: [VehicleKindId; 8] = [
        VehicleKindId::Car,
        VehicleKindId::LuxuryCar,
        VehicleKindId::Truck,
        VehicleKindId::DeliveryTruck,
        VehicleKindId::ElectricCar,
        VehicleKindId::ElectricBus,
        VehicleKindId::PassengerElectricBus,
        VehicleKindId::CargoElectricVan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VehicleKindId::Car => "Car",
            VehicleKindId::LuxuryCar => "LuxuryCar",
            VehicleKindId::Truck => "Truck",
            VehicleKindId::DeliveryTruck => "DeliveryTruck",
            VehicleKindId::ElectricCar => "ElectricCar",
            VehicleKindId::ElectricBus => "ElectricBus",
            VehicleKindId::PassengerElectricBus => "PassengerElectricBus",
            VehicleKindId::CargoElectricVan => "CargoElectricVan",
        }
    }

    /// Capabilities every vehicle of this kind supports.
    pub const fn capabilities(self) -> CapabilitySet {
        match self {
            VehicleKindId::Car | VehicleKindId::LuxuryCar => CapabilitySet::of(&[DRIVE]),
            VehicleKindId::Truck | VehicleKindId::DeliveryTruck => {
                CapabilitySet::of(&[DRIVE, REPAIR, REFUEL])
            }
            VehicleKindId::ElectricCar
            | VehicleKindId::ElectricBus
            | VehicleKindId::PassengerElectricBus => CapabilitySet::of(&[DRIVE, CHARGE]),
            VehicleKindId::CargoElectricVan => CapabilitySet::of(&[CHARGE, REPAIR]),
        }
    }

    /// Noun used in action descriptions ("The T8 truck is driving.").
    fn noun(self) -> &'static str {
        match self {
            VehicleKindId::Car | VehicleKindId::LuxuryCar => "car",
            VehicleKindId::Truck | VehicleKindId::DeliveryTruck => "truck",
            VehicleKindId::ElectricCar => "electric car",
            VehicleKindId::ElectricBus | VehicleKindId::PassengerElectricBus => "electric bus",
            VehicleKindId::CargoElectricVan => "electric van",
        }
    }

    /// Build a vehicle of this kind with default kind attributes.
    pub fn build(self, model: impl Into<String>, year: i32) -> Vehicle {
        let kind = match self {
            VehicleKindId::Car => VehicleKind::Car {
                passenger_capacity: 5,
            },
            VehicleKindId::LuxuryCar => VehicleKind::LuxuryCar {
                passenger_capacity: 4,
                features: String::new(),
            },
            VehicleKindId::Truck => VehicleKind::Truck { cargo_capacity: 0 },
            VehicleKindId::DeliveryTruck => VehicleKind::DeliveryTruck {
                cargo_capacity: 0,
                cargo_type: String::new(),
            },
            VehicleKindId::ElectricCar => VehicleKind::ElectricCar {
                passenger_capacity: 5,
            },
            VehicleKindId::ElectricBus => VehicleKind::ElectricBus {
                passenger_capacity: 40,
            },
            VehicleKindId::PassengerElectricBus => VehicleKind::PassengerElectricBus {
                passenger_capacity: 40,
                has_wifi: false,
            },
            VehicleKindId::CargoElectricVan => VehicleKind::CargoElectricVan {
                passenger_capacity: 2,
                cargo_capacity: 0,
            },
        };
        Vehicle::new(model, year, kind)
    }
}

impl fmt::Display for VehicleKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleKindId {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        VehicleKindId::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FleetError::UnknownKind(trimmed.to_string()))
    }
}

/// Menu choices offered by the interactive shell's "add a vehicle" entry.
pub const KIND_MENU: &[(&str, VehicleKindId)] = &[
    ("1", VehicleKindId::LuxuryCar),
    ("2", VehicleKindId::DeliveryTruck),
    ("3", VehicleKindId::ElectricCar),
    ("4", VehicleKindId::PassengerElectricBus),
    ("5", VehicleKindId::CargoElectricVan),
];

/// Resolve a menu choice to a vehicle kind.
pub fn kind_for_menu_choice(choice: &str) -> Option<VehicleKindId> {
    let choice = choice.trim();
    KIND_MENU
        .iter()
        .find(|(key, _)| *key == choice)
        .map(|(_, kind)| *kind)
}

/// Kind-specific attributes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum VehicleKind {
    Car {
        passenger_capacity: u32,
    },
    LuxuryCar {
        passenger_capacity: u32,
        features: String,
    },
    Truck {
        cargo_capacity: u32,
    },
    DeliveryTruck {
        cargo_capacity: u32,
        cargo_type: String,
    },
    ElectricCar {
        passenger_capacity: u32,
    },
    ElectricBus {
        passenger_capacity: u32,
    },
    PassengerElectricBus {
        passenger_capacity: u32,
        has_wifi: bool,
    },
    CargoElectricVan {
        passenger_capacity: u32,
        cargo_capacity: u32,
    },
}

impl VehicleKind {
    pub fn id(&self) -> VehicleKindId {
        match self {
            VehicleKind::Car { .. } => VehicleKindId::Car,
            VehicleKind::LuxuryCar { .. } => VehicleKindId::LuxuryCar,
            VehicleKind::Truck { .. } => VehicleKindId::Truck,
            VehicleKind::DeliveryTruck { .. } => VehicleKindId::DeliveryTruck,
            VehicleKind::ElectricCar { .. } => VehicleKindId::ElectricCar,
            VehicleKind::ElectricBus { .. } => VehicleKindId::ElectricBus,
            VehicleKind::PassengerElectricBus { .. } => VehicleKindId::PassengerElectricBus,
            VehicleKind::CargoElectricVan { .. } => VehicleKindId::CargoElectricVan,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// A single fleet entity.
pub struct Vehicle {
    model: String,
    year: i32,
    #[serde(flatten)]
    kind: VehicleKind,
}

impl Vehicle {
    pub fn new(model: impl Into<String>, year: i32, kind: VehicleKind) -> Self {
        Self {
            model: model.into(),
            year,
            kind,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    pub fn kind_id(&self) -> VehicleKindId {
        self.kind.id()
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind_id().name()
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.kind_id().capabilities()
    }

    /// Safe capability test; never performs the action.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    pub fn as_drivable(&self) -> Option<impl Drivable + '_> {
        self.view(Capability::Drivable)
    }

    pub fn as_maintainable(&self) -> Option<impl Maintainable + '_> {
        self.view(Capability::Maintainable)
    }

    pub fn as_chargeable(&self) -> Option<impl ElectricChargeable + '_> {
        self.view(Capability::ElectricChargeable)
    }

    pub fn as_refuelable(&self) -> Option<impl FuelRefuelable + '_> {
        self.view(Capability::FuelRefuelable)
    }

    fn view(&self, capability: Capability) -> Option<View<'_>> {
        self.supports(capability).then_some(View(self))
    }
}

// Implements every capability trait, but is only handed out behind an opaque
// `impl Trait` naming the one capability the kind was checked for.
struct View<'a>(&'a Vehicle);

impl View<'_> {
    fn describe(&self, action: &str) -> String {
        format!(
            "The {} {} is {action}.",
            self.0.model,
            self.0.kind_id().noun()
        )
    }
}

impl VehicleIdentity for View<'_> {
    fn model(&self) -> &str {
        self.0.model()
    }

    fn year(&self) -> i32 {
        self.0.year()
    }

    fn kind_name(&self) -> &'static str {
        self.0.kind_name()
    }
}

impl Drivable for View<'_> {
    fn drive(&self) -> String {
        self.describe("driving")
    }
}

impl Maintainable for View<'_> {
    fn repair(&self) -> String {
        self.describe("being repaired")
    }
}

impl ElectricChargeable for View<'_> {
    fn charge(&self) -> String {
        self.describe("charging")
    }
}

impl FuelRefuelable for View<'_> {
    fn refuel(&self) -> String {
        self.describe("refueling")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(kind: VehicleKindId) -> Vec<Capability> {
        kind.capabilities().iter().collect()
    }

    #[test]
    fn capability_table_is_fixed_per_kind() {
        use Capability::*;
        assert_eq!(caps(VehicleKindId::Car), vec![Drivable]);
        assert_eq!(caps(VehicleKindId::LuxuryCar), vec![Drivable]);
        assert_eq!(
            caps(VehicleKindId::Truck),
            vec![Drivable, Maintainable, FuelRefuelable]
        );
        assert_eq!(
            caps(VehicleKindId::DeliveryTruck),
            vec![Drivable, Maintainable, FuelRefuelable]
        );
        assert_eq!(caps(VehicleKindId::ElectricCar), vec![Drivable, ElectricChargeable]);
        assert_eq!(caps(VehicleKindId::ElectricBus), vec![Drivable, ElectricChargeable]);
        assert_eq!(
            caps(VehicleKindId::PassengerElectricBus),
            vec![Drivable, ElectricChargeable]
        );
        assert_eq!(
            caps(VehicleKindId::CargoElectricVan),
            vec![Maintainable, ElectricChargeable]
        );
    }

    #[test]
    fn views_follow_capabilities() {
        let van = VehicleKindId::CargoElectricVan.build("e-NV200", 2023);
        assert!(van.as_drivable().is_none());
        assert!(van.as_refuelable().is_none());
        assert_eq!(
            van.as_maintainable().map(|v| v.repair()).as_deref(),
            Some("The e-NV200 electric van is being repaired.")
        );
        assert_eq!(
            van.as_chargeable().map(|v| v.charge()).as_deref(),
            Some("The e-NV200 electric van is charging.")
        );

        let truck = VehicleKindId::DeliveryTruck.build("T8", 2018);
        let view = truck.as_refuelable().expect("trucks refuel");
        assert_eq!(view.refuel(), "The T8 truck is refueling.");
        assert_eq!(view.model(), "T8");
        assert_eq!(view.kind_name(), "DeliveryTruck");
    }

    #[test]
    fn factory_builds_every_kind() {
        for kind in VehicleKindId::ALL {
            let vehicle = kind.build("X", 2000);
            assert_eq!(vehicle.kind_id(), kind);
            assert_eq!(vehicle.kind_name(), kind.name());
            assert_eq!(vehicle.capabilities(), kind.capabilities());
        }
    }

    #[test]
    fn kind_ids_parse_from_names() {
        assert_eq!(
            "CargoElectricVan".parse::<VehicleKindId>().unwrap(),
            VehicleKindId::CargoElectricVan
        );
        assert_eq!(" luxurycar ".parse::<VehicleKindId>().unwrap(), VehicleKindId::LuxuryCar);
        let err = "Spaceship".parse::<VehicleKindId>().unwrap_err();
        assert!(matches!(err, FleetError::UnknownKind(ref name) if name == "Spaceship"));
    }

    #[test]
    fn menu_covers_the_five_addable_kinds() {
        assert_eq!(kind_for_menu_choice("1"), Some(VehicleKindId::LuxuryCar));
        assert_eq!(kind_for_menu_choice(" 5 "), Some(VehicleKindId::CargoElectricVan));
        assert_eq!(kind_for_menu_choice("6"), None);
        assert_eq!(kind_for_menu_choice(""), None);
    }

    #[test]
    fn vehicle_serializes_with_flattened_kind() {
        let vehicle = Vehicle::new(
            "BYD",
            2022,
            VehicleKind::PassengerElectricBus {
                passenger_capacity: 60,
                has_wifi: true,
            },
        );
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["model"], "BYD");
        assert_eq!(json["kind"], "PassengerElectricBus");
        assert_eq!(json["has_wifi"], true);
        let back: Vehicle = serde_json::from_value(json).unwrap();
        assert_eq!(back, vehicle);
    }
}
