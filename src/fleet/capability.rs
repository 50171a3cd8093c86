use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Behavior a vehicle kind may support.
///
/// The set is closed: every vehicle kind declares which of these it carries
/// and the answer never changes for the lifetime of the vehicle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Capability {
    Drivable,
    Maintainable,
    ElectricChargeable,
    FuelRefuelable,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Drivable,
        Capability::Maintainable,
        Capability::ElectricChargeable,
        Capability::FuelRefuelable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Drivable => "drivable",
            Capability::Maintainable => "maintainable",
            Capability::ElectricChargeable => "electric_chargeable",
            Capability::FuelRefuelable => "fuel_refuelable",
        }
    }

    /// Verb used in audit records (`Driving Sedan`).
    pub fn gerund(self) -> &'static str {
        match self {
            Capability::Drivable => "Driving",
            Capability::Maintainable => "Repairing",
            Capability::ElectricChargeable => "Charging",
            Capability::FuelRefuelable => "Refueling",
        }
    }

    /// Past participle used in "cannot be ..." notices.
    pub fn participle(self) -> &'static str {
        match self {
            Capability::Drivable => "driven",
            Capability::Maintainable => "repaired",
            Capability::ElectricChargeable => "charged",
            Capability::FuelRefuelable => "refueled",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        Capability::ALL
            .into_iter()
            .find(|capability| capability.as_str() == value)
    }

    const fn bit(self) -> u8 {
        match self {
            Capability::Drivable => 1 << 0,
            Capability::Maintainable => 1 << 1,
            Capability::ElectricChargeable => 1 << 2,
            Capability::FuelRefuelable => 1 << 3,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Capability::from_str(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown capability '{value}'")))
    }
}

/// Fixed set of capabilities, answered in constant time.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const EMPTY: CapabilitySet = CapabilitySet(0);

    pub const fn of(capabilities: &[Capability]) -> Self {
        let mut bits = 0;
        let mut idx = 0;
        while idx < capabilities.len() {
            bits |= capabilities[idx].bit();
            idx += 1;
        }
        CapabilitySet(bits)
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.contains(*capability))
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        CapabilitySet(iter.into_iter().fold(0, |bits, cap| bits | cap.bit()))
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

/// Common identity every capability view exposes.
pub trait VehicleIdentity {
    fn model(&self) -> &str;
    fn year(&self) -> i32;
    fn kind_name(&self) -> &'static str;
}

pub trait Drivable: VehicleIdentity {
    /// Describe the drive action.
    fn drive(&self) -> String;
}

pub trait Maintainable: VehicleIdentity {
    fn repair(&self) -> String;
}

pub trait ElectricChargeable: VehicleIdentity {
    fn charge(&self) -> String;
}

pub trait FuelRefuelable: VehicleIdentity {
    fn refuel(&self) -> String;
}
