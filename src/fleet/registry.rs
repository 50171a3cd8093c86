//! Ordered, append-only store of fleet vehicles.
//!
//! Insertion order is the only ordering; duplicates are allowed. Positions
//! are stable because nothing is ever removed.

use crate::error::FleetError;
use crate::fleet::capability::CapabilitySet;
use crate::fleet::vehicle::Vehicle;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// One line of the fleet listing.
pub struct VehicleSummary {
    pub index: usize,
    pub model: String,
    pub year: i32,
    pub kind: &'static str,
    pub capabilities: CapabilitySet,
}

#[derive(Debug, Default)]
/// In-memory store owning every vehicle in the fleet.
pub struct Registry {
    vehicles: Vec<Vehicle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle; its position is the previous length.
    pub fn add(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    /// Fetch the vehicle at `index`.
    ///
    /// Accepts a signed index so negative user input surfaces as
    /// `IndexOutOfRange` rather than a parse failure.
    pub fn get(&self, index: i64) -> Result<&Vehicle, FleetError> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.vehicles.get(idx))
            .ok_or(FleetError::IndexOutOfRange {
                index,
                len: self.vehicles.len(),
            })
    }

    /// Lazily enumerate `(index, summary)` rows in insertion order. Each call
    /// starts a fresh pass.
    pub fn list(&self) -> impl Iterator<Item = VehicleSummary> + '_ {
        self.vehicles
            .iter()
            .enumerate()
            .map(|(index, vehicle)| VehicleSummary {
                index,
                model: vehicle.model().to_string(),
                year: vehicle.year(),
                kind: vehicle.kind_name(),
                capabilities: vehicle.capabilities(),
            })
    }

    /// Vehicles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    /// Number of vehicles ever added.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl std::fmt::Display for VehicleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({}) - {}",
            self.index, self.model, self.year, self.kind
        )
    }
}
