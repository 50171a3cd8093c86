//! Fleet operations engine.
//!
//! `CarPark` owns the registry, the observer lists, and the audit sink. Bulk
//! operations walk the registry in order, test each vehicle for the relevant
//! capability, and either run the caller's action on the capability view or
//! record a "cannot be ..." notice. A missing capability is an expected
//! outcome and never stops the pass.

use crate::audit::{AuditRecord, AuditSink};
use crate::error::{FleetError, RepairError};
use crate::fleet::{
    Capability, Drivable, ElectricChargeable, FuelRefuelable, Maintainable, Registry, Vehicle,
    VehicleSummary,
};
use crate::hooks::FleetHooks;

/// Result of applying an operation to one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Performed {
        index: usize,
        model: String,
    },
    Unsupported {
        index: usize,
        model: String,
        notice: String,
    },
    Failed {
        index: usize,
        model: String,
        error: RepairError,
    },
}

impl Outcome {
    pub fn index(&self) -> usize {
        match self {
            Outcome::Performed { index, .. }
            | Outcome::Unsupported { index, .. }
            | Outcome::Failed { index, .. } => *index,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Outcome::Performed { model, .. }
            | Outcome::Unsupported { model, .. }
            | Outcome::Failed { model, .. } => model,
        }
    }

    /// Line to show the user, if any. Successful actions describe
    /// themselves through the caller's action instead.
    pub fn notice(&self) -> Option<String> {
        match self {
            Outcome::Performed { .. } => None,
            Outcome::Unsupported { notice, .. } => Some(notice.clone()),
            Outcome::Failed { model, error, .. } => Some(repair_failure_message(model, error)),
        }
    }

    pub fn is_performed(&self) -> bool {
        matches!(self, Outcome::Performed { .. })
    }
}

#[derive(Debug, Clone)]
/// Per-vehicle outcomes of one bulk operation, in registry order.
pub struct OperationReport {
    pub capability: Capability,
    pub outcomes: Vec<Outcome>,
}

impl OperationReport {
    fn new(capability: Capability) -> Self {
        Self {
            capability,
            outcomes: Vec::new(),
        }
    }

    pub fn performed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_performed()).count()
    }

    pub fn unsupported(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Unsupported { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Failed { .. }))
            .count()
    }

    pub fn notices(&self) -> impl Iterator<Item = String> + '_ {
        self.outcomes.iter().filter_map(Outcome::notice)
    }
}

/// The fleet manager.
pub struct CarPark<S: AuditSink> {
    registry: Registry,
    hooks: FleetHooks,
    audit: S,
}

impl<S: AuditSink> CarPark<S> {
    pub fn new(audit: S) -> Self {
        Self {
            registry: Registry::new(),
            hooks: FleetHooks::default(),
            audit,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn audit(&self) -> &S {
        &self.audit
    }

    pub fn hooks(&self) -> &FleetHooks {
        &self.hooks
    }

    /// Take ownership of `vehicle`, append it to the registry, and record an
    /// `Added <model>` audit line.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        log::info!(
            "adding {} {} ({}) at position {}",
            vehicle.kind_name(),
            vehicle.model(),
            vehicle.year(),
            self.registry.len()
        );
        append(&mut self.audit, format!("Added {}", vehicle.model()));
        self.registry.add(vehicle);
    }

    /// Vehicle at `index`, or `IndexOutOfRange` for positions outside the
    /// fleet. Never audited.
    pub fn get_vehicle(&self, index: i64) -> Result<&Vehicle, FleetError> {
        self.registry.get(index)
    }

    /// Summaries in insertion order; see [`Registry::list`].
    pub fn list_vehicles(&self) -> impl Iterator<Item = VehicleSummary> + '_ {
        self.registry.list()
    }

    pub fn on_vehicle_charged<F>(&mut self, observer: F)
    where
        F: FnMut(&dyn ElectricChargeable) + 'static,
    {
        self.hooks.on_vehicle_charged(observer);
    }

    pub fn on_vehicle_refueled<F>(&mut self, observer: F)
    where
        F: FnMut(&dyn FuelRefuelable) + 'static,
    {
        self.hooks.on_vehicle_refueled(observer);
    }

    pub fn drive_all<F>(&mut self, mut action: F) -> OperationReport
    where
        F: FnMut(&dyn Drivable),
    {
        let mut report = OperationReport::new(Capability::Drivable);
        for (index, vehicle) in self.registry.iter().enumerate() {
            let outcome = match vehicle.as_drivable() {
                Some(view) => {
                    action(&view);
                    performed(&mut self.audit, index, vehicle, Capability::Drivable)
                }
                None => unsupported(&mut self.audit, index, vehicle, Capability::Drivable),
            };
            report.outcomes.push(outcome);
        }
        report
    }

    /// Repair every maintainable vehicle. A failing action is reported for
    /// that vehicle only; the pass always reaches the end of the registry.
    pub fn repair_all<F>(&mut self, mut action: F) -> OperationReport
    where
        F: FnMut(&dyn Maintainable) -> Result<(), RepairError>,
    {
        let mut report = OperationReport::new(Capability::Maintainable);
        for (index, vehicle) in self.registry.iter().enumerate() {
            let outcome = repair_one(&mut self.audit, index, vehicle, &mut action);
            report.outcomes.push(outcome);
        }
        report
    }

    pub fn charge_all<F>(&mut self, mut action: F) -> OperationReport
    where
        F: FnMut(&dyn ElectricChargeable),
    {
        let mut report = OperationReport::new(Capability::ElectricChargeable);
        for (index, vehicle) in self.registry.iter().enumerate() {
            let outcome = match vehicle.as_chargeable() {
                Some(view) => {
                    action(&view);
                    let outcome =
                        performed(&mut self.audit, index, vehicle, Capability::ElectricChargeable);
                    self.hooks.notify_charged(&view);
                    outcome
                }
                None => {
                    unsupported(&mut self.audit, index, vehicle, Capability::ElectricChargeable)
                }
            };
            report.outcomes.push(outcome);
        }
        report
    }

    pub fn refuel_all<F>(&mut self, mut action: F) -> OperationReport
    where
        F: FnMut(&dyn FuelRefuelable),
    {
        let mut report = OperationReport::new(Capability::FuelRefuelable);
        for (index, vehicle) in self.registry.iter().enumerate() {
            let outcome = match vehicle.as_refuelable() {
                Some(view) => {
                    action(&view);
                    let outcome =
                        performed(&mut self.audit, index, vehicle, Capability::FuelRefuelable);
                    self.hooks.notify_refueled(&view);
                    outcome
                }
                None => unsupported(&mut self.audit, index, vehicle, Capability::FuelRefuelable),
            };
            report.outcomes.push(outcome);
        }
        report
    }

    /// Drive a single vehicle by position.
    pub fn drive_at<F>(&mut self, index: i64, action: F) -> Result<Outcome, FleetError>
    where
        F: FnOnce(&dyn Drivable),
    {
        let vehicle = self.registry.get(index)?;
        let position = index as usize;
        Ok(match vehicle.as_drivable() {
            Some(view) => {
                action(&view);
                performed(&mut self.audit, position, vehicle, Capability::Drivable)
            }
            None => unsupported(&mut self.audit, position, vehicle, Capability::Drivable),
        })
    }

    /// Repair a single vehicle by position.
    pub fn repair_at<F>(&mut self, index: i64, mut action: F) -> Result<Outcome, FleetError>
    where
        F: FnMut(&dyn Maintainable) -> Result<(), RepairError>,
    {
        let vehicle = self.registry.get(index)?;
        Ok(repair_one(
            &mut self.audit,
            index as usize,
            vehicle,
            &mut action,
        ))
    }
}

fn repair_one<S, F>(audit: &mut S, index: usize, vehicle: &Vehicle, action: &mut F) -> Outcome
where
    S: AuditSink,
    F: FnMut(&dyn Maintainable) -> Result<(), RepairError>,
{
    let Some(view) = vehicle.as_maintainable() else {
        return unsupported(audit, index, vehicle, Capability::Maintainable);
    };
    match action(&view) {
        Ok(()) => performed(audit, index, vehicle, Capability::Maintainable),
        Err(error) => {
            let message = repair_failure_message(vehicle.model(), &error);
            log::warn!("{message}");
            append(audit, message);
            Outcome::Failed {
                index,
                model: vehicle.model().to_string(),
                error,
            }
        }
    }
}

fn performed<S: AuditSink>(
    audit: &mut S,
    index: usize,
    vehicle: &Vehicle,
    capability: Capability,
) -> Outcome {
    log::debug!("{} {} at position {index}", capability.gerund(), vehicle.model());
    append(audit, format!("{} {}", capability.gerund(), vehicle.model()));
    Outcome::Performed {
        index,
        model: vehicle.model().to_string(),
    }
}

fn unsupported<S: AuditSink>(
    audit: &mut S,
    index: usize,
    vehicle: &Vehicle,
    capability: Capability,
) -> Outcome {
    let notice = format!(
        "The {} cannot be {}.",
        vehicle.model(),
        capability.participle()
    );
    log::debug!("{notice} ({} lacks {capability})", vehicle.kind_name());
    append(audit, notice.clone());
    Outcome::Unsupported {
        index,
        model: vehicle.model().to_string(),
        notice,
    }
}

fn repair_failure_message(model: &str, error: &RepairError) -> String {
    format!("An error occurred while repairing {model}: {error}")
}

fn append<S: AuditSink>(audit: &mut S, message: String) {
    audit.append(&AuditRecord::now(message));
}
