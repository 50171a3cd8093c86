//! Observer lists for charge and refuel events.
//!
//! Observers run synchronously in registration order and receive only the
//! capability view of the vehicle that was acted on. An empty list is a no-op.

use crate::fleet::{ElectricChargeable, FuelRefuelable};

pub type ChargeObserver = Box<dyn FnMut(&dyn ElectricChargeable)>;
pub type RefuelObserver = Box<dyn FnMut(&dyn FuelRefuelable)>;

#[derive(Default)]
/// Registered listeners, owned by the car park.
pub struct FleetHooks {
    charged: Vec<ChargeObserver>,
    refueled: Vec<RefuelObserver>,
}

impl FleetHooks {
    pub fn on_vehicle_charged<F>(&mut self, observer: F)
    where
        F: FnMut(&dyn ElectricChargeable) + 'static,
    {
        self.charged.push(Box::new(observer));
    }

    pub fn on_vehicle_refueled<F>(&mut self, observer: F)
    where
        F: FnMut(&dyn FuelRefuelable) + 'static,
    {
        self.refueled.push(Box::new(observer));
    }

    pub(crate) fn notify_charged(&mut self, vehicle: &dyn ElectricChargeable) {
        for observer in &mut self.charged {
            observer(vehicle);
        }
    }

    pub(crate) fn notify_refueled(&mut self, vehicle: &dyn FuelRefuelable) {
        for observer in &mut self.refueled {
            observer(vehicle);
        }
    }

    pub fn charged_len(&self) -> usize {
        self.charged.len()
    }

    pub fn refueled_len(&self) -> usize {
        self.refueled.len()
    }
}

impl std::fmt::Debug for FleetHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetHooks")
            .field("charged", &self.charged.len())
            .field("refueled", &self.refueled.len())
            .finish()
    }
}
