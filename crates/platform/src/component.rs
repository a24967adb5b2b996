//! Codec component descriptors and host registration
//!
//! A codec registers one [`ComponentDriver`] (its control surface) together
//! with its DAIs. The host owns control enumeration and stream plumbing
//! from then on; the driver only answers the callbacks.

use crate::audio::DaiDriver;
use crate::control::ControlDescriptor;

/// Static description of a codec component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDriver {
    /// Component name.
    pub name: &'static str,
    /// User-visible controls, in registration order.
    pub controls: &'static [ControlDescriptor],
}

impl ComponentDriver {
    /// Look up a control descriptor by name.
    pub fn control(&self, name: &str) -> Option<&'static ControlDescriptor> {
        self.controls.iter().find(|c| c.name == name)
    }
}

/// Identifiers the host's device-matching machinery binds a driver with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIds {
    /// Bus-level device id (I²C id table entry).
    pub i2c_id: &'static str,
    /// Platform-description compatible string (`vendor,device`).
    pub compatible: &'static str,
    /// Driver name.
    pub driver_name: &'static str,
}

impl DeviceIds {
    /// `true` if `id` names this device, either as bus id or compatible.
    pub fn matches(&self, id: &str) -> bool {
        id == self.i2c_id || id == self.compatible
    }
}

/// Registration seam to the host audio framework.
pub trait ComponentHost {
    /// Error returned when the host refuses a registration.
    type Error: core::fmt::Debug;

    /// Register a component and its DAIs.
    fn register_component(
        &mut self,
        component: &'static ComponentDriver,
        dais: &'static [DaiDriver],
    ) -> Result<(), Self::Error>;

    /// Undo [`register_component`](Self::register_component).
    fn unregister_component(&mut self, component: &'static ComponentDriver);
}
