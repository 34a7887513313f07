//! Component models for the circuit playground.
//!
//! This module provides the six component kinds the editor offers:
//! - Sources: Battery
//! - Passive: Resistor, LED, Capacitor
//! - Controls: Switch
//! - Reference: Ground
//!
//! Every kind is reduced to a single lumped resistance for loop
//! evaluation. The battery additionally carries a voltage and the switch
//! an open/closed state that gates traversal.

mod controls;
mod ratings;

pub use ratings::{format_si, KindDefaults};

use std::fmt;

use crate::circuit::{NodeId, Position};
use crate::error::{CircuitError, Result};

/// Component kinds supported by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Voltage source
    Battery,
    /// Fixed resistor
    Resistor,
    /// Light-emitting diode (forward resistance approximation)
    Led,
    /// Single-pole switch
    Switch,
    /// Capacitor (equivalent series resistance only)
    Capacitor,
    /// Return / reference terminal
    Ground,
}

impl ComponentKind {
    /// All kinds, in toolbar order.
    pub const ALL: [ComponentKind; 6] = [
        Self::Battery,
        Self::Switch,
        Self::Resistor,
        Self::Led,
        Self::Capacitor,
        Self::Ground,
    ];

    /// Parse a kind from a keyword or one of its aliases.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "battery" | "bat" | "b" => Some(Self::Battery),
            "resistor" | "res" | "r" => Some(Self::Resistor),
            "led" => Some(Self::Led),
            "switch" | "sw" | "s" => Some(Self::Switch),
            "capacitor" | "cap" | "c" => Some(Self::Capacitor),
            "ground" | "gnd" | "g" => Some(Self::Ground),
            _ => None,
        }
    }

    /// Lowercase name, also used as the prefix of generated ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Resistor => "resistor",
            Self::Led => "led",
            Self::Switch => "switch",
            Self::Capacitor => "capacitor",
            Self::Ground => "ground",
        }
    }

    /// Default electrical parameters for this kind.
    pub fn defaults(&self) -> KindDefaults {
        KindDefaults::for_kind(*self)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component placed on the board.
///
/// `powered` and `current` are outputs of the evaluator and can only be
/// written from inside the crate.
#[derive(Debug, Clone)]
pub struct Component {
    id: NodeId,
    kind: ComponentKind,
    /// Caption shown in the editor
    pub label: String,
    /// Canvas position
    pub position: Position,
    resistance: f64,
    voltage: f64,
    capacitance: f64,
    closed: bool,
    powered: bool,
    current: f64,
}

impl Component {
    /// Create a component with the defaults of its kind.
    pub fn new(id: NodeId, kind: ComponentKind, position: Position) -> Self {
        let defaults = kind.defaults();
        let mut component = Self {
            id,
            kind,
            label: String::new(),
            position,
            resistance: defaults.resistance,
            voltage: defaults.voltage,
            capacitance: defaults.capacitance,
            closed: defaults.closed,
            powered: false,
            current: 0.0,
        };
        component.refresh_label();
        component
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Lumped resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Source voltage in volts (zero for everything except batteries).
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Capacitance in farads (zero for everything except capacitors).
    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    /// Whether the component lies on a complete loop.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Strongest loop current through the component, in amperes.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_battery(&self) -> bool {
        self.kind == ComponentKind::Battery
    }

    pub fn is_ground(&self) -> bool {
        self.kind == ComponentKind::Ground
    }

    /// Set the lumped resistance.
    pub fn set_resistance(&mut self, ohms: f64) -> Result<()> {
        if !ohms.is_finite() || ohms < 0.0 {
            return Err(CircuitError::invalid_parameter(
                self.id.as_str(),
                "resistance",
                format!("must be a non-negative number of ohms, got {}", ohms),
            ));
        }
        self.resistance = ohms;
        self.refresh_label();
        Ok(())
    }

    /// Set the battery voltage. Only batteries carry a voltage.
    pub fn set_voltage(&mut self, volts: f64) -> Result<()> {
        if self.kind != ComponentKind::Battery {
            return Err(CircuitError::invalid_parameter(
                self.id.as_str(),
                "voltage",
                format!("a {} has no voltage", self.kind),
            ));
        }
        if !volts.is_finite() {
            return Err(CircuitError::invalid_parameter(
                self.id.as_str(),
                "voltage",
                "must be finite",
            ));
        }
        self.voltage = volts;
        self.refresh_label();
        Ok(())
    }

    /// Set the capacitance. Display only; the evaluator never reads it.
    pub fn set_capacitance(&mut self, farads: f64) -> Result<()> {
        if self.kind != ComponentKind::Capacitor {
            return Err(CircuitError::invalid_parameter(
                self.id.as_str(),
                "capacitance",
                format!("a {} has no capacitance", self.kind),
            ));
        }
        if !farads.is_finite() || farads < 0.0 {
            return Err(CircuitError::invalid_parameter(
                self.id.as_str(),
                "capacitance",
                format!("must be a non-negative number of farads, got {}", farads),
            ));
        }
        self.capacitance = farads;
        self.refresh_label();
        Ok(())
    }

    /// Rebuild the caption from the current parameters.
    pub fn refresh_label(&mut self) {
        self.label = ratings::label_for(self);
    }

    /// Write the evaluator's verdict back onto the component.
    pub(crate) fn set_derived(&mut self, powered: bool, current: f64) {
        self.powered = powered;
        self.current = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(kind: ComponentKind) -> Component {
        Component::new(NodeId::new("x"), kind, Position::default())
    }

    #[test]
    fn test_kind_defaults() {
        let b = make(ComponentKind::Battery);
        assert_eq!(b.resistance(), 1.0);
        assert_eq!(b.voltage(), 9.0);
        assert_eq!(make(ComponentKind::Resistor).resistance(), 100.0);
        assert_eq!(make(ComponentKind::Led).resistance(), 10.0);
        assert_eq!(make(ComponentKind::Capacitor).resistance(), 50.0);
        assert_eq!(make(ComponentKind::Ground).resistance(), 0.1);

        let s = make(ComponentKind::Switch);
        assert_eq!(s.resistance(), 0.1);
        assert!(!s.is_closed());
        assert!(!s.is_powered());
        assert_eq!(s.current(), 0.0);
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!(ComponentKind::from_keyword("GND"), Some(ComponentKind::Ground));
        assert_eq!(ComponentKind::from_keyword("sw"), Some(ComponentKind::Switch));
        assert_eq!(ComponentKind::from_keyword("Led"), Some(ComponentKind::Led));
        assert_eq!(ComponentKind::from_keyword("transistor"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(make(ComponentKind::Battery).label, "Battery 9V");
        assert_eq!(make(ComponentKind::Resistor).label, "Resistor 100Ω");
        assert_eq!(make(ComponentKind::Capacitor).label, "Capacitor 100µF");
        assert_eq!(make(ComponentKind::Switch).label, "Switch (Open)");
        assert_eq!(make(ComponentKind::Ground).label, "Ground");
    }

    #[test]
    fn test_parameter_validation() {
        let mut r = make(ComponentKind::Resistor);
        assert!(r.set_resistance(-1.0).is_err());
        assert!(r.set_resistance(f64::NAN).is_err());
        r.set_resistance(4700.0).unwrap();
        assert_eq!(r.label, "Resistor 4.7kΩ");
        assert!(r.set_voltage(5.0).is_err());

        let mut b = make(ComponentKind::Battery);
        b.set_voltage(0.0).unwrap();
        assert_eq!(b.voltage(), 0.0);
    }
}
