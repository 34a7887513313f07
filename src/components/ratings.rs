//! Default ratings per component kind and caption formatting.

use super::{Component, ComponentKind};

/// Default electrical parameters of a freshly placed component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    /// Lumped resistance (ohms)
    pub resistance: f64,
    /// Source voltage (volts), batteries only
    pub voltage: f64,
    /// Capacitance (farads), capacitors only
    pub capacitance: f64,
    /// Initial switch state, switches only
    pub closed: bool,
}

impl KindDefaults {
    /// Battery internal resistance.
    pub const BATTERY_RESISTANCE: f64 = 1.0;
    /// Battery voltage (a 9 V block).
    pub const BATTERY_VOLTAGE: f64 = 9.0;
    pub const RESISTOR_RESISTANCE: f64 = 100.0;
    /// LED forward resistance approximation.
    pub const LED_RESISTANCE: f64 = 10.0;
    /// Switch contact resistance.
    pub const SWITCH_RESISTANCE: f64 = 0.1;
    /// Capacitor equivalent series resistance.
    pub const CAPACITOR_RESISTANCE: f64 = 50.0;
    pub const CAPACITOR_CAPACITANCE: f64 = 100e-6;
    /// Ground contact resistance.
    pub const GROUND_RESISTANCE: f64 = 0.1;

    /// Look up the defaults for a kind.
    pub fn for_kind(kind: ComponentKind) -> Self {
        let base = Self {
            resistance: 0.0,
            voltage: 0.0,
            capacitance: 0.0,
            closed: false,
        };
        match kind {
            ComponentKind::Battery => Self {
                resistance: Self::BATTERY_RESISTANCE,
                voltage: Self::BATTERY_VOLTAGE,
                ..base
            },
            ComponentKind::Resistor => Self {
                resistance: Self::RESISTOR_RESISTANCE,
                ..base
            },
            ComponentKind::Led => Self {
                resistance: Self::LED_RESISTANCE,
                ..base
            },
            // Switches start open
            ComponentKind::Switch => Self {
                resistance: Self::SWITCH_RESISTANCE,
                ..base
            },
            ComponentKind::Capacitor => Self {
                resistance: Self::CAPACITOR_RESISTANCE,
                capacitance: Self::CAPACITOR_CAPACITANCE,
                ..base
            },
            ComponentKind::Ground => Self {
                resistance: Self::GROUND_RESISTANCE,
                ..base
            },
        }
    }
}

/// Format a value with an SI prefix, e.g. `4700.0, "Ω"` → `4.7kΩ`.
pub fn format_si(value: f64, unit: &str) -> String {
    const PREFIXES: [(f64, &str); 8] = [
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "k"),
        (1.0, ""),
        (1e-3, "m"),
        (1e-6, "µ"),
        (1e-9, "n"),
        (1e-12, "p"),
    ];

    if value == 0.0 || !value.is_finite() {
        return format!("{}{}", value, unit);
    }

    let magnitude = value.abs();
    let (scale, prefix) = PREFIXES
        .iter()
        .copied()
        // Small tolerance so 100e-6 lands on "100µ" rather than "0.1m"
        .find(|(scale, _)| magnitude >= scale * (1.0 - 1e-9))
        .unwrap_or((1e-12, "p"));

    let text = format!("{:.3}", value / scale);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}{}", text, prefix, unit)
}

pub(super) fn label_for(component: &Component) -> String {
    match component.kind {
        ComponentKind::Battery => format!("Battery {}", format_si(component.voltage, "V")),
        ComponentKind::Resistor => format!("Resistor {}", format_si(component.resistance, "Ω")),
        ComponentKind::Led => "LED".to_string(),
        ComponentKind::Switch => {
            format!("Switch ({})", if component.closed { "Closed" } else { "Open" })
        }
        ComponentKind::Capacitor => {
            format!("Capacitor {}", format_si(component.capacitance, "F"))
        }
        ComponentKind::Ground => "Ground".to_string(),
    }
}
