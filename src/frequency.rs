//! A frequency value, always held in \[Hz\].

use std::fmt::Display;

use log::debug;

/// The factor converting a value in `unit` to \[Hz\].
///
/// Matching is exact and case-sensitive. Any token that isn't recognised is
/// treated as Hz rather than rejected; callers have always relied on this.
pub fn unit_factor(unit: &str) -> f64 {
    match unit {
        "GHz" => 1e9,
        "MHz" => 1e6,
        "kHz" => 1e3,
        "Hz" => 1.0,
        _ => {
            debug!("Unrecognised frequency unit '{unit}'; assuming Hz");
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Frequency {
    hz: f64,
}

impl Frequency {
    /// Make a new [`Frequency`] from a value in the given unit (e.g. "GHz").
    pub fn new(value: f64, unit: &str) -> Frequency {
        Frequency {
            hz: value * unit_factor(unit),
        }
    }

    pub fn from_hz(hz: f64) -> Frequency {
        Frequency { hz }
    }

    /// The frequency \[Hz\].
    pub fn get(&self) -> f64 {
        self.hz
    }

    /// The frequency expressed in the given unit.
    pub fn get_in(&self, unit: &str) -> f64 {
        self.hz / unit_factor(unit)
    }
}

impl From<f64> for Frequency {
    fn from(hz: f64) -> Frequency {
        Frequency::from_hz(hz)
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.hz)
    }
}
