//! Robot capability tags.
//!
//! Capabilities describe what a robot *can do*, not what type of robot it is.
//! They are orthogonal (a robot may carry any combination), static for the
//! lifetime of a run, and used for task feasibility: a task declares the
//! capabilities it requires and only robots whose capability set is a
//! superset may be assigned.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A closed enumeration of robot capability tags.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Capability {
    /// Optical sensing for inspection, navigation, and anomaly detection.
    Vision,
    /// Physical interaction with objects (gripping, moving, assembling).
    Manipulation,
    /// Environmental data collection beyond vision (temperature, chemical, acoustic).
    Sensing,
    /// Maintenance and repair operations on equipment or other robots.
    Repair,
    /// Power transfer to other robots or equipment.
    Charging,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 5] = [
        Capability::Vision,
        Capability::Manipulation,
        Capability::Sensing,
        Capability::Repair,
        Capability::Charging,
    ];

    /// The wire/scenario-file spelling of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Vision => "vision",
            Capability::Manipulation => "manipulation",
            Capability::Sensing => "sensing",
            Capability::Repair => "repair",
            Capability::Charging => "charging",
        }
    }
}

impl FromStr for Capability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vision" => Ok(Capability::Vision),
            "manipulation" => Ok(Capability::Manipulation),
            "sensing" => Ok(Capability::Sensing),
            "repair" => Ok(Capability::Repair),
            "charging" => Ok(Capability::Charging),
            other => Err(CoreError::UnknownCapability(other.to_owned())),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
