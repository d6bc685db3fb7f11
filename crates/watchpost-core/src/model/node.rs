// ── Sensor node health ──

use std::fmt;

use indexmap::IndexMap;
use strum::{AsRefStr, Display};

/// Node id → latest reported status.
pub type Nodes = IndexMap<String, NodeRecord>;

/// Latest status the backend holds for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub health: Health,
    pub uptime_s: f64,
    pub last_seen_age_s: f64,
    /// Monotonically increasing per node, as reported by the backend.
    pub last_sequence_number: u64,
}

/// Node health as reported by the backend. Unrecognized values are kept
/// verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Health {
    Ok,
    Degraded,
    Failed,
    Other(String),
}

impl Health {
    /// Wire spelling, exactly as received.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Degraded => "DEGRADED",
            Self::Failed => "FAILED",
            Self::Other(s) => s,
        }
    }

    /// Anything that is neither `OK` nor `FAILED` is drawn as degraded.
    pub fn style_class(&self) -> HealthClass {
        match self {
            Self::Ok => HealthClass::Ok,
            Self::Failed => HealthClass::Failed,
            Self::Degraded | Self::Other(_) => HealthClass::Degraded,
        }
    }
}

impl From<String> for Health {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OK" => Self::Ok,
            "DEGRADED" => Self::Degraded,
            "FAILED" => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Health {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style class of a node's health cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum HealthClass {
    #[strum(serialize = "health-ok")]
    Ok,
    #[strum(serialize = "health-degraded")]
    Degraded,
    #[strum(serialize = "health-failed")]
    Failed,
}
