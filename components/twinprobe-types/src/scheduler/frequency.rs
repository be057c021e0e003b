use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Unit the cadence of a scheduled task is expressed in.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum FrequencyUnit {
    Minutes,
    Hours,
    Days,
}

impl FrequencyUnit {
    /// Returns the unit tag used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnit::Minutes => "MINUTES",
            FrequencyUnit::Hours => "HOURS",
            FrequencyUnit::Days => "DAYS",
        }
    }
}

impl Display for FrequencyUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MINUTES" => Ok(FrequencyUnit::Minutes),
            "HOURS" => Ok(FrequencyUnit::Hours),
            "DAYS" => Ok(FrequencyUnit::Days),
            _ => Err(format!("unknown frequency unit: {s}")),
        }
    }
}

/// Cadence of a scheduled task: `value` units of `unit` between consecutive due times.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Frequency {
    /// Unit the cadence is expressed in.
    pub unit: FrequencyUnit,
    /// Positive number of units between consecutive due times.
    pub value: u32,
}
