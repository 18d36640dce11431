//! Recurrence patterns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a task repeats once completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn is_recurring(self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Resolve a free-text spelling (case-insensitive).
    ///
    /// Anything other than `daily`, `weekly` or `monthly` resolves to
    /// `Recurrence::None` instead of failing.
    pub fn from_spelling(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "daily" => Recurrence::Daily,
            "weekly" => Recurrence::Weekly,
            "monthly" => Recurrence::Monthly,
            _ => Recurrence::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
