//! Domain identifiers.
//!
//! # 連番 ID
//! TaskId はストアが 1 から順に払い出す整数です。削除された ID は再利用しません。
//! newtype で包んでいるので、件数やインデックスを ID として渡すことはできません。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a Task inside one store.
///
/// Allocated by the store starting at 1. `TaskId::PLACEHOLDER` (0) marks a
/// task value that has not been inserted yet (e.g. a recurrence successor).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Sentinel for "not yet assigned by a store".
    pub const PLACEHOLDER: TaskId = TaskId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn is_placeholder(self) -> bool {
        self == Self::PLACEHOLDER
    }

    /// The id that follows this one.
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_zero() {
        assert!(TaskId::PLACEHOLDER.is_placeholder());
        assert!(!TaskId::new(1).is_placeholder());
        assert_eq!(TaskId::PLACEHOLDER.get(), 0);
    }

    #[test]
    fn ids_order_numerically() {
        let a = TaskId::new(2);
        let b = TaskId::new(10);
        assert!(a < b);
        assert_eq!(a.next(), TaskId::new(3));
    }

    #[test]
    fn parses_from_console_input() {
        assert_eq!(" 42 ".parse::<TaskId>().unwrap(), TaskId::new(42));
        assert!("abc".parse::<TaskId>().is_err());
        assert!("-1".parse::<TaskId>().is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let s = serde_json::to_string(&TaskId::new(7)).unwrap();
        assert_eq!(s, "7");
        let back: TaskId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, TaskId::new(7));
    }
}
