//! Ports - 外部世界との境界
//!
//! コアは完全にインメモリなので、外部依存は時計だけです。

pub mod clock;

pub use self::clock::{Clock, FixedClock, SystemClock};
