//! Time abstractions: the [`Clock`](clock::Clock) port, its system and
//! fixed implementations, and the 05:00 logical-day boundary.

pub mod clock;
pub mod fixed_clock;
pub mod local;
pub mod logical_day;
pub mod system_clock;

pub use clock::Clock;
pub use fixed_clock::FixedClock;
pub use system_clock::SystemClock;
