//! tangle-runtime: Tokio driver for the tangle coordination core
//!
//! Everything stateful lives in `tangle-core`; this crate only supplies the
//! wall-clock event loop that turns queued timers into real sleeps.

pub mod driver;

pub use driver::Driver;
