//! Deferred resort scheduling for the user-list engine.
//!
//! Identity updates arrive in bursts - a directory refresh can touch many
//! records at once - and resorting on every one is wasteful and visually
//! noisy. [`ResortScheduler`] coalesces a burst into a single full resort
//! after a quiet period.

mod scheduler;

pub use scheduler::{ResortScheduler, DEFAULT_DEBOUNCE};
