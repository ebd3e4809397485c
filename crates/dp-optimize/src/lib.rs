//! `dp-optimize` — delivery order optimization.
//!
//! Chooses the order in which to visit a set of delivery requests so that
//! the straight-line round trip from the depot is as short as simulated
//! annealing can make it.  Road routing happens later, in `dp-planner`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`annealing`] | `DeliveryOptimizer`, `OptimizedOrder`                   |
//! | [`tour`]      | `tour_miles` (crow-flight energy)                       |
//! | [`observer`]  | `AnnealingObserver`, `AnnealingStats`, `NoopObserver`   |
//! | [`error`]     | `OptimizeError`, `OptimizeResult<T>`                    |

pub mod annealing;
pub mod error;
pub mod observer;
pub mod tour;

#[cfg(test)]
mod tests;

pub use annealing::{DeliveryOptimizer, OptimizedOrder};
pub use error::{OptimizeError, OptimizeResult};
pub use observer::{AnnealingObserver, AnnealingStats, NoopObserver};
pub use tour::tour_miles;
