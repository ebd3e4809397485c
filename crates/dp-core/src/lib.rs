//! `dp-core` — foundational types for the `rust_dp` delivery planner.
//!
//! This crate is a dependency of every other `dp-*` crate.  It has no `dp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`geo`]      | `GeoCoord`, great-circle miles, planar bearings        |
//! | [`street`]   | `StreetSegment`, `DeliveryRequest`                     |
//! | [`ids`]      | `NodeId`, `SegmentId`                                  |
//! | [`config`]   | `PlannerConfig`, `IndexConfig`, `AnnealingConfig`      |
//! | [`rng`]      | `PlannerRng`                                           |
//! | [`error`]    | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod street;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AnnealingConfig, IndexConfig, PlannerConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GeoCoord;
pub use ids::{NodeId, SegmentId};
pub use rng::PlannerRng;
pub use street::{DeliveryRequest, StreetSegment};
