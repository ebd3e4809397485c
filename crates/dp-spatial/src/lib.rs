//! `dp-spatial` — street map index, map loading, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`hashmap`] | `ExpandableHashMap` (arena-backed, load-factor rehashing)    |
//! | [`network`] | `StreetMap` (coordinate index + CSR + R-tree), builder       |
//! | [`loader`]  | `load_map_file`, `load_map_reader`, `StreetMap::load`        |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`, `DijkstraRouter`     |
//! | [`error`]   | `SpatialError`, `LoadError`, `SpatialResult<T>`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod hashmap;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{LoadError, SpatialError, SpatialResult};
pub use hashmap::ExpandableHashMap;
pub use loader::{load_map_file, load_map_reader};
pub use network::{StreetMap, StreetMapBuilder};
pub use router::{AStarRouter, DijkstraRouter, Route, Router};
