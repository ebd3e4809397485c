//! `dp-planner` — delivery plans for the rust_dp delivery planner.
//!
//! Ties the other crates together: orders the stops with `dp-optimize`,
//! routes each leg with a `dp-spatial` router, and converts the routed
//! segments into driving commands.
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`planner`]      | `DeliveryPlanner`, `DeliveryPlan`, `PlanJob`          |
//! | [`instructions`] | `CommandBuilder` (segments → commands)                |
//! | [`command`]      | `DeliveryCommand`, `CompassDirection`, `TurnDirection`|
//! | [`manifest`]     | `DeliveryManifest`, manifest file loader              |
//! | [`error`]        | `PlanError`, `ManifestError`, `PlanResult<T>`         |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `plan_batch` runs jobs on Rayon's thread pool.            |
//! | `serde`    | Derives `Serialize`/`Deserialize` on plans and commands.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dp_planner::{DeliveryManifest, DeliveryPlanner};
//! use dp_spatial::StreetMap;
//!
//! let map = StreetMap::load(Path::new("mapdata.txt"))?;
//! let manifest = DeliveryManifest::load(Path::new("deliveries.txt"))?;
//! let plan = DeliveryPlanner::new(&map)
//!     .generate_delivery_plan(&manifest.depot, &manifest.requests)?;
//! for cmd in &plan.commands {
//!     println!("{cmd}");
//! }
//! ```

pub mod command;
pub mod error;
pub mod instructions;
pub mod manifest;
pub mod planner;


pub use command::{CompassDirection, DeliveryCommand, TurnDirection};
pub use error::{ManifestError, PlanError, PlanResult};
pub use instructions::CommandBuilder;
pub use manifest::{DeliveryManifest, load_manifest_file, load_manifest_reader};
pub use planner::{DeliveryPlan, DeliveryPlanner, PlanJob};
