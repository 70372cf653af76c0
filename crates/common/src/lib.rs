//! # Tether Common
//!
//! Core of the Tether auto-binding subsystem: reference fields on
//! scene-graph nodes declare how their value should be located, and the
//! resolution engine computes it instead of the author wiring it by hand.
//!
//! ## Modules
//!
//! - `classes`: node base and the built-in attachable component family
//! - `registry`: serialized class tag → runtime class resolution
//! - `fields`: per-node serialized reference-field state
//! - `sources`: the closed set of bind-source descriptors
//! - `lookup`: scene-graph capability boundary + World-backed adapter
//! - `resolve`: bind-source dispatch
//! - `sync`: ordered reference-collection convergence
//!
//! ## Architecture
//!
//! The resolution engine never touches the scene graph directly; everything
//! goes through the [`SceneLookup`] trait, so the same engine runs against
//! the live editor world and the in-memory worlds the tests build. The
//! editor glue (inspector pass, persisted toggle, highlight) lives in
//! `tether-engine` and stays thin: it only decides *when* to resolve and
//! where results are written.

pub mod classes;
pub mod fields;
pub mod lookup;
pub mod registry;
pub mod resolve;
pub mod sources;
pub mod sync;

// Re-export the working set for convenience
pub use classes::{AudioEmitter, Collider, PathFollower, SceneNode, Sprite};
pub use fields::{AssetRef, FieldValue, Fields};
pub use lookup::{AssetCatalog, SceneLookup, WorldSceneLookup};
pub use registry::{BindClass, ClassRegistry};
pub use resolve::{resolve, BindError, Resolution};
pub use sources::{BindDecl, BindSource, Bindings};
pub use sync::sync_refs;
