#![forbid(unsafe_code)]
//! pathfinder-core library.
//!
//! Random weighted undirected graphs, rejection-sampling layouts and
//! shortest paths.
//!
//! # Conventions
//!
//! - **Errors**: one `thiserror` enum per module; nothing in here panics or
//!   terminates the process.
//! - **Logging**: `tracing` macros (`debug!`, `trace!`, `warn!`).
//! - **Randomness**: always injected through [`rng::RandomSource`].

pub mod config;
pub mod graph;
pub mod labels;
pub mod layout;
pub mod path;
pub mod render;
pub mod rng;
pub mod scene;

pub use config::{Config, ConfigError, WeightMode};
pub use graph::{EdgeKey, Graph, GraphBuilder, GraphError, GraphStats};
pub use labels::{ALPHABET, LabelAllocator};
pub use layout::{Bounds, Circle, Layout, LayoutEngine, LayoutError, Placement};
pub use path::{PathError, PathResult, Route, shortest_path};
pub use rng::{DeterministicRng, RandomSource};
pub use scene::{Scene, SceneError};
