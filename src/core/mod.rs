//! Core library modules for butterfly-transit
//!
//! Network store, graph construction, shortest paths and itinerary decoding.

pub mod error;
pub mod geo;
pub mod graph;
pub mod itinerary;
pub mod network;
pub mod router;
pub mod settings;
pub mod solver;
pub mod stats;

pub use graph::{Edge, EdgeKind, TransitGraph};
pub use itinerary::{Itinerary, Segment};
pub use network::{Network, NetworkBuilder, Route, RouteId, Stop, StopId};
pub use router::TransitRouter;
pub use settings::{RoutingSettings, SettingsOverride, SolverStrategy};
pub use stats::RouteStats;
