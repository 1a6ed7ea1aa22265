//! # Butterfly-transit
//!
//! Transit network catalogue and fastest-itinerary router.
//!
//! A network is ingested into a [`NetworkBuilder`], frozen with
//! [`NetworkBuilder::build`], then handed to [`TransitRouter::new`], which
//! builds a wait/ride graph over it and answers point-to-point queries.
//!
//! ```
//! use butterfly_transit::{Coordinates, NetworkBuilder, RoutingSettings, TransitRouter};
//!
//! let mut builder = NetworkBuilder::new();
//! builder.add_stop("A", Coordinates::new(55.61, 37.20))?;
//! builder.add_stop("B", Coordinates::new(55.59, 37.21))?;
//! builder.set_distance("A", "B", 2000)?;
//! builder.add_route("14", &["A", "B"], false)?;
//!
//! let router = TransitRouter::new(builder.build(), RoutingSettings::new(6.0, 60.0)?)?;
//! let itinerary = router.build_route("A", "B").expect("A and B are connected");
//! assert_eq!(itinerary.total_time, 8.0);
//! # Ok::<(), butterfly_transit::Error>(())
//! ```

pub mod core;
pub mod requests;

pub use crate::core::error::{Error, QueryError, Result};
pub use crate::core::geo::Coordinates;
pub use crate::core::{
    Itinerary, Network, NetworkBuilder, RouteStats, RoutingSettings, Segment, SettingsOverride,
    SolverStrategy, TransitRouter,
};
