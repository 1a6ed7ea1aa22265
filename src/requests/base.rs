//! `base_requests`: stops, road distances and bus lines

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::geo::Coordinates;
use crate::core::network::{Network, NetworkBuilder};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        /// Meters from this stop to each named neighbour
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// Ingest base requests into a frozen network.
///
/// Stops are registered first, then distances, then buses, so a request may
/// reference a stop declared later in the array.
pub fn build_network(requests: &[BaseRequest]) -> Result<Network> {
    let mut builder = NetworkBuilder::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            builder.add_stop(name.as_str(), Coordinates::new(*latitude, *longitude))?;
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            for (neighbour, meters) in road_distances {
                builder.set_distance(name, neighbour, *meters)?;
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            builder.add_route(name.as_str(), stops.as_slice(), *is_roundtrip)?;
        }
    }

    Ok(builder.build())
}
