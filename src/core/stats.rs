//! Route statistics and stop lookups over a frozen network

use std::collections::HashSet;

use super::error::{Error, Result};
use super::geo::haversine_distance;
use super::network::{Network, RouteId};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStats {
    /// Stops visited along the travel sequence, repeats included
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length in meters
    pub route_length: u64,
    /// Great-circle length in meters
    pub geo_length: f64,
    /// `route_length / geo_length`, 1.0 when every stop shares one position
    pub curvature: f64,
}

impl Network {
    pub fn route_stats(&self, name: &str) -> Result<RouteStats> {
        let id = self
            .find_route(name)
            .ok_or_else(|| Error::RouteNotFound(name.to_string()))?;
        self.route_stats_by_id(id)
    }

    pub fn route_stats_by_id(&self, id: RouteId) -> Result<RouteStats> {
        let stops = &self.route(id).stops;

        let unique_stop_count = stops.iter().collect::<HashSet<_>>().len();

        let mut route_length = 0u64;
        let mut geo_length = 0.0;
        for pair in stops.windows(2) {
            route_length += u64::from(self.directed_distance(pair[0], pair[1])?);
            geo_length += haversine_distance(
                self.stop(pair[0]).coordinates,
                self.stop(pair[1]).coordinates,
            );
        }

        let curvature = if geo_length > 0.0 {
            route_length as f64 / geo_length
        } else {
            1.0
        };

        Ok(RouteStats {
            stop_count: stops.len(),
            unique_stop_count,
            route_length,
            geo_length,
            curvature,
        })
    }

    /// Names of the routes serving a stop, ascending.
    ///
    /// A known stop that no route visits yields an empty list.
    pub fn stop_routes(&self, name: &str) -> Result<Vec<&str>> {
        let stop = self
            .find_stop(name)
            .ok_or_else(|| Error::StopNotFound(name.to_string()))?;
        let mut names: Vec<&str> = self
            .routes_at(stop)
            .map(|route| self.route(route).name.as_str())
            .collect();
        names.sort_unstable();
        Ok(names)
    }
}
