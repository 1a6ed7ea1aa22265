//! Queryable transit router
//!
//! [`TransitRouter::new`] consumes a frozen [`Network`], builds the graph and
//! initializes the solver. It is the only way to obtain something that answers
//! route queries, so a query can never run against a half-built network.

use std::time::Instant;

use super::error::{QueryError, Result};
use super::graph::{TransitGraph, VertexId};
use super::itinerary::Itinerary;
use super::network::Network;
use super::settings::RoutingSettings;
use super::solver::Solver;

#[derive(Debug)]
pub struct TransitRouter {
    network: Network,
    settings: RoutingSettings,
    graph: TransitGraph,
    solver: Solver,
}

impl TransitRouter {
    pub fn new(network: Network, settings: RoutingSettings) -> Result<Self> {
        let started = Instant::now();
        let graph = TransitGraph::build(&network, &settings)?;
        let solver = Solver::new(&graph, settings.strategy);
        log::info!(
            "Transit router ready in {:.3}s ({:?} solver)",
            started.elapsed().as_secs_f64(),
            settings.strategy
        );

        Ok(Self {
            network,
            settings,
            graph,
            solver,
        })
    }

    /// Fastest itinerary from `from` to `to`.
    ///
    /// Both stops must be served by at least one route. Asking for a trip to
    /// the same stop returns an empty itinerary.
    pub fn build_route(&self, from: &str, to: &str) -> std::result::Result<Itinerary, QueryError> {
        let source = self.arrival_vertex(from)?;
        let target = self.arrival_vertex(to)?;

        if source == target {
            return Ok(Itinerary::empty());
        }

        match self.solver.shortest_path(&self.graph, source, target) {
            Some(path) => {
                let itinerary = Itinerary::decode(&path, &self.graph);
                log::debug!(
                    "Route {from} -> {to}: {:.2} min, {} segments",
                    itinerary.total_time,
                    itinerary.segments.len()
                );
                Ok(itinerary)
            }
            None => {
                log::debug!("Route {from} -> {to}: no path");
                Err(QueryError::NoPath {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        }
    }

    /// Arrival vertex of a stop served by at least one route
    fn arrival_vertex(&self, name: &str) -> std::result::Result<VertexId, QueryError> {
        self.network
            .find_stop(name)
            .and_then(|stop| self.graph.arrival_vertex(stop))
            .ok_or_else(|| QueryError::StopNotFound(name.to_string()))
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }
}
