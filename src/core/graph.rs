//! Transit routing graph
//!
//! Every reachable stop owns two vertices: arrival (`2k`) and departure
//! (`2k + 1`), `k` being the stop's rank in name order. A wait edge joins them.
//! Ride edges go from the departure vertex of a stop to the arrival vertex of
//! every later stop on the same route, carrying the cumulative travel time.
//! Edge kinds are tagged at construction and never derived from weights.

use std::collections::HashMap;

use super::error::Result;
use super::network::{Network, RouteId, StopId};
use super::settings::RoutingSettings;

pub type VertexId = u32;
pub type EdgeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Wait { stop: StopId },
    Ride { route: RouteId, span_count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    /// Minutes
    pub weight: f64,
    pub kind: EdgeKind,
}

/// Flat outgoing adjacency: edges of vertex `v` are
/// `edge_ids[offsets[v]..offsets[v + 1]]`
#[derive(Debug, Clone)]
struct FlatAdjacency {
    offsets: Vec<u32>,
    edge_ids: Vec<EdgeId>,
}

impl FlatAdjacency {
    fn from_edges(n_vertices: usize, edges: &[Edge]) -> Self {
        let mut offsets = vec![0u32; n_vertices + 1];
        for edge in edges {
            offsets[edge.from as usize + 1] += 1;
        }
        for v in 0..n_vertices {
            offsets[v + 1] += offsets[v];
        }

        let mut cursor = offsets.clone();
        let mut edge_ids = vec![0; edges.len()];
        for (id, edge) in edges.iter().enumerate() {
            let slot = &mut cursor[edge.from as usize];
            edge_ids[*slot as usize] = id as EdgeId;
            *slot += 1;
        }

        Self { offsets, edge_ids }
    }

    #[inline]
    fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        let start = self.offsets[vertex as usize] as usize;
        let end = self.offsets[vertex as usize + 1] as usize;
        &self.edge_ids[start..end]
    }
}

#[derive(Debug, Clone)]
pub struct TransitGraph {
    edges: Vec<Edge>,
    adjacency: FlatAdjacency,
    /// Stop at rank `k` owns vertices `2k` and `2k + 1`
    rank_to_stop: Vec<StopId>,
    stop_to_rank: HashMap<StopId, u32>,
}

impl TransitGraph {
    /// Build the graph from a frozen network.
    ///
    /// Fails with `MissingDistance` if two consecutive stops of any route have
    /// no road distance in either direction.
    pub fn build(network: &Network, settings: &RoutingSettings) -> Result<Self> {
        settings.validate()?;

        let rank_to_stop = network.reachable_stops();
        let stop_to_rank: HashMap<StopId, u32> = rank_to_stop
            .iter()
            .enumerate()
            .map(|(rank, &stop)| (stop, rank as u32))
            .collect();

        let mut edges = Vec::with_capacity(rank_to_stop.len());
        for (rank, &stop) in rank_to_stop.iter().enumerate() {
            let arrival = 2 * rank as VertexId;
            edges.push(Edge {
                from: arrival,
                to: arrival + 1,
                weight: settings.bus_wait_time,
                kind: EdgeKind::Wait { stop },
            });
        }

        let velocity = settings.meters_per_minute();
        for route_id in network.routes() {
            let stops = &network.route(route_id).stops;

            // Minutes between consecutive stops
            let hops = stops
                .windows(2)
                .map(|pair| {
                    network
                        .directed_distance(pair[0], pair[1])
                        .map(|meters| f64::from(meters) / velocity)
                })
                .collect::<Result<Vec<f64>>>()?;

            for start in 0..stops.len() {
                let departure = 2 * stop_to_rank[&stops[start]] + 1;
                let mut elapsed = 0.0;
                for end in start + 1..stops.len() {
                    elapsed += hops[end - 1];
                    edges.push(Edge {
                        from: departure,
                        to: 2 * stop_to_rank[&stops[end]],
                        weight: elapsed,
                        kind: EdgeKind::Ride {
                            route: route_id,
                            span_count: (end - start) as u32,
                        },
                    });
                }
            }
        }

        let n_vertices = 2 * rank_to_stop.len();
        let adjacency = FlatAdjacency::from_edges(n_vertices, &edges);

        log::info!(
            "Built transit graph: {} vertices, {} edges ({} stops, {} routes)",
            n_vertices,
            edges.len(),
            rank_to_stop.len(),
            network.route_count()
        );

        Ok(Self {
            edges,
            adjacency,
            rank_to_stop,
            stop_to_rank,
        })
    }

    pub fn vertex_count(&self) -> usize {
        2 * self.rank_to_stop.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id as usize]
    }

    pub fn outgoing(&self, vertex: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.adjacency
            .outgoing(vertex)
            .iter()
            .map(move |&id| (id, &self.edges[id as usize]))
    }

    /// Arrival vertex of a stop, `None` if no route serves it
    pub fn arrival_vertex(&self, stop: StopId) -> Option<VertexId> {
        self.stop_to_rank.get(&stop).map(|rank| 2 * rank)
    }

    pub fn departure_vertex(&self, stop: StopId) -> Option<VertexId> {
        self.arrival_vertex(stop).map(|v| v + 1)
    }

    pub fn vertex_stop(&self, vertex: VertexId) -> StopId {
        self.rank_to_stop[(vertex / 2) as usize]
    }

    /// Stops in vertex order
    pub fn stops(&self) -> &[StopId] {
        &self.rank_to_stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::geo::Coordinates;
    use crate::core::network::NetworkBuilder;

    fn settings() -> RoutingSettings {
        // 1000 m/min
        RoutingSettings::new(5.0, 60.0).unwrap()
    }

    fn line_network(is_roundtrip: bool) -> Network {
        let mut builder = NetworkBuilder::new();
        for name in ["A", "B", "C", "Depot"] {
            builder.add_stop(name, Coordinates::new(0.0, 0.0)).unwrap();
        }
        builder.set_distance("A", "B", 1000).unwrap();
        builder.set_distance("B", "C", 2000).unwrap();
        builder.add_route("R", &["A", "B", "C"], is_roundtrip).unwrap();
        builder.build()
    }

    #[test]
    fn unserved_stops_get_no_vertices() {
        let network = line_network(true);
        let graph = TransitGraph::build(&network, &settings()).unwrap();

        assert_eq!(graph.vertex_count(), 6);
        let depot = network.find_stop("Depot").unwrap();
        assert_eq!(graph.arrival_vertex(depot), None);

        let a = network.find_stop("A").unwrap();
        assert_eq!(graph.arrival_vertex(a), Some(0));
        assert_eq!(graph.departure_vertex(a), Some(1));
        assert_eq!(graph.vertex_stop(1), a);
    }

    #[test]
    fn one_wait_edge_per_stop_and_all_pairs_ride_edges() {
        let network = line_network(true);
        let graph = TransitGraph::build(&network, &settings()).unwrap();

        let waits = (0..graph.edge_count() as EdgeId)
            .filter(|&id| matches!(graph.edge(id).kind, EdgeKind::Wait { .. }))
            .count();
        assert_eq!(waits, 3);
        // A-B, A-C, B-C
        assert_eq!(graph.edge_count(), 3 + 3);

        let a = network.find_stop("A").unwrap();
        let c = network.find_stop("C").unwrap();
        let from = graph.departure_vertex(a).unwrap();
        let to = graph.arrival_vertex(c).unwrap();
        let (_, edge) = graph
            .outgoing(from)
            .find(|(_, e)| e.to == to)
            .expect("ride edge A -> C");
        assert_eq!(edge.weight, 3.0);
        assert!(matches!(edge.kind, EdgeKind::Ride { span_count: 2, .. }));
    }

    #[test]
    fn wait_edge_weight_is_configured_wait_time() {
        let network = line_network(true);
        let graph = TransitGraph::build(&network, &settings()).unwrap();
        let b = network.find_stop("B").unwrap();
        let arrival = graph.arrival_vertex(b).unwrap();

        let out: Vec<_> = graph.outgoing(arrival).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1.weight, 5.0);
        assert_eq!(out[0].1.kind, EdgeKind::Wait { stop: b });
    }

    #[test]
    fn one_way_route_uses_reverse_fallback_on_the_return_leg() {
        let network = line_network(false);
        let graph = TransitGraph::build(&network, &settings()).unwrap();

        // travel sequence A B C B A: 10 ride edges + 3 waits
        assert_eq!(graph.edge_count(), 13);

        let c = network.find_stop("C").unwrap();
        let a = network.find_stop("A").unwrap();
        let from = graph.departure_vertex(c).unwrap();
        let to = graph.arrival_vertex(a).unwrap();
        let (_, edge) = graph.outgoing(from).find(|(_, e)| e.to == to).unwrap();
        assert_eq!(edge.weight, 3.0);
    }

    #[test]
    fn missing_distance_aborts_construction() {
        let mut builder = NetworkBuilder::new();
        for name in ["A", "B", "C"] {
            builder.add_stop(name, Coordinates::new(0.0, 0.0)).unwrap();
        }
        builder.set_distance("A", "B", 1000).unwrap();
        builder.add_route("R", &["A", "B", "C"], true).unwrap();
        let network = builder.build();

        match TransitGraph::build(&network, &settings()) {
            Err(Error::MissingDistance { from, to }) => {
                assert_eq!(from, "B");
                assert_eq!(to, "C");
            }
            other => panic!("expected MissingDistance, got {other:?}"),
        }
    }

    #[test]
    fn flat_adjacency_groups_edges_by_source() {
        let stop = NetworkBuilder::new()
            .add_stop("X", Coordinates::new(0.0, 0.0))
            .unwrap();
        let edge = |from, to| Edge {
            from,
            to,
            weight: 1.0,
            kind: EdgeKind::Wait { stop },
        };
        let edges = vec![edge(1, 0), edge(0, 1), edge(1, 2)];

        let adjacency = FlatAdjacency::from_edges(3, &edges);
        assert_eq!(adjacency.outgoing(0), &[1]);
        assert_eq!(adjacency.outgoing(1), &[0, 2]);
        assert!(adjacency.outgoing(2).is_empty());
    }
}
