//! Shortest paths over the transit graph
//!
//! All edge weights are non-negative minutes, so plain Dijkstra is exact.
//! Two strategies are offered:
//! 1. Lazy: one search per query, stopped as soon as the target is settled
//! 2. Eager: one full search per stop at construction, trees kept in memory
//!
//! Search state is allocated per call, so a solver can be shared across
//! threads behind `&self`.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use super::graph::{EdgeId, TransitGraph, VertexId};
use super::settings::SolverStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Sum of edge weights, minutes
    pub weight: f64,
    pub edges: Vec<EdgeId>,
}

/// Result of a single-source search: distance and incoming tree edge per vertex
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    dist: Vec<f64>,
    via: Vec<Option<EdgeId>>,
}

impl ShortestPathTree {
    /// Dijkstra from `source`. With a `target`, the search stops once it is
    /// settled and only the path to `target` is guaranteed.
    pub fn search(graph: &TransitGraph, source: VertexId, target: Option<VertexId>) -> Self {
        let n = graph.vertex_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut via = vec![None; n];
        let mut pq: PriorityQueue<VertexId, Reverse<OrderedFloat<f64>>> = PriorityQueue::new();

        dist[source as usize] = 0.0;
        pq.push(source, Reverse(OrderedFloat(0.0)));

        while let Some((u, Reverse(OrderedFloat(d)))) = pq.pop() {
            if d > dist[u as usize] {
                continue;
            }
            if Some(u) == target {
                break;
            }

            for (edge_id, edge) in graph.outgoing(u) {
                let new_dist = d + edge.weight;
                if new_dist < dist[edge.to as usize] {
                    dist[edge.to as usize] = new_dist;
                    via[edge.to as usize] = Some(edge_id);
                    pq.push(edge.to, Reverse(OrderedFloat(new_dist)));
                }
            }
        }

        Self { source, dist, via }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn distance(&self, target: VertexId) -> Option<f64> {
        let d = self.dist[target as usize];
        d.is_finite().then_some(d)
    }

    /// Walk tree edges back from `target` to the source
    pub fn path_to(&self, graph: &TransitGraph, target: VertexId) -> Option<Path> {
        let weight = self.distance(target)?;

        let mut edges = Vec::new();
        let mut vertex = target;
        while vertex != self.source {
            let edge_id = self.via[vertex as usize]?;
            edges.push(edge_id);
            vertex = graph.edge(edge_id).from;
        }
        edges.reverse();

        Some(Path { weight, edges })
    }
}

#[derive(Debug)]
pub enum Solver {
    Lazy,
    /// Trees indexed by stop rank, rooted at each stop's arrival vertex
    Eager(Vec<ShortestPathTree>),
}

impl Solver {
    pub fn new(graph: &TransitGraph, strategy: SolverStrategy) -> Self {
        match strategy {
            SolverStrategy::Lazy => Solver::Lazy,
            SolverStrategy::Eager => {
                let trees: Vec<ShortestPathTree> = (0..graph.stops().len())
                    .map(|rank| ShortestPathTree::search(graph, 2 * rank as VertexId, None))
                    .collect();
                log::info!("Precomputed {} shortest-path trees", trees.len());
                Solver::Eager(trees)
            }
        }
    }

    pub fn strategy(&self) -> SolverStrategy {
        match self {
            Solver::Lazy => SolverStrategy::Lazy,
            Solver::Eager(_) => SolverStrategy::Eager,
        }
    }

    /// Minimum-weight path between two vertices, `None` if disconnected
    pub fn shortest_path(&self, graph: &TransitGraph, from: VertexId, to: VertexId) -> Option<Path> {
        match self {
            Solver::Eager(trees) if from % 2 == 0 => {
                trees[(from / 2) as usize].path_to(graph, to)
            }
            // Only arrival vertices are cached; anything else is searched directly
            _ => ShortestPathTree::search(graph, from, Some(to)).path_to(graph, to),
        }
    }
}
