use super::graph::{EdgeKind, TransitGraph};
use super::network::{RouteId, StopId};
use super::solver::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Dwell at `stop` before boarding
    Wait { stop: StopId, duration: f64 },
    /// Ride `route` for `span_count` stops; `duration` covers this ride only
    Ride {
        route: RouteId,
        span_count: u32,
        duration: f64,
    },
}

impl Segment {
    pub fn duration(&self) -> f64 {
        match *self {
            Segment::Wait { duration, .. } | Segment::Ride { duration, .. } => duration,
        }
    }
}

/// Fastest way between two stops, as ordered wait/ride segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    /// Minutes
    pub total_time: f64,
    pub segments: Vec<Segment>,
}

impl Itinerary {
    /// Zero-length itinerary for a trip that starts where it ends
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode an edge path using the kind recorded on each edge.
    pub fn decode(path: &Path, graph: &TransitGraph) -> Self {
        let segments = path
            .edges
            .iter()
            .map(|&edge_id| {
                let edge = graph.edge(edge_id);
                match edge.kind {
                    EdgeKind::Wait { stop } => Segment::Wait {
                        stop,
                        duration: edge.weight,
                    },
                    EdgeKind::Ride { route, span_count } => Segment::Ride {
                        route,
                        span_count,
                        duration: edge.weight,
                    },
                }
            })
            .collect();

        Self {
            total_time: path.weight,
            segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of distinct rides, i.e. transfers + 1
    pub fn ride_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Ride { .. }))
            .count()
    }
}
