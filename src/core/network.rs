//! Transit network store
//!
//! Stops and routes live in arenas addressed by dense integer ids, with a name
//! index on top. The store has two phases: a mutable [`NetworkBuilder`] used
//! during ingestion, and an immutable [`Network`] produced by
//! [`NetworkBuilder::build`] that the router and statistics read from.

use std::collections::{BTreeSet, HashMap};

use super::error::{Error, Result};
use super::geo::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(u32);

impl StopId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl RouteId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    /// Traversable sequence; one-way routes already include the return leg
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

/// Expand a declared stop list into the sequence a bus actually travels.
///
/// `[A, B, C]` one-way becomes `[A, B, C, B, A]`; round-trip lists are kept.
pub fn travel_sequence<T: Clone>(stops: &[T], is_roundtrip: bool) -> Vec<T> {
    let mut sequence = stops.to_vec();
    if !is_roundtrip && stops.len() > 1 {
        sequence.extend(stops.iter().rev().skip(1).cloned());
    }
    sequence
}

/// Mutable network used during ingestion
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    routes: Vec<Route>,
    route_index: HashMap<String, RouteId>,
    distances: HashMap<(StopId, StopId), u32>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, name: impl Into<String>, coordinates: Coordinates) -> Result<StopId> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            return Err(Error::DuplicateStop(name));
        }
        let id = StopId(self.stops.len() as u32);
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop { name, coordinates });
        Ok(id)
    }

    /// Record the road distance from `from` to `to` in meters.
    ///
    /// Only this direction is stored; the opposite direction stays undefined
    /// until set explicitly.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<()> {
        let from = self.stop_id(from)?;
        let to = self.stop_id(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    pub fn add_route<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        stops: &[S],
        is_roundtrip: bool,
    ) -> Result<RouteId> {
        let name = name.into();
        if self.route_index.contains_key(&name) {
            return Err(Error::DuplicateRoute(name));
        }
        if stops.is_empty() {
            return Err(Error::EmptyRoute(name));
        }

        let declared = stops
            .iter()
            .map(|stop| self.stop_id(stop.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let id = RouteId(self.routes.len() as u32);
        self.route_index.insert(name.clone(), id);
        self.routes.push(Route {
            name,
            stops: travel_sequence(&declared, is_roundtrip),
            is_roundtrip,
        });
        Ok(id)
    }

    fn stop_id(&self, name: &str) -> Result<StopId> {
        self.stop_index
            .get(name)
            .copied()
            .ok_or_else(|| Error::StopNotFound(name.to_string()))
    }

    /// Freeze the network. No stop, route or distance can be added afterwards.
    pub fn build(self) -> Network {
        let mut stop_routes = vec![BTreeSet::new(); self.stops.len()];
        for (index, route) in self.routes.iter().enumerate() {
            for stop in &route.stops {
                stop_routes[stop.index()].insert(RouteId(index as u32));
            }
        }

        log::debug!(
            "Network frozen: {} stops, {} routes, {} road distances",
            self.stops.len(),
            self.routes.len(),
            self.distances.len()
        );

        Network {
            stops: self.stops,
            stop_index: self.stop_index,
            routes: self.routes,
            route_index: self.route_index,
            distances: self.distances,
            stop_routes,
        }
    }
}

/// Immutable, fully ingested transit network
#[derive(Debug)]
pub struct Network {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    routes: Vec<Route>,
    route_index: HashMap<String, RouteId>,
    distances: HashMap<(StopId, StopId), u32>,
    stop_routes: Vec<BTreeSet<RouteId>>,
}

impl Network {
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.index()]
    }

    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn find_route(&self, name: &str) -> Option<RouteId> {
        self.route_index.get(name).copied()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Routes passing through `stop`, in id order
    pub fn routes_at(&self, stop: StopId) -> impl Iterator<Item = RouteId> + '_ {
        self.stop_routes[stop.index()].iter().copied()
    }

    pub fn is_reachable(&self, stop: StopId) -> bool {
        !self.stop_routes[stop.index()].is_empty()
    }

    /// Stops referenced by at least one route, ordered by name
    pub fn reachable_stops(&self) -> Vec<StopId> {
        let mut ids: Vec<StopId> = (0..self.stops.len() as u32)
            .map(StopId)
            .filter(|&id| self.is_reachable(id))
            .collect();
        ids.sort_by(|a, b| self.stop(*a).name.cmp(&self.stop(*b).name));
        ids
    }

    /// All routes, ordered by name
    pub fn routes(&self) -> Vec<RouteId> {
        let mut ids: Vec<RouteId> = (0..self.routes.len() as u32).map(RouteId).collect();
        ids.sort_by(|a, b| self.route(*a).name.cmp(&self.route(*b).name));
        ids
    }

    /// Road distance from `from` to `to`, falling back to the opposite direction.
    pub fn directed_distance(&self, from: StopId, to: StopId) -> Result<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .ok_or_else(|| Error::MissingDistance {
                from: self.stop(from).name.clone(),
                to: self.stop(to).name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinates {
        Coordinates::new(0.0, 0.0)
    }

    fn three_stops() -> NetworkBuilder {
        let mut builder = NetworkBuilder::new();
        for name in ["C", "A", "B"] {
            builder.add_stop(name, origin()).unwrap();
        }
        builder
    }

    #[test]
    fn one_way_routes_include_the_return_leg() {
        assert_eq!(travel_sequence(&["A", "B", "C"], false), vec!["A", "B", "C", "B", "A"]);
        assert_eq!(travel_sequence(&["A", "B", "C", "A"], true), vec!["A", "B", "C", "A"]);
        assert_eq!(travel_sequence(&["A"], false), vec!["A"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut builder = three_stops();
        assert!(matches!(
            builder.add_stop("A", origin()),
            Err(Error::DuplicateStop(name)) if name == "A"
        ));

        builder.add_route("R", &["A", "B"], true).unwrap();
        assert!(matches!(
            builder.add_route("R", &["B", "C"], true),
            Err(Error::DuplicateRoute(_))
        ));
    }

    #[test]
    fn routes_must_reference_known_stops() {
        let mut builder = three_stops();
        assert!(matches!(
            builder.add_route("R", &["A", "Z"], false),
            Err(Error::StopNotFound(name)) if name == "Z"
        ));
        let no_stops: [&str; 0] = [];
        assert!(matches!(
            builder.add_route("E", &no_stops, false),
            Err(Error::EmptyRoute(_))
        ));
        assert!(matches!(
            builder.set_distance("A", "Z", 10),
            Err(Error::StopNotFound(_))
        ));
    }

    #[test]
    fn distances_are_directed_with_reverse_fallback() {
        let mut builder = three_stops();
        builder.set_distance("A", "B", 1000).unwrap();
        builder.set_distance("B", "A", 1500).unwrap();
        builder.set_distance("B", "C", 700).unwrap();
        let network = builder.build();

        let a = network.find_stop("A").unwrap();
        let b = network.find_stop("B").unwrap();
        let c = network.find_stop("C").unwrap();

        assert_eq!(network.directed_distance(a, b).unwrap(), 1000);
        assert_eq!(network.directed_distance(b, a).unwrap(), 1500);
        assert_eq!(network.directed_distance(c, b).unwrap(), 700);
        assert!(matches!(
            network.directed_distance(a, c),
            Err(Error::MissingDistance { from, to }) if from == "A" && to == "C"
        ));
    }

    #[test]
    fn later_distance_overwrites_same_direction() {
        let mut builder = three_stops();
        builder.set_distance("A", "B", 1000).unwrap();
        builder.set_distance("A", "B", 1200).unwrap();
        let network = builder.build();
        let a = network.find_stop("A").unwrap();
        let b = network.find_stop("B").unwrap();
        assert_eq!(network.directed_distance(a, b).unwrap(), 1200);
    }

    #[test]
    fn reachable_stops_are_sorted_and_exclude_unserved_stops() {
        let mut builder = three_stops();
        builder.add_stop("D", origin()).unwrap();
        builder.add_route("R2", &["C", "A"], true).unwrap();
        builder.add_route("R1", &["A", "B"], true).unwrap();
        let network = builder.build();

        let names: Vec<&str> = network
            .reachable_stops()
            .into_iter()
            .map(|id| network.stop(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let routes: Vec<&str> = network
            .routes()
            .into_iter()
            .map(|id| network.route(id).name.as_str())
            .collect();
        assert_eq!(routes, vec!["R1", "R2"]);

        let d = network.find_stop("D").unwrap();
        assert!(!network.is_reachable(d));
        let a = network.find_stop("A").unwrap();
        assert_eq!(network.routes_at(a).count(), 2);
    }
}
