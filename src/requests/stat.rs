//! `stat_requests`: queries answered against the ingested network

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::itinerary::{Itinerary, Segment};
use crate::core::network::Network;
use crate::core::router::TransitRouter;

const NOT_FOUND: &str = "not found";
const MAP_UNSUPPORTED: &str = "map rendering is not supported";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatRequest {
    pub id: i64,
    #[serde(flatten)]
    pub query: StatQuery,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatQuery {
    Bus { name: String },
    Stop { name: String },
    Route { from: String, to: String },
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItem>,
    },
    Error {
        request_id: i64,
        error_message: String,
    },
}

impl StatResponse {
    fn error(request_id: i64, message: &str) -> Self {
        StatResponse::Error {
            request_id,
            error_message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: u32, time: f64 },
}

impl RouteItem {
    fn from_segment(segment: &Segment, network: &Network) -> Self {
        match *segment {
            Segment::Wait { stop, duration } => RouteItem::Wait {
                stop_name: network.stop(stop).name.clone(),
                time: duration,
            },
            Segment::Ride {
                route,
                span_count,
                duration,
            } => RouteItem::Bus {
                bus: network.route(route).name.clone(),
                span_count,
                time: duration,
            },
        }
    }
}

/// What stat requests are answered against: the bare network, or a router
/// when routing settings were supplied.
#[derive(Debug)]
pub enum Catalogue {
    Network(Network),
    Router(TransitRouter),
}

impl Catalogue {
    pub fn network(&self) -> &Network {
        match self {
            Catalogue::Network(network) => network,
            Catalogue::Router(router) => router.network(),
        }
    }

    /// Answer one request. Unknown names become a "not found" response;
    /// configuration problems are returned as errors.
    pub fn answer(&self, request: &StatRequest) -> Result<StatResponse> {
        let id = request.id;
        let network = self.network();

        let response = match &request.query {
            StatQuery::Bus { name } => match network.route_stats(name) {
                Ok(stats) => StatResponse::Bus {
                    request_id: id,
                    curvature: stats.curvature,
                    route_length: stats.route_length,
                    stop_count: stats.stop_count,
                    unique_stop_count: stats.unique_stop_count,
                },
                Err(Error::RouteNotFound(_)) => StatResponse::error(id, NOT_FOUND),
                Err(e) => return Err(e),
            },
            StatQuery::Stop { name } => match network.stop_routes(name) {
                Ok(buses) => StatResponse::Stop {
                    request_id: id,
                    buses: buses.into_iter().map(str::to_string).collect(),
                },
                Err(Error::StopNotFound(_)) => StatResponse::error(id, NOT_FOUND),
                Err(e) => return Err(e),
            },
            StatQuery::Route { from, to } => {
                let Catalogue::Router(router) = self else {
                    return Err(Error::InvalidSettings(
                        "routing_settings are required to answer Route requests".to_string(),
                    ));
                };
                match router.build_route(from, to) {
                    Ok(itinerary) => route_response(id, &itinerary, network),
                    Err(e) => {
                        log::debug!("Request {id}: {e}");
                        StatResponse::error(id, NOT_FOUND)
                    }
                }
            }
            StatQuery::Map => StatResponse::error(id, MAP_UNSUPPORTED),
        };

        Ok(response)
    }
}

fn route_response(request_id: i64, itinerary: &Itinerary, network: &Network) -> StatResponse {
    StatResponse::Route {
        request_id,
        total_time: itinerary.total_time,
        items: itinerary
            .segments
            .iter()
            .map(|segment| RouteItem::from_segment(segment, network))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Coordinates;
    use crate::core::network::NetworkBuilder;
    use crate::core::settings::RoutingSettings;
    use serde_json::json;

    fn network() -> Network {
        let mut builder = NetworkBuilder::new();
        builder.add_stop("A", Coordinates::new(55.574371, 37.6517)).unwrap();
        builder.add_stop("B", Coordinates::new(55.581065, 37.64839)).unwrap();
        builder.add_stop("Idle", Coordinates::new(55.587655, 37.645687)).unwrap();
        builder.set_distance("A", "B", 1000).unwrap();
        builder.add_route("828", &["A", "B"], false).unwrap();
        builder.build()
    }

    fn request(id: i64, query: StatQuery) -> StatRequest {
        StatRequest { id, query }
    }

    #[test]
    fn deserializes_flattened_requests() {
        let requests: Vec<StatRequest> = serde_json::from_value(json!([
            {"id": 1, "type": "Bus", "name": "828"},
            {"id": 2, "type": "Stop", "name": "A"},
            {"id": 3, "type": "Route", "from": "A", "to": "B"},
            {"id": 4, "type": "Map"}
        ]))
        .unwrap();

        assert_eq!(requests[0], request(1, StatQuery::Bus { name: "828".into() }));
        assert_eq!(
            requests[2],
            request(3, StatQuery::Route { from: "A".into(), to: "B".into() })
        );
        assert_eq!(requests[3].query, StatQuery::Map);
    }

    #[test]
    fn bus_and_stop_answers() {
        let catalogue = Catalogue::Network(network());

        let bus = catalogue
            .answer(&request(1, StatQuery::Bus { name: "828".into() }))
            .unwrap();
        let StatResponse::Bus { stop_count, unique_stop_count, route_length, .. } = &bus else {
            panic!("expected a bus response, got {bus:?}");
        };
        assert_eq!((*stop_count, *unique_stop_count, *route_length), (3, 2, 2000));

        let idle = catalogue
            .answer(&request(2, StatQuery::Stop { name: "Idle".into() }))
            .unwrap();
        assert_eq!(idle, StatResponse::Stop { request_id: 2, buses: vec![] });

        let missing = catalogue
            .answer(&request(3, StatQuery::Stop { name: "Nowhere".into() }))
            .unwrap();
        assert_eq!(missing, StatResponse::error(3, NOT_FOUND));
    }

    #[test]
    fn route_answers_serialize_to_items() {
        let router = TransitRouter::new(network(), RoutingSettings::new(6.0, 60.0).unwrap()).unwrap();
        let catalogue = Catalogue::Router(router);

        let response = catalogue
            .answer(&request(7, StatQuery::Route { from: "B".into(), to: "A".into() }))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "request_id": 7,
                "total_time": 7.0,
                "items": [
                    {"type": "Wait", "stop_name": "B", "time": 6.0},
                    {"type": "Bus", "bus": "828", "span_count": 1, "time": 1.0}
                ]
            })
        );

        let unreachable = catalogue
            .answer(&request(8, StatQuery::Route { from: "A".into(), to: "Idle".into() }))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&unreachable).unwrap(),
            json!({"request_id": 8, "error_message": "not found"})
        );
    }

    #[test]
    fn route_without_settings_is_a_configuration_error() {
        let catalogue = Catalogue::Network(network());
        let result = catalogue.answer(&request(1, StatQuery::Route { from: "A".into(), to: "B".into() }));
        assert!(matches!(result, Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn map_requests_are_declined() {
        let catalogue = Catalogue::Network(network());
        let response = catalogue.answer(&request(5, StatQuery::Map)).unwrap();
        assert_eq!(response, StatResponse::error(5, MAP_UNSUPPORTED));
    }
}
