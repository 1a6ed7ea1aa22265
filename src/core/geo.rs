use ::geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Stop position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance in meters
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    let p1 = Point::new(from.lng, from.lat);
    let p2 = Point::new(to.lng, to.lat);
    Haversine.distance(p1, p2)
}
