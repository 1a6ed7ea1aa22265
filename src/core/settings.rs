//! Routing settings
//!
//! Wait time is expressed in minutes and bus velocity in km/h, the units of the
//! request document. Graph weights are minutes, so the velocity is converted to
//! meters per minute before use.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// How the shortest-path solver trades memory for query latency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SolverStrategy {
    /// One Dijkstra pass per query, no cached state
    #[default]
    Lazy,
    /// Dijkstra from every stop at construction, cached shortest-path trees
    Eager,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent at a stop before boarding any bus
    pub bus_wait_time: f64,
    /// Bus speed in km/h
    pub bus_velocity: f64,
    #[serde(default)]
    pub strategy: SolverStrategy,
}

impl RoutingSettings {
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Result<Self> {
        let settings = Self {
            bus_wait_time,
            bus_velocity,
            strategy: SolverStrategy::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_strategy(mut self, strategy: SolverStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject values that would produce negative or non-finite edge weights
    pub fn validate(&self) -> Result<()> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "bus_wait_time must be a non-negative number of minutes, got {}",
                self.bus_wait_time
            )));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "bus_velocity must be a positive speed in km/h, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }

    /// Velocity in the distance/time units of the graph (m/min)
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }
}

/// Field-by-field replacement for settings read from a request document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsOverride {
    pub bus_wait_time: Option<f64>,
    pub bus_velocity: Option<f64>,
    pub strategy: Option<SolverStrategy>,
}

impl SettingsOverride {
    /// Merge over `base`. Returns `None` when neither side provides settings.
    pub fn apply(&self, base: Option<RoutingSettings>) -> Result<Option<RoutingSettings>> {
        let (bus_wait_time, bus_velocity) = match (base, self.bus_wait_time, self.bus_velocity) {
            (None, None, None) => return Ok(None),
            (Some(base), wait, velocity) => (
                wait.unwrap_or(base.bus_wait_time),
                velocity.unwrap_or(base.bus_velocity),
            ),
            (None, Some(wait), Some(velocity)) => (wait, velocity),
            (None, _, _) => {
                return Err(Error::InvalidSettings(
                    "both wait time and velocity are required without routing_settings".to_string(),
                ))
            }
        };

        let strategy = self
            .strategy
            .or(base.map(|b| b.strategy))
            .unwrap_or_default();
        RoutingSettings::new(bus_wait_time, bus_velocity).map(|s| Some(s.with_strategy(strategy)))
    }
}
