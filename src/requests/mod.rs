//! JSON request documents
//!
//! A document carries `base_requests` (the network), optional
//! `routing_settings` and `stat_requests` (the queries). Processing one
//! yields a response per stat request, in request order.

pub mod base;
pub mod stat;

use std::io::Read;

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::router::TransitRouter;
use crate::core::settings::{RoutingSettings, SettingsOverride};

pub use base::{build_network, BaseRequest};
pub use stat::{Catalogue, RouteItem, StatQuery, StatRequest, StatResponse};

#[derive(Debug, Clone, Deserialize)]
pub struct RequestDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

impl RequestDocument {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Build the catalogue described by `document`, with routing when settings
/// are available from the document or `overrides`.
pub fn build_catalogue(document: &RequestDocument, overrides: &SettingsOverride) -> Result<Catalogue> {
    let network = build_network(&document.base_requests)?;
    match overrides.apply(document.routing_settings)? {
        Some(settings) => Ok(Catalogue::Router(TransitRouter::new(network, settings)?)),
        None => Ok(Catalogue::Network(network)),
    }
}

/// Answer every stat request of `document`.
pub fn process(document: &RequestDocument, overrides: &SettingsOverride) -> Result<Vec<StatResponse>> {
    let catalogue = build_catalogue(document, overrides)?;
    log::info!(
        "Answering {} stat requests over {} stops and {} routes",
        document.stat_requests.len(),
        catalogue.network().stop_count(),
        catalogue.network().route_count()
    );
    document
        .stat_requests
        .iter()
        .map(|request| catalogue.answer(request))
        .collect()
}
