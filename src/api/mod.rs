//! Data-access layer for the observation and concept services.
//!
//! Each service is a small trait so the presenter can be activated against
//! in-process fakes in tests; the shipped implementations talk to the EMR
//! REST API over HTTP.

pub mod concepts;
pub mod observations;

pub use concepts::{ConceptsApi, ConceptsClient};
pub use observations::{FlowSheetQuery, ObservationsApi, ObservationsClient};

use reqwest::Client;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::Result;

/// Builds the shared HTTP client and a base URL that joins cleanly with
/// relative endpoint paths.
pub(crate) fn build_http(config: &ServiceConfig) -> Result<(Client, Url)> {
    let client = Client::builder()
        .timeout(config.request_timeout())
        .build()?;

    // Url::join drops the last path segment unless the base ends in '/'.
    let mut base = config.base_url.trim_end_matches('/').to_string();
    base.push('/');
    let base = Url::parse(&base)?;

    Ok((client, base))
}
