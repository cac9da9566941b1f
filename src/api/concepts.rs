use std::future::Future;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::models::ConceptDetail;

const CONCEPT_PATH: &str = "ws/rest/v1/concept";

/// Representation asked of the concept endpoint; just enough to resolve a
/// template's display name.
const CUSTOM_REPRESENTATION: &str = "custom:(uuid,names,displayString)";

/// Looks up concept metadata by name.
pub trait ConceptsApi {
    /// Resolves a concept by its full name, `None` when no concept matches.
    fn concept_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ConceptDetail>>> + Send;
}

/// HTTP implementation against the EMR concept endpoint.
#[derive(Debug, Clone)]
pub struct ConceptsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ConceptsClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let (http, base_url) = super::build_http(config)?;
        Ok(Self { http, base_url })
    }
}

#[derive(Debug, Deserialize)]
struct ConceptSearchPage {
    #[serde(default)]
    results: Vec<ConceptDetail>,
}

impl ConceptsApi for ConceptsClient {
    async fn concept_by_name(&self, name: &str) -> Result<Option<ConceptDetail>> {
        let url = self.base_url.join(CONCEPT_PATH)?;
        debug!(concept = name, "looking up concept metadata");

        let response = self
            .http
            .get(url)
            .query(&[("name", name), ("v", CUSTOM_REPRESENTATION)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus {
                url: response.url().to_string(),
                status: response.status(),
            });
        }

        let page: ConceptSearchPage = response.json().await?;
        Ok(page.results.into_iter().next())
    }
}
