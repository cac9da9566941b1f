use std::future::Future;

use chrono::NaiveDate;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::models::PivotTable;

const FLOW_SHEET_PATH: &str = "ws/rest/v1/bahmnicore/observations/flowSheet";

/// Query for the flow sheet projection. Every configuration field of the
/// section travels as a request parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSheetQuery<'a> {
    pub template_name: &'a str,
    pub group_by_concept: &'a str,
    pub concept_names: &'a [String],
    pub number_of_visits: Option<u32>,
    pub initial_count: Option<u32>,
    pub latest_count: Option<u32>,
    pub config_name: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FlowSheetQuery<'_> {
    fn to_params(&self, patient_uuid: Uuid) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("patientUuid", patient_uuid.to_string()),
            ("conceptSet", self.template_name.to_string()),
            ("groupByConcept", self.group_by_concept.to_string()),
        ];
        for concept_name in self.concept_names {
            params.push(("conceptNames", concept_name.clone()));
        }
        if let Some(visits) = self.number_of_visits {
            params.push(("numberOfVisits", visits.to_string()));
        }
        if let Some(count) = self.initial_count {
            params.push(("initialCount", count.to_string()));
        }
        if let Some(count) = self.latest_count {
            params.push(("latestCount", count.to_string()));
        }
        if let Some(name) = self.config_name {
            params.push(("name", name.to_string()));
        }
        if let Some(date) = self.start_date {
            params.push(("startDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            params.push(("endDate", date.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

/// Fetches a patient's observations pivoted into flow sheet rows/columns.
pub trait ObservationsApi {
    fn flow_sheet(
        &self,
        patient_uuid: Uuid,
        query: &FlowSheetQuery<'_>,
    ) -> impl Future<Output = Result<PivotTable>> + Send;
}

/// HTTP implementation against the EMR observations endpoint.
#[derive(Debug, Clone)]
pub struct ObservationsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ObservationsClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let (http, base_url) = super::build_http(config)?;
        Ok(Self { http, base_url })
    }
}

impl ObservationsApi for ObservationsClient {
    async fn flow_sheet(
        &self,
        patient_uuid: Uuid,
        query: &FlowSheetQuery<'_>,
    ) -> Result<PivotTable> {
        let url = self.base_url.join(FLOW_SHEET_PATH)?;
        debug!(%patient_uuid, template = query.template_name, "fetching flow sheet");

        let response = self
            .http
            .get(url)
            .query(&query.to_params(patient_uuid))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus {
                url: response.url().to_string(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}
