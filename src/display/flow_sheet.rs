//! The flow sheet presenter: activation joins the two service fetches, the
//! resulting view-state feeds the host rendering layer directly.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ConceptsApi, FlowSheetQuery, ObservationsApi};
use crate::config::UiConfigSource;
use crate::display::format;
use crate::error::{Error, Result};
use crate::locale::Localizer;
use crate::models::{Observation, PivotHeader, PivotTable};

/// Host-supplied section descriptor. Carries both the dashboard-view and
/// full-detail-view parameter shapes; activation picks one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    #[serde(default)]
    pub dashboard_params: Option<FlowSheetParams>,
    #[serde(default)]
    pub all_details_params: Option<FlowSheetParams>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Concept source used to label column headers.
    #[serde(default)]
    pub heading_concept_source: Option<String>,
    /// Concept source used to label coded cell values.
    #[serde(default)]
    pub data_concept_source: Option<String>,
}

/// One parameter shape of a section, configured per view in the host's
/// dashboard definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSheetParams {
    /// Config name forwarded to the observations service.
    #[serde(default)]
    pub name: Option<String>,
    pub template_name: String,
    pub group_by_concept: String,
    #[serde(default)]
    pub concept_names: Vec<String>,
    #[serde(default)]
    pub number_of_visits: Option<u32>,
    #[serde(default)]
    pub initial_count: Option<u32>,
    #[serde(default)]
    pub latest_count: Option<u32>,
    #[serde(default)]
    pub is_editable: bool,
    #[serde(default)]
    pub pivot_on: Option<String>,
}

/// Identifiers an external edit dialog needs to open an observation group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditObsData {
    pub observation: EditObsTarget,
    pub concept_set_name: String,
    pub concept_display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditObsTarget {
    pub encounter_uuid: Uuid,
    #[serde(rename = "uuid")]
    pub obs_group_uuid: Option<Uuid>,
}

/// Ready view-state for one activation of the widget. Rebuilt wholesale per
/// patient/section/date-range; holds nothing beyond the current render.
pub struct FlowSheet {
    pub config: FlowSheetParams,
    pub is_editable: bool,
    pub obs_table: PivotTable,
    pub concept_display_name: Option<String>,
    section: SectionConfig,
    on_dashboard: bool,
    localizer: Arc<dyn Localizer + Send + Sync>,
    ui_config: Arc<dyn UiConfigSource + Send + Sync>,
}

impl FlowSheet {
    /// Activates the widget for one patient and section: both fetches run
    /// concurrently and the view-state is built only once both settle, so
    /// the caller can hang its loading indicator on this single future.
    ///
    /// A failed table fetch fails the activation. A failed display-name
    /// lookup does not; the name is simply left unset.
    pub async fn activate<O, C>(
        observations: &O,
        concepts: &C,
        patient_uuid: Uuid,
        section: SectionConfig,
        on_dashboard: bool,
        localizer: Arc<dyn Localizer + Send + Sync>,
        ui_config: Arc<dyn UiConfigSource + Send + Sync>,
    ) -> Result<Self>
    where
        O: ObservationsApi,
        C: ConceptsApi,
    {
        let params = if on_dashboard {
            section.dashboard_params.clone()
        } else {
            section.all_details_params.clone()
        }
        .ok_or(Error::MissingParams(if on_dashboard {
            "dashboard"
        } else {
            "all-details"
        }))?;

        let query = FlowSheetQuery {
            template_name: &params.template_name,
            group_by_concept: &params.group_by_concept,
            concept_names: &params.concept_names,
            number_of_visits: params.number_of_visits,
            initial_count: params.initial_count,
            latest_count: params.latest_count,
            config_name: params.name.as_deref(),
            start_date: section.start_date,
            end_date: section.end_date,
        };

        let (table, concept_display_name) = tokio::join!(
            observations.flow_sheet(patient_uuid, &query),
            resolve_template_display_name(concepts, &params.template_name),
        );

        let mut obs_table = table?;
        obs_table.promote_group_by(&params.group_by_concept);
        info!(
            template = %params.template_name,
            rows = obs_table.rows.len(),
            "flow sheet ready"
        );

        Ok(Self {
            is_editable: params.is_editable,
            config: params,
            obs_table,
            concept_display_name,
            section,
            on_dashboard,
            localizer,
            ui_config,
        })
    }

    /// Whether selecting a row opens the full-detail view: only on the
    /// dashboard, and only when a full-detail shape exists to navigate to.
    pub fn is_clickable(&self) -> bool {
        self.on_dashboard && self.section.all_details_params.is_some()
    }

    /// Descriptor handed to the external edit dialog for one observation.
    pub fn edit_obs_data(&self, observation: &Observation) -> EditObsData {
        EditObsData {
            observation: EditObsTarget {
                encounter_uuid: observation.encounter_uuid,
                obs_group_uuid: observation.obs_group_uuid,
            },
            concept_set_name: self.config.template_name.clone(),
            concept_display_name: self.concept_display_name.clone(),
        }
    }

    pub fn pivot_on(&self) -> Option<&str> {
        self.config.pivot_on.as_deref()
    }

    pub fn header_name(&self, header: &PivotHeader) -> String {
        format::header_label(
            header,
            self.section.heading_concept_source.as_deref(),
            self.localizer.as_ref(),
        )
    }

    pub fn commafy(&self, observations: &[Observation]) -> String {
        format::commafy(
            observations,
            self.section.data_concept_source.as_deref(),
            self.localizer.as_ref(),
            self.ui_config.as_ref(),
        )
    }

    pub fn is_month_available(&self) -> bool {
        self.obs_table.month_available()
    }
}

/// Best-effort lookup of the template concept's display name. Failures and
/// empty results are swallowed; the widget renders without a name.
async fn resolve_template_display_name<C: ConceptsApi>(
    concepts: &C,
    template_name: &str,
) -> Option<String> {
    match concepts.concept_by_name(template_name).await {
        Ok(Some(concept)) => concept.preferred_display_name(),
        Ok(None) => {
            debug!(template = template_name, "no concept found for template");
            None
        }
        Err(err) => {
            warn!(
                template = template_name,
                error = %err,
                "template display name lookup failed"
            );
            None
        }
    }
}
