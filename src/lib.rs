//! Flow sheet display control core library.
//!
//! Renders a patient's grouped clinical observations as a pivoted flow
//! sheet: a data-access layer fetches the pivot projection and concept
//! metadata, and a pure formatting layer turns them into header labels and
//! cell text for the host rendering layer.

pub mod api;
pub mod display;
pub mod error;
pub mod locale;
pub mod models;

pub use display::flow_sheet::{EditObsData, FlowSheet, FlowSheetParams, SectionConfig};
pub use error::{Error, Result};

/// Application configuration
pub mod config {
    use std::collections::HashMap;
    use std::time::Duration;

    use serde::Deserialize;

    /// Connection settings shared by the observation and concept clients.
    #[derive(Debug, Clone, Deserialize)]
    pub struct ServiceConfig {
        /// Base URL of the EMR REST root, e.g. `https://emr.example.org/openmrs`.
        pub base_url: String,
        #[serde(default = "default_timeout_secs")]
        pub request_timeout_secs: u64,
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    impl ServiceConfig {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
                request_timeout_secs: default_timeout_secs(),
            }
        }

        pub fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    /// Load service configuration from file
    pub fn load_config() -> crate::Result<ServiceConfig> {
        // Default settings first, then environment-specific settings, then
        // environment variable overrides.
        let env = std::env::var("FLOWSHEET_ENV").unwrap_or_else(|_| "development".into());
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default"))
            .add_source(::config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(::config::Environment::with_prefix("FLOWSHEET"))
            .build()?;

        Ok(settings.try_deserialize::<ServiceConfig>()?)
    }

    /// Per-concept display settings keyed by concept name.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ConceptUiConfig {
        #[serde(default)]
        pub display_month_and_year: bool,
    }

    /// Source of per-concept display settings, injected into the widget
    /// instead of read from process-wide state.
    #[cfg_attr(test, mockall::automock)]
    pub trait UiConfigSource {
        fn concept_config(&self, concept_name: &str) -> Option<ConceptUiConfig>;
    }

    /// Map-backed [`UiConfigSource`], deserializable from the host app's
    /// dashboard configuration.
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(transparent)]
    pub struct UiConfigRegistry {
        concepts: HashMap<String, ConceptUiConfig>,
    }

    impl UiConfigRegistry {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, concept_name: impl Into<String>, config: ConceptUiConfig) {
            self.concepts.insert(concept_name.into(), config);
        }
    }

    impl UiConfigSource for UiConfigRegistry {
        fn concept_config(&self, concept_name: &str) -> Option<ConceptUiConfig> {
            self.concepts.get(concept_name).copied()
        }
    }

}
