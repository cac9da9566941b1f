use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mapping from a concept to a code in an external terminology source,
/// e.g. "ICD-10" -> "R50.9".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapping {
    pub source: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConceptNameType {
    FullySpecified,
    Short,
    Index,
    #[serde(other)]
    Other,
}

/// One localized name of a concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptName {
    pub name: String,
    #[serde(default)]
    pub concept_name_type: Option<ConceptNameType>,
}

/// Concept metadata as returned by the concept lookup endpoint with
/// `v=custom:(uuid,names,displayString)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDetail {
    pub uuid: Uuid,
    #[serde(default)]
    pub names: Vec<ConceptName>,
    #[serde(default)]
    pub display_string: Option<String>,
}

impl ConceptDetail {
    /// Picks the name shown for a concept template.
    ///
    /// A single non-empty localized name wins verbatim. With exactly two
    /// names the one tagged SHORT wins, whichever position it is in; if
    /// neither is tagged SHORT we fall back to the composed display string
    /// rather than failing the lookup. Everything else uses the display
    /// string.
    pub fn preferred_display_name(&self) -> Option<String> {
        match self.names.as_slice() {
            [only] if !only.name.is_empty() => Some(only.name.clone()),
            [first, second] => [first, second]
                .into_iter()
                .find(|n| n.concept_name_type == Some(ConceptNameType::Short))
                .map(|n| n.name.clone())
                .or_else(|| self.display_string.clone()),
            _ => self.display_string.clone(),
        }
    }
}
