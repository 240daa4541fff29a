//! Author affiliations and their canonical display form

use serde::{Deserialize, Serialize};

use super::countries::normalize_country;

/// A structured institutional affiliation. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Affiliation {
    /// Create an affiliation with only an institution
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            institution: Some(institution.into()),
            ..Default::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// True when no field carries any text
    pub fn is_empty(&self) -> bool {
        [
            &self.institution,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| non_empty(field).is_none())
    }

    /// Trim every field, drop blank ones and resolve the country alias.
    ///
    /// Applying this twice gives the same result as applying it once.
    pub fn normalized(&self) -> Self {
        Self {
            institution: trimmed(&self.institution),
            city: trimmed(&self.city),
            state: trimmed(&self.state),
            postal_code: trimmed(&self.postal_code),
            country: trimmed(&self.country).map(|c| normalize_country(&c)),
        }
    }

    /// Canonical display string: `institution, city, state postal, country`
    pub fn format(&self) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(4);
        if let Some(institution) = non_empty(&self.institution) {
            segments.push(institution);
        }
        if let Some(city) = non_empty(&self.city) {
            segments.push(city);
        }
        let state_postal = [non_empty(&self.state), non_empty(&self.postal_code)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !state_postal.is_empty() {
            segments.push(&state_postal);
        }
        if let Some(country) = non_empty(&self.country) {
            segments.push(country);
        }
        segments.join(", ")
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn trimmed(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// An affiliation as stored on an author: structured, or a bare string kept
/// from before affiliations had fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AffiliationEntry {
    Structured(Affiliation),
    Legacy(String),
}

impl AffiliationEntry {
    /// Display string; legacy strings are returned unchanged
    pub fn format(&self) -> String {
        match self {
            AffiliationEntry::Structured(affiliation) => affiliation.format(),
            AffiliationEntry::Legacy(text) => text.clone(),
        }
    }

    /// Write-side normalization. Returns `None` when nothing is left to keep.
    pub fn normalized(&self) -> Option<Self> {
        match self {
            AffiliationEntry::Structured(affiliation) => {
                let normalized = affiliation.normalized();
                (!normalized.is_empty()).then_some(AffiliationEntry::Structured(normalized))
            }
            AffiliationEntry::Legacy(text) if text.trim().is_empty() => None,
            AffiliationEntry::Legacy(text) => Some(AffiliationEntry::Legacy(text.clone())),
        }
    }
}

impl From<Affiliation> for AffiliationEntry {
    fn from(affiliation: Affiliation) -> Self {
        AffiliationEntry::Structured(affiliation)
    }
}

/// Normalize a list of affiliations for storage, dropping empty entries.
pub fn normalize_affiliations(entries: &[AffiliationEntry]) -> Vec<AffiliationEntry> {
    entries.iter().filter_map(AffiliationEntry::normalized).collect()
}

/// Affiliations of one author formatted and joined with `"; "`
pub fn affiliation_summary(entries: &[AffiliationEntry]) -> String {
    entries
        .iter()
        .map(AffiliationEntry::format)
        .filter(|formatted| !formatted.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
