//! CRediT contributor roles (NISO Z39.104-2022)

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CreditError;

/// One of the 14 CRediT taxonomy roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CreditRole {
    Conceptualization,
    DataCuration,
    FormalAnalysis,
    FundingAcquisition,
    Investigation,
    Methodology,
    ProjectAdministration,
    Resources,
    Software,
    Supervision,
    Validation,
    Visualization,
    WritingOriginalDraft,
    WritingReviewEditing,
}

impl CreditRole {
    /// All roles in taxonomy order
    pub const ALL: [CreditRole; 14] = [
        CreditRole::Conceptualization,
        CreditRole::DataCuration,
        CreditRole::FormalAnalysis,
        CreditRole::FundingAcquisition,
        CreditRole::Investigation,
        CreditRole::Methodology,
        CreditRole::ProjectAdministration,
        CreditRole::Resources,
        CreditRole::Software,
        CreditRole::Supervision,
        CreditRole::Validation,
        CreditRole::Visualization,
        CreditRole::WritingOriginalDraft,
        CreditRole::WritingReviewEditing,
    ];

    /// The label as it appears in a CRediT statement
    pub fn name(&self) -> &'static str {
        match self {
            CreditRole::Conceptualization => "Conceptualization",
            CreditRole::DataCuration => "Data curation",
            CreditRole::FormalAnalysis => "Formal analysis",
            CreditRole::FundingAcquisition => "Funding acquisition",
            CreditRole::Investigation => "Investigation",
            CreditRole::Methodology => "Methodology",
            CreditRole::ProjectAdministration => "Project administration",
            CreditRole::Resources => "Resources",
            CreditRole::Software => "Software",
            CreditRole::Supervision => "Supervision",
            CreditRole::Validation => "Validation",
            CreditRole::Visualization => "Visualization",
            CreditRole::WritingOriginalDraft => "Writing \u{2013} original draft",
            CreditRole::WritingReviewEditing => "Writing \u{2013} review & editing",
        }
    }

    /// Tooltip text for the role picker
    pub fn description(&self) -> &'static str {
        match self {
            CreditRole::Conceptualization => {
                "Ideas; formulation or evolution of overarching research goals and aims."
            }
            CreditRole::DataCuration => {
                "Management activities to annotate (produce metadata), scrub data and maintain research data for initial use and later re-use."
            }
            CreditRole::FormalAnalysis => {
                "Application of statistical, mathematical, computational, or other formal techniques to analyze or synthesize study data."
            }
            CreditRole::FundingAcquisition => {
                "Acquisition of the financial support for the project leading to this publication."
            }
            CreditRole::Investigation => {
                "Conducting a research and investigation process, specifically performing the experiments, or data/evidence collection."
            }
            CreditRole::Methodology => {
                "Development or design of methodology; creation of models."
            }
            CreditRole::ProjectAdministration => {
                "Management and coordination responsibility for the research activity planning and execution."
            }
            CreditRole::Resources => {
                "Provision of study materials, reagents, materials, patients, laboratory samples, animals, instrumentation, computing resources, or other analysis tools."
            }
            CreditRole::Software => {
                "Programming, software development; designing computer programs; implementation of the computer code and supporting algorithms; testing of existing code components."
            }
            CreditRole::Supervision => {
                "Oversight and leadership responsibility for the research activity planning and execution, including mentorship external to the core team."
            }
            CreditRole::Validation => {
                "Verification of the overall replication/reproducibility of results/experiments and other research outputs."
            }
            CreditRole::Visualization => {
                "Preparation, creation and/or presentation of the published work, specifically visualization/data presentation."
            }
            CreditRole::WritingOriginalDraft => {
                "Preparation, creation and/or presentation of the published work, specifically writing the initial draft."
            }
            CreditRole::WritingReviewEditing => {
                "Critical review, commentary or revision of the published work, including pre- or post-publication stages."
            }
        }
    }

    /// Look up a role by label, ignoring case and hyphen/dash differences
    pub fn from_name(name: &str) -> Option<CreditRole> {
        ROLES_BY_KEY.get(&role_key(name)).copied()
    }
}

lazy_static! {
    static ref ROLES_BY_KEY: HashMap<String, CreditRole> = CreditRole::ALL
        .iter()
        .map(|role| (role_key(role.name()), *role))
        .collect();
}

fn role_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['\u{2013}', '\u{2014}'], "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for CreditRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CreditRole {
    type Err = CreditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CreditRole::from_name(s)
            .ok_or_else(|| CreditError::validation(format!("Unknown CRediT role: {}", s.trim())))
    }
}

impl Serialize for CreditRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CreditRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Role label and definition, as listed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub name: String,
    pub description: String,
}

impl From<CreditRole> for RoleInfo {
    fn from(role: CreditRole) -> Self {
        Self {
            name: role.name().to_string(),
            description: role.description().to_string(),
        }
    }
}

/// The whole taxonomy in canonical order
pub fn role_catalog() -> Vec<RoleInfo> {
    CreditRole::ALL.iter().copied().map(RoleInfo::from).collect()
}

/// Parse role labels into a role set in taxonomy order, dropping duplicates.
pub fn parse_roles<S: AsRef<str>>(names: &[S]) -> crate::Result<Vec<CreditRole>> {
    let mut roles = names
        .iter()
        .map(|name| name.as_ref().parse::<CreditRole>())
        .collect::<crate::Result<Vec<_>>>()?;
    roles.sort();
    roles.dedup();
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_role_with_a_definition() {
        let catalog = role_catalog();
        assert_eq!(catalog.len(), CreditRole::ALL.len());
        assert_eq!(catalog[0].name, "Conceptualization");
        assert!(catalog.iter().all(|info| !info.description.is_empty()));
    }

    #[test]
    fn taxonomy_has_fourteen_distinct_names() {
        let mut names: Vec<_> = CreditRole::ALL.iter().map(|r| r.name()).collect();
        names.dedup();
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn lookup_is_lenient_about_case_and_dashes() {
        assert_eq!(
            CreditRole::from_name("writing - original draft"),
            Some(CreditRole::WritingOriginalDraft)
        );
        assert_eq!(
            CreditRole::from_name("Writing \u{2013} review & editing"),
            Some(CreditRole::WritingReviewEditing)
        );
        assert_eq!(CreditRole::from_name("  data   CURATION "), Some(CreditRole::DataCuration));
        assert_eq!(CreditRole::from_name("Typing"), None);
    }

    #[test]
    fn parse_roles_orders_and_dedups() {
        let roles = parse_roles(&["Validation", "Software", "validation"]).unwrap();
        assert_eq!(roles, vec![CreditRole::Software, CreditRole::Validation]);
    }

    #[test]
    fn parse_roles_rejects_unknown() {
        let err = parse_roles(&["Software", "Snacks"]).unwrap_err();
        assert!(err.to_string().contains("Snacks"));
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&CreditRole::WritingOriginalDraft).unwrap();
        assert_eq!(json, "\"Writing \u{2013} original draft\"");
        let back: CreditRole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CreditRole::WritingOriginalDraft);
    }
}
