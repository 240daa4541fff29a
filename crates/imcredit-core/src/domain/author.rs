//! Manuscript authors

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::affiliation::{normalize_affiliations, AffiliationEntry};
use super::roles::{parse_roles, CreditRole};
use crate::error::{CreditError, Result};

/// Marks an author as sharing billing with the first or last author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EqualContribution {
    First,
    Last,
}

impl EqualContribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            EqualContribution::First => "first",
            EqualContribution::Last => "last",
        }
    }

    /// Parse the stored form; the empty string means no marker
    pub fn parse(value: &str) -> Result<Option<Self>> {
        match value.trim() {
            "" => Ok(None),
            "first" => Ok(Some(EqualContribution::First)),
            "last" => Ok(Some(EqualContribution::Last)),
            other => Err(CreditError::validation(format!(
                "equalContribution must be \"first\", \"last\" or empty, got \"{}\"",
                other
            ))),
        }
    }
}

/// A persisted author of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub project_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_initial: Option<String>,
    #[serde(default)]
    pub affiliations: Vec<AffiliationEntry>,
    pub roles: Vec<CreditRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal_contribution: Option<EqualContribution>,
    #[serde(alias = "author_order")]
    pub author_order: i64,
}

impl Author {
    /// First name, middle initial (if any) and last name, space-joined
    pub fn display_name(&self) -> String {
        display_name(
            &self.first_name,
            self.middle_initial.as_deref(),
            &self.last_name,
        )
    }

    /// Names of the selected roles, in stored order
    pub fn role_names(&self) -> Vec<&'static str> {
        self.roles.iter().map(CreditRole::name).collect()
    }
}

pub fn display_name(first: &str, middle_initial: Option<&str>, last: &str) -> String {
    [Some(first), middle_initial, Some(last)]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Editable author fields as submitted by a client.
///
/// Used for both create and update; validation happens in
/// [`AuthorFields::validate`] before anything reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFields {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub middle_initial: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<AffiliationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub orcid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equal_contribution: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AuthorFields {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn with_middle_initial(mut self, initial: impl Into<String>) -> Self {
        self.middle_initial = initial.into();
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<AffiliationEntry>) -> Self {
        self.affiliations.push(affiliation.into());
        self
    }

    pub fn with_role(mut self, role: CreditRole) -> Self {
        self.roles.push(role.name().to_string());
        self
    }

    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = orcid.into();
        self
    }

    pub fn with_equal_contribution(mut self, marker: EqualContribution) -> Self {
        self.equal_contribution = marker.as_str().to_string();
        self
    }

    /// Check required fields and normalize everything for storage.
    pub fn validate(&self) -> Result<ValidatedAuthor> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() || self.roles.is_empty() {
            return Err(CreditError::validation(
                "First name, last name, and at least one role are required",
            ));
        }

        let roles = parse_roles(&self.roles)?;
        let equal_contribution = EqualContribution::parse(&self.equal_contribution)?;

        Ok(ValidatedAuthor {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            middle_initial: optional(&self.middle_initial),
            affiliations: normalize_affiliations(&self.affiliations),
            roles,
            orcid: optional(&self.orcid),
            equal_contribution,
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Author fields that passed validation and normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAuthor {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub affiliations: Vec<AffiliationEntry>,
    pub roles: Vec<CreditRole>,
    pub orcid: Option<String>,
    pub equal_contribution: Option<EqualContribution>,
}

impl ValidatedAuthor {
    /// Materialize as an author row with the given identity and order
    pub fn into_author(self, id: Uuid, project_id: Uuid, author_order: i64) -> Author {
        Author {
            id,
            project_id,
            first_name: self.first_name,
            last_name: self.last_name,
            middle_initial: self.middle_initial,
            affiliations: self.affiliations,
            roles: self.roles,
            orcid: self.orcid,
            equal_contribution: self.equal_contribution,
            author_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Affiliation;

    #[test]
    fn display_name_includes_middle_initial() {
        assert_eq!(display_name("Ada", Some("K."), "Lovelace"), "Ada K. Lovelace");
        assert_eq!(display_name("Ada", None, "Lovelace"), "Ada Lovelace");
        assert_eq!(display_name("Ada", Some(""), "Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn validate_requires_names_and_roles() {
        let no_roles = AuthorFields::new("Ada", "Lovelace");
        assert!(matches!(no_roles.validate(), Err(CreditError::Validation(_))));

        let no_last = AuthorFields::new("Ada", "  ").with_role(CreditRole::Software);
        assert!(matches!(no_last.validate(), Err(CreditError::Validation(_))));

        let ok = AuthorFields::new(" Ada ", "Lovelace").with_role(CreditRole::Software);
        let validated = ok.validate().unwrap();
        assert_eq!(validated.first_name, "Ada");
        assert_eq!(validated.roles, vec![CreditRole::Software]);
    }

    #[test]
    fn validate_normalizes_affiliations() {
        let fields = AuthorFields::new("Grace", "Hopper")
            .with_role(CreditRole::Software)
            .with_affiliation(Affiliation::new("Yale").with_country("u.s.a."))
            .with_affiliation(Affiliation::default());
        let validated = fields.validate().unwrap();
        assert_eq!(validated.affiliations.len(), 1);
        assert_eq!(validated.affiliations[0].format(), "Yale, United States");
    }

    #[test]
    fn validate_rejects_bad_equal_contribution() {
        let mut fields = AuthorFields::new("Ada", "Lovelace").with_role(CreditRole::Software);
        fields.equal_contribution = "middle".into();
        assert!(fields.validate().is_err());

        fields.equal_contribution = "last".into();
        assert_eq!(
            fields.validate().unwrap().equal_contribution,
            Some(EqualContribution::Last)
        );
    }

    #[test]
    fn fields_accept_nulls() {
        let fields: AuthorFields = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","middleInitial":null,"affiliations":null,"roles":["Software"],"orcid":null}"#,
        )
        .unwrap();
        assert!(fields.affiliations.is_empty());
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn author_order_accepts_snake_case_alias() {
        let json = format!(
            r#"{{"id":"{}","projectId":"{}","firstName":"A","lastName":"B","roles":["Software"],"author_order":3}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let author: Author = serde_json::from_str(&json).unwrap();
        assert_eq!(author.author_order, 3);
        assert!(serde_json::to_string(&author).unwrap().contains("\"authorOrder\":3"));
    }
}
