//! Domain types: projects, authors, affiliations, and CRediT roles

pub mod affiliation;
pub mod author;
pub mod countries;
pub mod project;
pub mod roles;

pub use affiliation::{affiliation_summary, normalize_affiliations, Affiliation, AffiliationEntry};
pub use author::{display_name, Author, AuthorFields, EqualContribution, ValidatedAuthor};
pub use countries::normalize_country;
pub use project::{project_title, Project, ProjectRef, ProjectSummary, DEFAULT_PROJECT_TITLE};
pub use roles::{parse_roles, role_catalog, CreditRole, RoleInfo};
