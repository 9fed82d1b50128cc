use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::bounded_text;
use crate::domain::errors::required_text;
use crate::domain::errors::TextFieldError;
use crate::domain::search::SearchFields;

pub const ROLE_SEARCH_FIELDS: SearchFields = SearchFields::new(&["name", "description"]);

/// Access role assigned to every user.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub description: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub i64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique role name, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, TextFieldError> {
        required_text("name", name, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub fn role_description(description: String) -> Result<String, TextFieldError> {
    bounded_text("description", description, 1000)
}

#[derive(Debug, Clone)]
pub struct CreateRoleCommand {
    pub name: RoleName,
    pub description: String,
    pub enabled: bool,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleCommand {
    pub name: Option<RoleName>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

impl UpdateRoleCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.enabled.is_none()
    }
}
