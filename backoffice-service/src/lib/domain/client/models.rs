use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::bounded_text;
use crate::domain::errors::required_text;
use crate::domain::errors::TextFieldError;
use crate::domain::search::SearchFields;

pub const CLIENT_SEARCH_FIELDS: SearchFields = SearchFields::new(&[
    "alias",
    "legal_name",
    "tin",
    "fiscal_address",
    "contract_number",
]);

/// Commercial client. Owns sub-clients, which own programs.
///
/// All three levels are deleted logically; reads only ever carry live rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub profile: LegalProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sub_clients: Vec<SubClient>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubClient {
    pub id: SubClientId,
    pub client_id: ClientId,
    pub profile: LegalProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub programs: Vec<Program>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: ProgramId,
    pub sub_client_id: SubClientId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity fields shared by clients and sub-clients.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegalProfile {
    pub alias: String,
    pub legal_name: String,
    pub tin: String,
    pub contract_number: String,
    pub fiscal_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubClientId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub i64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for SubClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub fn alias(value: String) -> Result<String, TextFieldError> {
    required_text("alias", value, 100)
}

pub fn legal_name(value: String) -> Result<String, TextFieldError> {
    required_text("legalName", value, 100)
}

/// Tax identification number.
pub fn tin(value: String) -> Result<String, TextFieldError> {
    required_text("tin", value, 15)
}

pub fn fiscal_address(value: String) -> Result<String, TextFieldError> {
    required_text("fiscalAddress", value, 255)
}

pub fn contract_number(value: String) -> Result<String, TextFieldError> {
    bounded_text("contractNumber", value, 100)
}

pub fn program_name(value: String) -> Result<String, TextFieldError> {
    required_text("name", value, 100)
}

#[derive(Debug, Clone)]
pub struct CreateClientCommand {
    pub profile: LegalProfile,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientCommand {
    pub alias: Option<String>,
    pub legal_name: Option<String>,
    pub tin: Option<String>,
    pub contract_number: Option<String>,
    pub fiscal_address: Option<String>,
}

impl UpdateClientCommand {
    pub fn is_empty(&self) -> bool {
        self.alias.is_none()
            && self.legal_name.is_none()
            && self.tin.is_none()
            && self.contract_number.is_none()
            && self.fiscal_address.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CreateSubClientCommand {
    pub profile: LegalProfile,
}

#[derive(Debug, Clone)]
pub struct CreateProgramCommand {
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tin_length() {
        assert_eq!(tin(" XAXX010101000 ".to_string()).unwrap(), "XAXX010101000");
        assert!(tin("X".repeat(16)).is_err());
        assert!(tin(String::new()).is_err());
    }

    #[test]
    fn test_contract_number_may_be_blank() {
        assert_eq!(contract_number(String::new()).unwrap(), "");
    }
}
