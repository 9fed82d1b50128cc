use serde::Deserialize;
use serde::Serialize;

use crate::domain::client::models::alias;
use crate::domain::client::models::contract_number;
use crate::domain::client::models::fiscal_address;
use crate::domain::client::models::legal_name;
use crate::domain::client::models::program_name;
use crate::domain::client::models::tin;
use crate::domain::client::models::Client;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::CreateProgramCommand;
use crate::domain::client::models::CreateSubClientCommand;
use crate::domain::client::models::LegalProfile;
use crate::domain::client::models::Program;
use crate::domain::client::models::SubClient;
use crate::domain::client::models::UpdateClientCommand;
use crate::domain::errors::bounded_text;
use crate::domain::errors::DomainError;

pub mod add_program;
pub mod add_sub_client;
pub mod client_coincidences;
pub mod create_client;
pub mod delete_client;
pub mod delete_program;
pub mod delete_sub_client;
pub mod get_client;
pub mod list_clients;
pub mod search_clients;
pub mod update_client;

pub use add_program::add_program;
pub use add_sub_client::add_sub_client;
pub use client_coincidences::client_coincidences;
pub use create_client::create_client;
pub use delete_client::delete_client;
pub use delete_program::delete_program;
pub use delete_sub_client::delete_sub_client;
pub use get_client::get_client;
pub use list_clients::list_clients;
pub use search_clients::search_clients;
pub use update_client::update_client;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub alias: String,
    pub legal_name: String,
    pub tin: String,
    #[serde(default)]
    pub contract_number: String,
    pub fiscal_address: String,
}

impl CreateClientRequest {
    fn try_into_command(self) -> Result<CreateClientCommand, DomainError> {
        Ok(CreateClientCommand {
            profile: LegalProfile {
                alias: alias(self.alias)?,
                legal_name: legal_name(self.legal_name)?,
                tin: tin(self.tin)?,
                contract_number: contract_number(self.contract_number)?,
                fiscal_address: fiscal_address(self.fiscal_address)?,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub alias: Option<String>,
    pub legal_name: Option<String>,
    pub tin: Option<String>,
    pub contract_number: Option<String>,
    pub fiscal_address: Option<String>,
}

impl UpdateClientRequest {
    fn try_into_command(self) -> Result<UpdateClientCommand, DomainError> {
        Ok(UpdateClientCommand {
            alias: self.alias.map(alias).transpose()?,
            legal_name: self.legal_name.map(legal_name).transpose()?,
            tin: self.tin.map(tin).transpose()?,
            contract_number: self.contract_number.map(contract_number).transpose()?,
            fiscal_address: self.fiscal_address.map(fiscal_address).transpose()?,
        })
    }
}

/// Sub-clients only require a name pair; the rest may stay blank.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubClientRequest {
    pub alias: String,
    pub legal_name: String,
    #[serde(default)]
    pub tin: String,
    #[serde(default)]
    pub contract_number: String,
    #[serde(default)]
    pub fiscal_address: String,
}

impl CreateSubClientRequest {
    fn try_into_command(self) -> Result<CreateSubClientCommand, DomainError> {
        Ok(CreateSubClientCommand {
            profile: LegalProfile {
                alias: alias(self.alias)?,
                legal_name: legal_name(self.legal_name)?,
                tin: bounded_text("tin", self.tin, 15)?,
                contract_number: contract_number(self.contract_number)?,
                fiscal_address: bounded_text("fiscalAddress", self.fiscal_address, 255)?,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateProgramRequest {
    fn try_into_command(self) -> Result<CreateProgramCommand, DomainError> {
        Ok(CreateProgramCommand {
            name: program_name(self.name)?,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: i64,
    #[serde(rename = "subclientId")]
    pub sub_client_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id.0,
            sub_client_id: program.sub_client_id.0,
            name: program.name,
            description: program.description,
            created_at: program.created_at.to_rfc3339(),
            updated_at: program.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubClientResponse {
    pub id: i64,
    pub client_id: i64,
    pub alias: String,
    pub legal_name: String,
    pub tin: String,
    pub contract_number: String,
    pub fiscal_address: String,
    pub created_at: String,
    pub updated_at: String,
    pub programs: Vec<ProgramResponse>,
}

impl From<SubClient> for SubClientResponse {
    fn from(sub_client: SubClient) -> Self {
        let profile = sub_client.profile;
        Self {
            id: sub_client.id.0,
            client_id: sub_client.client_id.0,
            alias: profile.alias,
            legal_name: profile.legal_name,
            tin: profile.tin,
            contract_number: profile.contract_number,
            fiscal_address: profile.fiscal_address,
            created_at: sub_client.created_at.to_rfc3339(),
            updated_at: sub_client.updated_at.to_rfc3339(),
            programs: sub_client
                .programs
                .into_iter()
                .map(ProgramResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: i64,
    pub alias: String,
    pub legal_name: String,
    pub tin: String,
    pub contract_number: String,
    pub fiscal_address: String,
    pub created_at: String,
    pub updated_at: String,
    pub sub_clients: Vec<SubClientResponse>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        let profile = client.profile;
        Self {
            id: client.id.0,
            alias: profile.alias,
            legal_name: profile.legal_name,
            tin: profile.tin,
            contract_number: profile.contract_number,
            fiscal_address: profile.fiscal_address,
            created_at: client.created_at.to_rfc3339(),
            updated_at: client.updated_at.to_rfc3339(),
            sub_clients: client
                .sub_clients
                .into_iter()
                .map(SubClientResponse::from)
                .collect(),
        }
    }
}
