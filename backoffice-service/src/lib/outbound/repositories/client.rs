use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::CreateProgramCommand;
use crate::domain::client::models::CreateSubClientCommand;
use crate::domain::client::models::LegalProfile;
use crate::domain::client::models::Program;
use crate::domain::client::models::ProgramId;
use crate::domain::client::models::SubClient;
use crate::domain::client::models::SubClientId;
use crate::domain::client::models::UpdateClientCommand;
use crate::domain::client::ports::ClientRepository;
use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::outbound::repositories::errors::database_error;
use crate::outbound::repositories::errors::unexpected_constraint;
use crate::outbound::repositories::errors::write_error;
use crate::outbound::repositories::search;
use crate::outbound::repositories::search::SearchSource;
use crate::outbound::repositories::sparse::SparseUpdate;

const CLIENT_COLUMNS: &str =
    "id, alias, legal_name, tin, contract_number, fiscal_address, created_at, updated_at";
const SUB_CLIENT_COLUMNS: &str = "id, client_id, alias, legal_name, tin, contract_number, \
    fiscal_address, created_at, updated_at";
const PROGRAM_COLUMNS: &str = "id, sub_client_id, name, description, created_at, updated_at";

// is_deleted is an integer flag: 0 live, 1 deleted.
const LIVE: &str = "is_deleted = 0";
const SOURCE: SearchSource<'static> = SearchSource::table("clients").live_only(LIVE);

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    alias: String,
    legal_name: String,
    tin: String,
    contract_number: String,
    fiscal_address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SubClientRow {
    id: i64,
    client_id: i64,
    alias: String,
    legal_name: String,
    tin: String,
    contract_number: String,
    fiscal_address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ProgramRow {
    id: i64,
    sub_client_id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self, sub_clients: Vec<SubClient>) -> Client {
        Client {
            id: ClientId(self.id),
            profile: LegalProfile {
                alias: self.alias,
                legal_name: self.legal_name,
                tin: self.tin,
                contract_number: self.contract_number,
                fiscal_address: self.fiscal_address,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            sub_clients,
        }
    }
}

impl SubClientRow {
    fn into_sub_client(self, programs: Vec<Program>) -> SubClient {
        SubClient {
            id: SubClientId(self.id),
            client_id: ClientId(self.client_id),
            profile: LegalProfile {
                alias: self.alias,
                legal_name: self.legal_name,
                tin: self.tin,
                contract_number: self.contract_number,
                fiscal_address: self.fiscal_address,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            programs,
        }
    }
}

impl From<ProgramRow> for Program {
    fn from(row: ProgramRow) -> Self {
        Program {
            id: ProgramId(row.id),
            sub_client_id: SubClientId(row.sub_client_id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach live sub-clients and their live programs, two queries per batch.
    async fn assemble(&self, rows: Vec<ClientRow>) -> Result<Vec<Client>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let sub_client_rows = sqlx::query_as::<_, SubClientRow>(&format!(
            "SELECT {} FROM sub_clients WHERE client_id = ANY($1) AND {} ORDER BY id",
            SUB_CLIENT_COLUMNS, LIVE
        ))
        .bind(&client_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut sub_clients: HashMap<i64, Vec<SubClient>> = HashMap::new();
        for sub_client in self.with_programs(sub_client_rows).await? {
            sub_clients
                .entry(sub_client.client_id.0)
                .or_default()
                .push(sub_client);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let children = sub_clients.remove(&row.id).unwrap_or_default();
                row.into_client(children)
            })
            .collect())
    }

    async fn with_programs(&self, rows: Vec<SubClientRow>) -> Result<Vec<SubClient>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let sub_client_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let program_rows = sqlx::query_as::<_, ProgramRow>(&format!(
            "SELECT {} FROM programs WHERE sub_client_id = ANY($1) AND {} ORDER BY id",
            PROGRAM_COLUMNS, LIVE
        ))
        .bind(&sub_client_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut programs: HashMap<i64, Vec<Program>> = HashMap::new();
        for row in program_rows {
            programs.entry(row.sub_client_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let children = programs.remove(&row.id).unwrap_or_default();
                row.into_sub_client(children)
            })
            .collect())
    }

    async fn soft_delete_from(&self, table: &str, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET is_deleted = 1, updated_at = NOW() WHERE id = $1 AND {}",
            table, LIVE
        ))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create(&self, command: &CreateClientCommand) -> Result<Client, DomainError> {
        let profile = &command.profile;

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (alias, legal_name, tin, contract_number, fiscal_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            CLIENT_COLUMNS
        ))
        .bind(&profile.alias)
        .bind(&profile.legal_name)
        .bind(&profile.tin)
        .bind(&profile.contract_number)
        .bind(&profile.fiscal_address)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into_client(Vec::new()))
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE id = $1 AND {}",
            CLIENT_COLUMNS, LIVE
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Client>, DomainError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE {} ORDER BY id",
            CLIENT_COLUMNS, LIVE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        self.assemble(rows).await
    }

    async fn update(
        &self,
        id: ClientId,
        command: &UpdateClientCommand,
    ) -> Result<Option<Client>, DomainError> {
        let mut update = SparseUpdate::new("clients");
        update
            .set("alias", command.alias.clone())
            .set("legal_name", command.legal_name.clone())
            .set("tin", command.tin.clone())
            .set("contract_number", command.contract_number.clone())
            .set("fiscal_address", command.fiscal_address.clone())
            .touch();
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = update
            .finish(id.0, Some(LIVE))
            .build_query_scalar::<i64>()
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn soft_delete(&self, id: ClientId) -> Result<bool, DomainError> {
        self.soft_delete_from("clients", id.0).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Page<Client>, DomainError> {
        let (rows, total) =
            search::search_rows::<ClientRow>(&self.pool, CLIENT_COLUMNS, &SOURCE, query)
                .await
                .map_err(database_error)?;

        let records = self.assemble(rows).await?;
        Ok(Page::new(records, total, query.pagination))
    }

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError> {
        search::coincidences(&self.pool, &SOURCE, query)
            .await
            .map_err(database_error)
    }

    async fn create_sub_client(
        &self,
        client_id: ClientId,
        command: &CreateSubClientCommand,
    ) -> Result<SubClient, DomainError> {
        let profile = &command.profile;

        let row = sqlx::query_as::<_, SubClientRow>(&format!(
            r#"
            INSERT INTO sub_clients (client_id, alias, legal_name, tin, contract_number, fiscal_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SUB_CLIENT_COLUMNS
        ))
        .bind(client_id.0)
        .bind(&profile.alias)
        .bind(&profile.legal_name)
        .bind(&profile.tin)
        .bind(&profile.contract_number)
        .bind(&profile.fiscal_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(e, unexpected_constraint, |_| {
                DomainError::Validation(format!("Client {} does not exist", client_id))
            })
        })?;

        Ok(row.into_sub_client(Vec::new()))
    }

    async fn find_sub_client(&self, id: SubClientId) -> Result<Option<SubClient>, DomainError> {
        // A sub-client under a deleted client is unreachable too.
        let row = sqlx::query_as::<_, SubClientRow>(
            r#"
            SELECT s.id, s.client_id, s.alias, s.legal_name, s.tin, s.contract_number,
                   s.fiscal_address, s.created_at, s.updated_at
            FROM sub_clients s
            JOIN clients c ON c.id = s.client_id
            WHERE s.id = $1 AND s.is_deleted = 0 AND c.is_deleted = 0
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => Ok(self.with_programs(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn soft_delete_sub_client(&self, id: SubClientId) -> Result<bool, DomainError> {
        self.soft_delete_from("sub_clients", id.0).await
    }

    async fn create_program(
        &self,
        sub_client_id: SubClientId,
        command: &CreateProgramCommand,
    ) -> Result<Program, DomainError> {
        let row = sqlx::query_as::<_, ProgramRow>(&format!(
            "INSERT INTO programs (sub_client_id, name, description) VALUES ($1, $2, $3) RETURNING {}",
            PROGRAM_COLUMNS
        ))
        .bind(sub_client_id.0)
        .bind(&command.name)
        .bind(&command.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(e, unexpected_constraint, |_| {
                DomainError::Validation(format!("Sub-client {} does not exist", sub_client_id))
            })
        })?;

        Ok(row.into())
    }

    async fn soft_delete_program(&self, id: ProgramId) -> Result<bool, DomainError> {
        self.soft_delete_from("programs", id.0).await
    }
}
