use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::medicine::models::catalog_text;
use crate::domain::medicine::models::medicine_description;
use crate::domain::medicine::models::unit_quantity;
use crate::domain::medicine::models::CreateMedicineCommand;
use crate::domain::medicine::models::EanCode;
use crate::domain::medicine::models::Medicine;
use crate::domain::medicine::models::MedicineType;
use crate::domain::medicine::models::UnitType;
use crate::domain::medicine::models::UpdateMedicineCommand;

pub mod create_medicine;
pub mod delete_medicine;
pub mod get_medicine;
pub mod list_medicines;
pub mod medicine_coincidences;
pub mod search_medicines;
pub mod update_medicine;

pub use create_medicine::create_medicine;
pub use delete_medicine::delete_medicine;
pub use get_medicine::get_medicine;
pub use list_medicines::list_medicines;
pub use medicine_coincidences::medicine_coincidences;
pub use search_medicines::search_medicines;
pub use update_medicine::update_medicine;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicineRequest {
    pub ean_code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub medicine_type: String,
    #[serde(default)]
    pub laboratory: String,
    #[serde(default)]
    pub iva: String,
    #[serde(default)]
    pub sat_key: String,
    pub temperature_control: Option<String>,
    #[serde(default)]
    pub active_ingredient: String,
    #[serde(default)]
    pub cold_chain: bool,
    #[serde(default)]
    pub is_controlled: bool,
    #[serde(default)]
    pub unit_quantity: f64,
    pub unit_type: Option<String>,
}

/// Parse an optional enumerated field; blank counts as absent.
fn optional_enum<T>(value: Option<String>) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    DomainError: From<T::Err>,
{
    match value {
        Some(v) if !v.trim().is_empty() => Ok(Some(T::from_str(v.trim())?)),
        _ => Ok(None),
    }
}

fn quantity(value: f64) -> Result<f64, DomainError> {
    unit_quantity(value).map_err(DomainError::Validation)
}

impl CreateMedicineRequest {
    fn try_into_command(self) -> Result<CreateMedicineCommand, DomainError> {
        Ok(CreateMedicineCommand {
            ean_code: EanCode::new(self.ean_code)?,
            description: medicine_description(self.description)?,
            medicine_type: MedicineType::from_str(self.medicine_type.trim())?,
            laboratory: catalog_text("laboratory", self.laboratory, 50)?,
            iva: catalog_text("iva", self.iva, 5)?,
            sat_key: catalog_text("satKey", self.sat_key, 50)?,
            temperature_control: optional_enum(self.temperature_control)?,
            active_ingredient: catalog_text("activeIngredient", self.active_ingredient, 150)?,
            cold_chain: self.cold_chain,
            is_controlled: self.is_controlled,
            unit_quantity: quantity(self.unit_quantity)?,
            unit_type: optional_enum(self.unit_type)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicineRequest {
    pub ean_code: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub medicine_type: Option<String>,
    pub laboratory: Option<String>,
    pub iva: Option<String>,
    pub sat_key: Option<String>,
    pub temperature_control: Option<String>,
    pub active_ingredient: Option<String>,
    pub cold_chain: Option<bool>,
    pub is_controlled: Option<bool>,
    pub unit_quantity: Option<f64>,
    pub unit_type: Option<String>,
}

impl UpdateMedicineRequest {
    fn try_into_command(self) -> Result<UpdateMedicineCommand, DomainError> {
        Ok(UpdateMedicineCommand {
            ean_code: self.ean_code.map(EanCode::new).transpose()?,
            description: self.description.map(medicine_description).transpose()?,
            medicine_type: optional_enum(self.medicine_type)?,
            laboratory: self
                .laboratory
                .map(|v| catalog_text("laboratory", v, 50))
                .transpose()?,
            iva: self.iva.map(|v| catalog_text("iva", v, 5)).transpose()?,
            sat_key: self
                .sat_key
                .map(|v| catalog_text("satKey", v, 50))
                .transpose()?,
            temperature_control: optional_enum(self.temperature_control)?,
            active_ingredient: self
                .active_ingredient
                .map(|v| catalog_text("activeIngredient", v, 150))
                .transpose()?,
            cold_chain: self.cold_chain,
            is_controlled: self.is_controlled,
            unit_quantity: self.unit_quantity.map(quantity).transpose()?,
            unit_type: optional_enum(self.unit_type)?,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicineResponse {
    pub id: i64,
    pub ean_code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub medicine_type: &'static str,
    pub laboratory: String,
    pub iva: String,
    pub sat_key: String,
    pub temperature_control: Option<&'static str>,
    pub active_ingredient: String,
    pub cold_chain: bool,
    pub is_controlled: bool,
    pub unit_quantity: f64,
    pub unit_type: Option<&'static str>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Medicine> for MedicineResponse {
    fn from(medicine: Medicine) -> Self {
        Self {
            id: medicine.id.0,
            ean_code: medicine.ean_code.as_str().to_string(),
            description: medicine.description,
            medicine_type: medicine.medicine_type.as_str(),
            laboratory: medicine.laboratory,
            iva: medicine.iva,
            sat_key: medicine.sat_key,
            temperature_control: medicine.temperature_control.map(|t| t.as_str()),
            active_ingredient: medicine.active_ingredient,
            cold_chain: medicine.cold_chain,
            is_controlled: medicine.is_controlled,
            unit_quantity: medicine.unit_quantity,
            unit_type: medicine.unit_type.map(|u| u.as_str()),
            created_at: medicine.created_at.to_rfc3339(),
            updated_at: medicine.updated_at.to_rfc3339(),
        }
    }
}
