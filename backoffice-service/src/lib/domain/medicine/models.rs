use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::bounded_text;
use crate::domain::errors::required_text;
use crate::domain::errors::InvalidEnumValue;
use crate::domain::errors::TextFieldError;
use crate::domain::search::SearchFields;

pub const MEDICINE_SEARCH_FIELDS: SearchFields = SearchFields::new(&[
    "description",
    "laboratory",
    "ean_code",
    "sat_key",
    "active_ingredient",
]);

/// Catalogued medicine. Deletion is logical: deleted rows are never returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Medicine {
    pub id: MedicineId,
    pub ean_code: EanCode,
    pub description: String,
    pub medicine_type: MedicineType,
    pub laboratory: String,
    pub iva: String,
    pub sat_key: String,
    pub temperature_control: Option<TemperatureControl>,
    pub active_ingredient: String,
    pub cold_chain: bool,
    pub is_controlled: bool,
    pub unit_quantity: f64,
    pub unit_type: Option<UnitType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MedicineId(pub i64);

impl fmt::Display for MedicineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique barcode, 1-30 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EanCode(String);

impl EanCode {
    pub fn new(code: String) -> Result<Self, TextFieldError> {
        required_text("eanCode", code, 30).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicineType {
    Injection,
    Tablet,
    Capsule,
}

impl MedicineType {
    pub const ALLOWED: &'static [&'static str] = &["injection", "tablet", "capsule"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineType::Injection => "injection",
            MedicineType::Tablet => "tablet",
            MedicineType::Capsule => "capsule",
        }
    }
}

impl FromStr for MedicineType {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "injection" => Ok(MedicineType::Injection),
            "tablet" => Ok(MedicineType::Tablet),
            "capsule" => Ok(MedicineType::Capsule),
            other => Err(InvalidEnumValue {
                field: "type",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureControl {
    Room,
    Refrigerated,
    Frozen,
}

impl TemperatureControl {
    pub const ALLOWED: &'static [&'static str] = &["room", "refrigerated", "frozen"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureControl::Room => "room",
            TemperatureControl::Refrigerated => "refrigerated",
            TemperatureControl::Frozen => "frozen",
        }
    }
}

impl FromStr for TemperatureControl {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(TemperatureControl::Room),
            "refrigerated" => Ok(TemperatureControl::Refrigerated),
            "frozen" => Ok(TemperatureControl::Frozen),
            other => Err(InvalidEnumValue {
                field: "temperatureControl",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    Milliliter,
    Milligram,
    Gram,
    Unit,
}

impl UnitType {
    pub const ALLOWED: &'static [&'static str] = &["ml", "mg", "g", "unit"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Milliliter => "ml",
            UnitType::Milligram => "mg",
            UnitType::Gram => "g",
            UnitType::Unit => "unit",
        }
    }
}

impl FromStr for UnitType {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ml" => Ok(UnitType::Milliliter),
            "mg" => Ok(UnitType::Milligram),
            "g" => Ok(UnitType::Gram),
            "unit" => Ok(UnitType::Unit),
            other => Err(InvalidEnumValue {
                field: "unitType",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

pub fn medicine_description(value: String) -> Result<String, TextFieldError> {
    required_text("description", value, 150)
}

/// Bounded free-text attribute (laboratory, SAT key, tax code, ingredient).
pub fn catalog_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, TextFieldError> {
    bounded_text(field, value, max)
}

/// Quantities are never negative and must be finite.
pub fn unit_quantity(value: f64) -> Result<f64, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("unitQuantity must be a non-negative number, got {}", value))
    }
}

#[derive(Debug, Clone)]
pub struct CreateMedicineCommand {
    pub ean_code: EanCode,
    pub description: String,
    pub medicine_type: MedicineType,
    pub laboratory: String,
    pub iva: String,
    pub sat_key: String,
    pub temperature_control: Option<TemperatureControl>,
    pub active_ingredient: String,
    pub cold_chain: bool,
    pub is_controlled: bool,
    pub unit_quantity: f64,
    pub unit_type: Option<UnitType>,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateMedicineCommand {
    pub ean_code: Option<EanCode>,
    pub description: Option<String>,
    pub medicine_type: Option<MedicineType>,
    pub laboratory: Option<String>,
    pub iva: Option<String>,
    pub sat_key: Option<String>,
    pub temperature_control: Option<TemperatureControl>,
    pub active_ingredient: Option<String>,
    pub cold_chain: Option<bool>,
    pub is_controlled: Option<bool>,
    pub unit_quantity: Option<f64>,
    pub unit_type: Option<UnitType>,
}

impl UpdateMedicineCommand {
    pub fn is_empty(&self) -> bool {
        self.ean_code.is_none()
            && self.description.is_none()
            && self.medicine_type.is_none()
            && self.laboratory.is_none()
            && self.iva.is_none()
            && self.sat_key.is_none()
            && self.temperature_control.is_none()
            && self.active_ingredient.is_none()
            && self.cold_chain.is_none()
            && self.is_controlled.is_none()
            && self.unit_quantity.is_none()
            && self.unit_type.is_none()
    }
}
