use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::icd::models::icd_text;
use crate::domain::icd::models::CieVersion;
use crate::domain::icd::models::Code;
use crate::domain::icd::models::CreateIcdCodeCommand;
use crate::domain::icd::models::IcdCode;
use crate::domain::icd::models::UpdateIcdCodeCommand;

pub mod create_icd_code;
pub mod delete_icd_code;
pub mod get_icd_code;
pub mod icd_coincidences;
pub mod list_icd_codes;
pub mod search_icd_codes;
pub mod update_icd_code;

pub use create_icd_code::create_icd_code;
pub use delete_icd_code::delete_icd_code;
pub use get_icd_code::get_icd_code;
pub use icd_coincidences::icd_coincidences;
pub use list_icd_codes::list_icd_codes;
pub use search_icd_codes::search_icd_codes;
pub use update_icd_code::update_icd_code;

fn description(value: String) -> Result<String, DomainError> {
    Ok(icd_text("description", value, 255)?)
}

fn chapter_no(value: String) -> Result<String, DomainError> {
    Ok(icd_text("chapterNo", value, 10)?)
}

fn chapter_title(value: String) -> Result<String, DomainError> {
    Ok(icd_text("chapterTitle", value, 255)?)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIcdCodeRequest {
    pub cie_version: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub chapter_no: String,
    #[serde(default)]
    pub chapter_title: String,
}

impl CreateIcdCodeRequest {
    fn try_into_command(self) -> Result<CreateIcdCodeCommand, DomainError> {
        Ok(CreateIcdCodeCommand {
            cie_version: CieVersion::from_str(self.cie_version.trim())?,
            code: Code::new(self.code)?,
            description: description(self.description)?,
            chapter_no: chapter_no(self.chapter_no)?,
            chapter_title: chapter_title(self.chapter_title)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIcdCodeRequest {
    pub cie_version: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub chapter_no: Option<String>,
    pub chapter_title: Option<String>,
}

impl UpdateIcdCodeRequest {
    fn try_into_command(self) -> Result<UpdateIcdCodeCommand, DomainError> {
        Ok(UpdateIcdCodeCommand {
            cie_version: self
                .cie_version
                .map(|v| CieVersion::from_str(v.trim()))
                .transpose()?,
            code: self.code.map(Code::new).transpose()?,
            description: self.description.map(description).transpose()?,
            chapter_no: self.chapter_no.map(chapter_no).transpose()?,
            chapter_title: self.chapter_title.map(chapter_title).transpose()?,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IcdCodeResponse {
    pub id: i64,
    pub cie_version: &'static str,
    pub code: String,
    pub description: String,
    pub chapter_no: String,
    pub chapter_title: String,
}

impl From<IcdCode> for IcdCodeResponse {
    fn from(icd: IcdCode) -> Self {
        Self {
            id: icd.id.0,
            cie_version: icd.cie_version.as_str(),
            code: icd.code.as_str().to_string(),
            description: icd.description,
            chapter_no: icd.chapter_no,
            chapter_title: icd.chapter_title,
        }
    }
}
