use std::fmt;
use std::str::FromStr;

use crate::domain::errors::bounded_text;
use crate::domain::errors::required_text;
use crate::domain::errors::InvalidEnumValue;
use crate::domain::errors::TextFieldError;
use crate::domain::search::SearchFields;

pub const ICD_SEARCH_FIELDS: SearchFields = SearchFields::new(&[
    "cie_version",
    "code",
    "description",
    "chapter_no",
    "chapter_title",
]);

/// Diagnosis code from the ICD (CIE) classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcdCode {
    pub id: IcdCodeId,
    pub cie_version: CieVersion,
    pub code: Code,
    pub description: String,
    pub chapter_no: String,
    pub chapter_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IcdCodeId(pub i64);

impl fmt::Display for IcdCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CieVersion {
    Cie10,
    Cie11,
}

impl CieVersion {
    pub const ALLOWED: &'static [&'static str] = &["CIE-10", "CIE-11"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CieVersion::Cie10 => "CIE-10",
            CieVersion::Cie11 => "CIE-11",
        }
    }
}

impl FromStr for CieVersion {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CIE-10" => Ok(CieVersion::Cie10),
            "CIE-11" => Ok(CieVersion::Cie11),
            other => Err(InvalidEnumValue {
                field: "cieVersion",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Unique classification code such as `A00.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(String);

impl Code {
    pub fn new(code: String) -> Result<Self, TextFieldError> {
        required_text("code", code, 20).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub fn icd_text(field: &'static str, value: String, max: usize) -> Result<String, TextFieldError> {
    bounded_text(field, value, max)
}

#[derive(Debug, Clone)]
pub struct CreateIcdCodeCommand {
    pub cie_version: CieVersion,
    pub code: Code,
    pub description: String,
    pub chapter_no: String,
    pub chapter_title: String,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateIcdCodeCommand {
    pub cie_version: Option<CieVersion>,
    pub code: Option<Code>,
    pub description: Option<String>,
    pub chapter_no: Option<String>,
    pub chapter_title: Option<String>,
}

impl UpdateIcdCodeCommand {
    pub fn is_empty(&self) -> bool {
        self.cie_version.is_none()
            && self.code.is_none()
            && self.description.is_none()
            && self.chapter_no.is_none()
            && self.chapter_title.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cie_version() {
        assert_eq!("CIE-10".parse::<CieVersion>().unwrap(), CieVersion::Cie10);
        assert_eq!(CieVersion::Cie11.as_str(), "CIE-11");

        let err = "CIE-9".parse::<CieVersion>().unwrap_err();
        assert!(err.to_string().contains("CIE-10, CIE-11"));
    }

    #[test]
    fn test_code() {
        assert_eq!(Code::new(" A00.0 ".to_string()).unwrap().as_str(), "A00.0");
        assert!(Code::new(String::new()).is_err());
    }
}
