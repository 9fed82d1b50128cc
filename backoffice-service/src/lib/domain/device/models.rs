use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::errors::bounded_text;
use crate::domain::errors::required_text;
use crate::domain::errors::TextFieldError;
use crate::domain::search::SearchFields;
use crate::domain::user::models::UserId;

pub const DEVICE_SEARCH_FIELDS: SearchFields = SearchFields::new(&[
    "ip_address",
    "user_agent",
    "device_type",
    "browser",
    "browser_version",
    "os",
    "language",
]);

/// Client device a user has signed in from.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub user_id: UserId,
    pub details: DeviceDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub i64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceDetails {
    pub ip_address: String,
    pub user_agent: String,
    pub device_type: String,
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub language: String,
}

/// IPv4 or IPv6 textual address; 45 characters covers mapped IPv6.
pub fn ip_address(value: String) -> Result<String, TextFieldError> {
    required_text("ip_address", value, 45)
}

pub fn short_attribute(field: &'static str, value: String) -> Result<String, TextFieldError> {
    bounded_text(field, value, 50)
}

#[derive(Debug, Clone)]
pub struct CreateDeviceCommand {
    pub user_id: UserId,
    pub details: DeviceDetails,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateDeviceCommand {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub browser_version: Option<String>,
    pub os: Option<String>,
    pub language: Option<String>,
}

impl UpdateDeviceCommand {
    pub fn is_empty(&self) -> bool {
        self.ip_address.is_none()
            && self.user_agent.is_none()
            && self.device_type.is_none()
            && self.browser.is_none()
            && self.browser_version.is_none()
            && self.os.is_none()
            && self.language.is_none()
    }
}
