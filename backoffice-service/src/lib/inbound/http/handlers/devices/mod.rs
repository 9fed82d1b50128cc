use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::device::models::ip_address;
use crate::domain::device::models::short_attribute;
use crate::domain::device::models::CreateDeviceCommand;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceDetails;
use crate::domain::device::models::UpdateDeviceCommand;
use crate::domain::errors::bounded_text;
use crate::domain::errors::DomainError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiSuccess;

pub mod create_device;
pub mod current_device;
pub mod delete_device;
pub mod device_coincidences;
pub mod get_device;
pub mod list_devices;
pub mod list_user_devices;
pub mod search_devices;
pub mod update_device;

pub use create_device::create_device;
pub use current_device::current_device;
pub use delete_device::delete_device;
pub use device_coincidences::device_coincidences;
pub use get_device::get_device;
pub use list_devices::list_devices;
pub use list_user_devices::list_user_devices;
pub use search_devices::search_devices;
pub use update_device::update_device;

const USER_AGENT_MAX: usize = 1000;

// Device attributes keep their snake_case wire names; only userId is camelCase.
#[derive(Debug, Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub browser: String,
    #[serde(default)]
    pub browser_version: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub language: String,
}

impl CreateDeviceRequest {
    fn try_into_command(self) -> Result<CreateDeviceCommand, DomainError> {
        Ok(CreateDeviceCommand {
            user_id: UserId(self.user_id),
            details: DeviceDetails {
                ip_address: ip_address(self.ip_address)?,
                user_agent: bounded_text("user_agent", self.user_agent, USER_AGENT_MAX)?,
                device_type: short_attribute("device_type", self.device_type)?,
                browser: short_attribute("browser", self.browser)?,
                browser_version: short_attribute("browser_version", self.browser_version)?,
                os: short_attribute("os", self.os)?,
                language: short_attribute("language", self.language)?,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDeviceRequest {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub browser_version: Option<String>,
    pub os: Option<String>,
    pub language: Option<String>,
}

impl UpdateDeviceRequest {
    fn try_into_command(self) -> Result<UpdateDeviceCommand, DomainError> {
        let short = |field: &'static str, value: Option<String>| {
            value.map(|v| short_attribute(field, v)).transpose()
        };

        Ok(UpdateDeviceCommand {
            ip_address: self.ip_address.map(ip_address).transpose()?,
            user_agent: self
                .user_agent
                .map(|v| bounded_text("user_agent", v, USER_AGENT_MAX))
                .transpose()?,
            device_type: short("device_type", self.device_type)?,
            browser: short("browser", self.browser)?,
            browser_version: short("browser_version", self.browser_version)?,
            os: short("os", self.os)?,
            language: short("language", self.language)?,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DeviceResponse {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub device_type: String,
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub language: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        let details = device.details;
        Self {
            id: device.id.0,
            user_id: device.user_id.0,
            ip_address: details.ip_address,
            user_agent: details.user_agent,
            device_type: details.device_type,
            browser: details.browser,
            browser_version: details.browser_version,
            os: details.os,
            language: details.language,
            created_at: device.created_at.to_rfc3339(),
            updated_at: device.updated_at.to_rfc3339(),
        }
    }
}

fn device_list(devices: Vec<Device>) -> ApiSuccess<Vec<DeviceResponse>> {
    ApiSuccess::new(
        StatusCode::OK,
        devices.into_iter().map(DeviceResponse::from).collect(),
    )
}
