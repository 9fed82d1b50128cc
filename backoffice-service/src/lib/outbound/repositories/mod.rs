pub mod bootstrap;
pub mod client;
pub mod device;
mod errors;
pub mod icd;
pub mod medicine;
pub mod role;
mod search;
mod sparse;
pub mod user;

pub use client::PostgresClientRepository;
pub use device::PostgresDeviceRepository;
pub use icd::PostgresIcdRepository;
pub use medicine::PostgresMedicineRepository;
pub use role::PostgresRoleRepository;
pub use user::PostgresUserRepository;
