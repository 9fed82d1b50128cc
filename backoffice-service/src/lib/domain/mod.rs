pub mod client;
pub mod device;
pub mod errors;
pub mod icd;
pub mod medicine;
pub mod role;
pub mod search;
pub mod session;
pub mod user;
