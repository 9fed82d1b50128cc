//! Authentication utilities library
//!
//! - Password hashing (Argon2id)
//! - HS256 access and refresh tokens with separate secrets
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenSettings};
//!
//! let auth = Authenticator::new(TokenSettings {
//!     issuer: "backoffice".to_string(),
//!     access_secret: "access_secret_key_at_least_32_bytes!".to_string(),
//!     refresh_secret: "refresh_secret_key_at_least_32_bytes".to_string(),
//!     access_ttl: chrono::Duration::minutes(15),
//!     refresh_ttl: chrono::Duration::days(7),
//! })
//! .unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let pair = auth.authenticate("password123", &hash, 7).unwrap();
//!
//! let user_id: i64 = auth.validate_access(&pair.access_token).unwrap();
//! assert_eq!(user_id, 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::RefreshedAccess;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use jwt::TokenKind;
pub use jwt::TokenSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
