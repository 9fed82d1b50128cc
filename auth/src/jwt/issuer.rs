use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Which of the two session tokens is being issued or checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Signing material and lifetimes for session tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub issuer: String,
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// Issues and validates access and refresh tokens.
///
/// Access and refresh tokens are signed with different secrets, so a token of
/// one kind never validates as the other.
pub struct TokenIssuer {
    issuer: String,
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// # Errors
    /// * `MissingConfiguration` - issuer or either secret is empty
    pub fn new(settings: TokenSettings) -> Result<Self, JwtError> {
        if settings.issuer.trim().is_empty() {
            return Err(JwtError::MissingConfiguration("issuer"));
        }
        if settings.access_secret.is_empty() {
            return Err(JwtError::MissingConfiguration("access secret"));
        }
        if settings.refresh_secret.is_empty() {
            return Err(JwtError::MissingConfiguration("refresh secret"));
        }

        Ok(Self {
            access: JwtHandler::new(settings.access_secret.as_bytes(), &settings.issuer),
            refresh: JwtHandler::new(settings.refresh_secret.as_bytes(), &settings.issuer),
            issuer: settings.issuer,
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
        })
    }

    pub fn issue(&self, subject: impl ToString, kind: TokenKind) -> Result<String, JwtError> {
        self.issue_at(subject, kind, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims::new(subject, self.issuer.clone(), now, ttl);

        self.handler(kind).encode(&claims)
    }

    pub fn validate(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        self.handler(kind).decode(token)
    }

    fn handler(&self, kind: TokenKind) -> &JwtHandler {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TokenSettings {
        TokenSettings {
            issuer: "backoffice".to_string(),
            access_secret: "access_secret_key_at_least_32_bytes!".to_string(),
            refresh_secret: "refresh_secret_key_at_least_32_bytes".to_string(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }

    #[test]
    fn test_issue_and_validate_each_kind() {
        let issuer = TokenIssuer::new(settings()).unwrap();

        let access = issuer.issue(12, TokenKind::Access).unwrap();
        let refresh = issuer.issue(12, TokenKind::Refresh).unwrap();

        let access_claims = issuer.validate(&access, TokenKind::Access).unwrap();
        let refresh_claims = issuer.validate(&refresh, TokenKind::Refresh).unwrap();

        assert_eq!(access_claims.subject_as::<i64>().unwrap(), 12);
        assert_eq!(access_claims.exp - access_claims.iat, 15 * 60);
        assert_eq!(refresh_claims.exp - refresh_claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_kinds_are_not_interchangeable() {
        let issuer = TokenIssuer::new(settings()).unwrap();

        let access = issuer.issue(12, TokenKind::Access).unwrap();
        let refresh = issuer.issue(12, TokenKind::Refresh).unwrap();

        assert_eq!(
            issuer.validate(&access, TokenKind::Refresh),
            Err(JwtError::InvalidSignature)
        );
        assert_eq!(
            issuer.validate(&refresh, TokenKind::Access),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_access_token() {
        let issuer = TokenIssuer::new(settings()).unwrap();
        let token = issuer
            .issue_at(12, TokenKind::Access, Utc::now() - Duration::minutes(16))
            .unwrap();

        assert_eq!(
            issuer.validate(&token, TokenKind::Access),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_new_rejects_empty_configuration() {
        let mut missing_issuer = settings();
        missing_issuer.issuer = " ".to_string();
        assert!(matches!(
            TokenIssuer::new(missing_issuer),
            Err(JwtError::MissingConfiguration("issuer"))
        ));

        let mut missing_secret = settings();
        missing_secret.refresh_secret = String::new();
        assert!(matches!(
            TokenIssuer::new(missing_secret),
            Err(JwtError::MissingConfiguration("refresh secret"))
        ));
    }
}
