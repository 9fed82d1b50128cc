use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// HS256 signer/verifier bound to one secret and one issuer.
///
/// Verification pins the algorithm list to HS256 only, so a token whose header
/// names any other algorithm (`none`, `RS256`, `HS512`, ...) is rejected before
/// its signature is looked at.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a handler for `secret` that only accepts tokens from `issuer`.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in configuration or secure vaults, never in code
    pub fn new(secret: &[u8], issuer: &str) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature, algorithm, issuer and expiry, then return the claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` has elapsed
    /// * `InvalidSignature` - signature does not match this secret
    /// * `UnexpectedAlgorithm` - header names an algorithm other than HS256
    /// * `InvalidIssuer` - `iss` differs from the configured issuer
    /// * `Malformed` - token cannot be parsed or lacks a required claim
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::UnexpectedAlgorithm
                }
                ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn claims(ttl: Duration) -> Claims {
        Claims::new(7, "backoffice", Utc::now(), ttl)
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET, "backoffice");
        let original = claims(Duration::minutes(5));

        let token = handler.encode(&original).expect("Failed to encode token");
        let decoded = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let signer = JwtHandler::new(SECRET, "backoffice");
        let verifier = JwtHandler::new(b"another_secret_key_at_least_32_bytes", "backoffice");

        let token = signer.encode(&claims(Duration::minutes(5))).unwrap();

        assert_eq!(verifier.decode(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_tampered_signature() {
        let handler = JwtHandler::new(SECRET, "backoffice");
        let token = handler.encode(&claims(Duration::minutes(5))).unwrap();

        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let mut flipped: Vec<char> = signature.chars().collect();
        flipped[0] = if flipped[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", unsigned, flipped.into_iter().collect::<String>());

        assert!(handler.decode(&tampered).is_err());
    }

    #[test]
    fn test_decode_expired() {
        let handler = JwtHandler::new(SECRET, "backoffice");
        let expired = Claims::new(
            7,
            "backoffice",
            Utc::now() - Duration::hours(1),
            Duration::minutes(15),
        );
        let token = handler.encode(&expired).unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_rejects_other_algorithm() {
        let handler = JwtHandler::new(SECRET, "backoffice");
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims(Duration::minutes(5)),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::UnexpectedAlgorithm));
    }

    #[test]
    fn test_decode_rejects_foreign_issuer() {
        let signer = JwtHandler::new(SECRET, "someone-else");
        let verifier = JwtHandler::new(SECRET, "backoffice");

        let foreign = Claims::new(7, "someone-else", Utc::now(), Duration::minutes(5));
        let token = signer.encode(&foreign).unwrap();

        assert_eq!(verifier.decode(&token), Err(JwtError::InvalidIssuer));
    }

    #[test]
    fn test_decode_garbage() {
        let handler = JwtHandler::new(SECRET, "backoffice");

        assert!(matches!(
            handler.decode("invalid.token.here"),
            Err(JwtError::Malformed(_))
        ));
    }
}
