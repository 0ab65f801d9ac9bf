use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户邮箱
    pub exp: i64,    // 过期时间
    pub iat: i64,    // 签发时间
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// 签名有效但已过期
    #[error("token has expired")]
    Expired,
    /// 签名错误、结构损坏或缺少 sub
    #[error("token is invalid")]
    Invalid,
}

/// 签发和校验 JWT，密钥在启动时加载后不再变化
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        // 过期时间由 validate_at 自行比较，这里只校验签名和结构
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            config.jwt_algorithm,
            config.jwt_expiration(),
        )
    }

    /// 返回令牌及其过期时间戳
    pub fn issue(
        &self,
        subject: &str,
        ttl: Option<Duration>,
    ) -> Result<(String, i64), jsonwebtoken::errors::Error> {
        self.issue_at(subject, ttl, Utc::now().timestamp())
    }

    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Option<Duration>,
        now: i64,
    ) -> Result<(String, i64), jsonwebtoken::errors::Error> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expiration = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));

        let claims = Claims {
            sub: subject.to_string(),
            exp: expiration,
            iat: now,
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        Ok((token, expiration))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// 先校验签名，签名有效后再比较过期时间；`now == exp` 仍视为有效
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                TokenError::Invalid
            })?
            .claims;

        if now > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";
    const NOW: i64 = 1_700_000_000;

    fn service() -> TokenService {
        TokenService::new(SECRET, Algorithm::HS256, Duration::from_secs(1800))
    }

    fn sign(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_validates_to_subject() {
        let (token, exp) = service().issue_at("a@x.com", None, NOW).unwrap();
        assert_eq!(exp, NOW + 1800);

        let claims = service().validate_at(&token, NOW).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.iat, NOW);
    }

    #[test]
    fn issue_uses_current_time() {
        let (token, _) = service().issue("a@x.com", None).unwrap();
        assert_eq!(service().validate(&token).unwrap().sub, "a@x.com");
    }

    #[test]
    fn accepted_until_expiry_inclusive() {
        let ttl = Duration::from_secs(60);
        let (token, exp) = service().issue_at("a@x.com", Some(ttl), NOW).unwrap();
        assert_eq!(exp, NOW + 60);

        assert!(service().validate_at(&token, NOW + 60).is_ok());
        assert_eq!(
            service().validate_at(&token, NOW + 61),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let other = TokenService::new(b"other-secret", Algorithm::HS256, Duration::from_secs(60));
        let (token, _) = other.issue_at("a@x.com", None, NOW).unwrap();
        assert_eq!(service().validate_at(&token, NOW), Err(TokenError::Invalid));
    }

    #[test]
    fn bad_signature_wins_over_expiry() {
        let other = TokenService::new(b"other-secret", Algorithm::HS256, Duration::from_secs(60));
        let (token, _) = other.issue_at("a@x.com", None, NOW).unwrap();
        assert_eq!(
            service().validate_at(&token, NOW + 3600),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn malformed_token_is_invalid() {
        assert_eq!(service().validate_at("", NOW), Err(TokenError::Invalid));
        assert_eq!(
            service().validate_at("not.a.token", NOW),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn algorithm_mismatch_is_invalid() {
        let hs512 = TokenService::new(SECRET, Algorithm::HS512, Duration::from_secs(60));
        let (token, _) = hs512.issue_at("a@x.com", None, NOW).unwrap();
        assert_eq!(service().validate_at(&token, NOW), Err(TokenError::Invalid));
    }

    #[test]
    fn missing_or_non_string_subject_is_invalid() {
        let missing = sign(json!({ "exp": NOW + 60, "iat": NOW }));
        assert_eq!(service().validate_at(&missing, NOW), Err(TokenError::Invalid));

        let numeric = sign(json!({ "sub": 42, "exp": NOW + 60, "iat": NOW }));
        assert_eq!(service().validate_at(&numeric, NOW), Err(TokenError::Invalid));
    }

    #[test]
    fn string_expiry_is_invalid() {
        let token = sign(json!({ "sub": "a@x.com", "exp": "2030-01-01T00:00:00+00:00", "iat": NOW }));
        assert_eq!(service().validate_at(&token, NOW), Err(TokenError::Invalid));
    }
}
