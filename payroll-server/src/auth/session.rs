//! Session token service
//!
//! Issues and validates the signed HS256 tokens carried in the `session`
//! cookie. The cookie is the sole authorization signal: a request either
//! presents a valid, unexpired token (Authenticated) or it does not
//! (Anonymous).

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Session lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            // Fresh random secret per process: all sessions are invalidated
            // on restart, which is acceptable for this internal tool.
            tracing::warn!("SESSION_SECRET not set, generating a random session secret");
            generate_secret()
        });

        Self {
            secret,
            expiration_minutes: std::env::var("SESSION_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 24 hours
            issuer: "payroll-server".to_string(),
        }
    }
}

fn generate_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().r#gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    /// Username (for logging and the /me endpoint)
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session token expired")]
    Expired,

    #[error("invalid session token: {0}")]
    Invalid(String),

    #[error("failed to sign session token: {0}")]
    Signing(String),
}

/// Service for creating and validating session tokens
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a session token for a logged-in user
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Validate a session token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(e.to_string()),
            })
    }

    /// Session lifetime in seconds (cookie Max-Age)
    pub fn max_age_secs(&self) -> i64 {
        self.config.expiration_minutes * 60
    }

    /// Build the Set-Cookie value that establishes a session
    pub fn login_cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.max_age_secs()
        )
    }

    /// Build the Set-Cookie value that clears the session
    pub fn logout_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Extract the session token from a request's Cookie header value
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}
