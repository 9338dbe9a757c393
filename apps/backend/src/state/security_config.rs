use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

pub const DEFAULT_ISSUER: &str = "https://dev-example.auth0.com/";
pub const DEFAULT_CLIENT_ID: &str = "example-client-id";
pub const DEFAULT_TOKEN_TTL_MINUTES: u64 = 30;

/// Token issuance and verification settings, built once at startup and
/// shared read-only by the token service and the guard.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Expected `iss`; also the base for discovery URLs
    pub issuer: String,
    /// Expected member of `aud`
    pub client_id: String,
    /// Shared HMAC secret
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Opportunistically fetch the issuer's JWK set in the background
    pub fetch_key_set: bool,
}

impl SecurityConfig {
    /// Create a config with the given secret and development defaults for
    /// everything else.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_MINUTES * 60),
            fetch_key_set: false,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_key_set_fetch(mut self, enabled: bool) -> Self {
        self.fetch_key_set = enabled;
        self
    }

    /// `path` resolved against the issuer, with or without a trailing slash
    pub fn issuer_url(&self, path: &str) -> String {
        format!("{}/{}", self.issuer.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn jwks_uri(&self) -> String {
        self.issuer_url(".well-known/jwks.json")
    }

    /// Algorithm name as it appears in JOSE headers and discovery metadata
    pub fn algorithm_name(&self) -> String {
        format!("{:?}", self.algorithm)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec())
    }
}

// Never print the secret.
impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("issuer", &self.issuer)
            .field("client_id", &self.client_id)
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("fetch_key_set", &self.fetch_key_set)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
