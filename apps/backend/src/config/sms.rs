use super::env::{opt_var, var_or};

pub const DEFAULT_SMS_API_URL: &str = "https://api.sandbox.africastalking.com/version1/messaging";

/// SMS gateway settings for order confirmations.
#[derive(Clone)]
pub struct SmsConfig {
    pub username: String,
    /// `None` switches delivery to simulation (logged only)
    pub api_key: Option<String>,
    pub sender_id: String,
    pub api_url: String,
    /// Prefix used to internationalize local numbers
    pub default_country_code: String,
}

impl SmsConfig {
    /// `AT_USERNAME`, `AT_API_KEY`, `AT_SENDER_ID`, `AT_API_URL`,
    /// `SMS_DEFAULT_COUNTRY_CODE`
    pub fn from_env() -> Self {
        Self {
            username: var_or("AT_USERNAME", "sandbox"),
            api_key: opt_var("AT_API_KEY"),
            sender_id: var_or("AT_SENDER_ID", "SAVANNAH"),
            api_url: var_or("AT_API_URL", DEFAULT_SMS_API_URL),
            default_country_code: var_or("SMS_DEFAULT_COUNTRY_CODE", "+254"),
        }
    }

    /// Simulation-only settings.
    pub fn simulated() -> Self {
        Self {
            username: "sandbox".to_string(),
            api_key: None,
            sender_id: "SAVANNAH".to_string(),
            api_url: DEFAULT_SMS_API_URL.to_string(),
            default_country_code: "+254".to_string(),
        }
    }
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("sender_id", &self.sender_id)
            .field("api_url", &self.api_url)
            .field("default_country_code", &self.default_country_code)
            .finish()
    }
}
