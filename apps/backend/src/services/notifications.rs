//! Order confirmation notifications.
//!
//! Dispatch is fire-and-forget: callers hand over an [`OrderConfirmation`]
//! and return immediately. Delivery failures are logged here and never reach
//! the request that triggered them.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::config::SmsConfig;
use crate::error::AppError;
use crate::logging::pii::Redacted;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to tell a customer their order went through.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub customer_name: String,
    pub phone_number: String,
    pub item: String,
    pub amount: f64,
}

pub trait OrderNotifier: Send + Sync {
    /// Must not block and must not fail the caller.
    fn notify_order_confirmed(&self, confirmation: OrderConfirmation);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Simulated,
}

/// Internationalize a phone number.
///
/// `+...` is kept, a leading `0` is replaced by the country code, anything
/// else gets the country code prefixed.
pub fn normalize_phone(phone: &str, country_code: &str) -> String {
    let phone = phone.trim();
    if phone.starts_with('+') {
        phone.to_string()
    } else if let Some(local) = phone.strip_prefix('0') {
        format!("{country_code}{local}")
    } else {
        format!("{country_code}{phone}")
    }
}

/// Two decimals with thousands separators: `1234567.5` -> `1,234,567.50`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

pub fn order_message(confirmation: &OrderConfirmation) -> String {
    format!(
        "Hello {}, your order for {} worth KSH {} has been confirmed. Thank you for your business!",
        confirmation.customer_name,
        confirmation.item,
        format_amount(confirmation.amount)
    )
}

/// SMS delivery through an Africa's Talking style messaging gateway.
#[derive(Clone)]
pub struct SmsNotifier {
    config: Arc<SmsConfig>,
    client: reqwest::Client,
}

impl SmsNotifier {
    pub fn new(config: SmsConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("SMS client: {e}")))?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Send one message, falling back to a logged simulation when the
    /// gateway is not configured or does not accept it.
    pub async fn deliver(&self, to: &str, message: &str) -> DeliveryOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            self.simulate(to, message, "no API key configured");
            return DeliveryOutcome::Simulated;
        };

        let form = [
            ("username", self.config.username.as_str()),
            ("message", message),
            ("to", to),
        ];
        let result = self
            .client
            .post(&self.config.api_url)
            .header("apiKey", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await;

        match result {
            Ok(resp) if matches!(resp.status(), StatusCode::OK | StatusCode::CREATED) => {
                info!(to = %Redacted(to), status = resp.status().as_u16(), "sms.sent");
                DeliveryOutcome::Delivered
            }
            Ok(resp) => {
                let reason = format!("gateway returned {}", resp.status());
                self.simulate(to, message, &reason);
                DeliveryOutcome::Simulated
            }
            Err(e) => {
                self.simulate(to, message, &e.to_string());
                DeliveryOutcome::Simulated
            }
        }
    }

    fn simulate(&self, to: &str, message: &str, reason: &str) {
        warn!(to = %Redacted(to), reason, "sms.gateway_unavailable; simulating delivery");
        info!(
            to = %Redacted(to),
            sender_id = %self.config.sender_id,
            message_len = message.len(),
            "sms.simulated"
        );
    }
}

impl OrderNotifier for SmsNotifier {
    fn notify_order_confirmed(&self, confirmation: OrderConfirmation) {
        let to = normalize_phone(
            &confirmation.phone_number,
            &self.config.default_country_code,
        );
        let message = order_message(&confirmation);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(to = %Redacted(&to), "sms.dropped reason=no_runtime");
            return;
        };
        let notifier = self.clone();
        handle.spawn(async move {
            notifier.deliver(&to, &message).await;
        });
    }
}

/// Keeps confirmations in memory instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OrderConfirmation>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OrderConfirmation> {
        self.sent.lock().clone()
    }
}

impl OrderNotifier for RecordingNotifier {
    fn notify_order_confirmed(&self, confirmation: OrderConfirmation) {
        info!(to = %Redacted(&confirmation.phone_number), "notification.recorded");
        self.sent.lock().push(confirmation);
    }
}
