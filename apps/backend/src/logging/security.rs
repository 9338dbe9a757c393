use tracing::warn;

use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Log a rejected authentication or authorization attempt.
///
/// Only the machine reason is recorded; the credential never is.
pub fn auth_rejected(reason: ErrorCode, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason = reason.as_str(),
        path,
        "Request rejected by authorization guard"
    );
}

/// Log a token issuance from the demo token endpoint.
pub fn token_issued(subject: &str, scope: &str) {
    let trace_id = trace_ctx::trace_id();

    tracing::info!(
        event = "SECURITY_TOKEN_ISSUED",
        %trace_id,
        subject,
        scope,
        "Access token issued"
    );
}
