pub mod claims;
pub mod guard;
pub mod key_set;
pub mod token_service;

pub use claims::{Audience, Principal, TokenClaims};
pub use guard::{AuthError, AuthGuard, ADMIN_SCOPE};
pub use key_set::KeySetCache;
pub use token_service::{IssuedToken, TokenError, TokenService};
