pub mod bearer;
pub mod validated_json;

pub use bearer::{Authorized, ScopeRequirement, WriteScope};
pub use validated_json::{Validate, ValidatedJson};
