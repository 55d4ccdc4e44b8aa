//! Handlers, in chain order: usage limit, `/start`, companion.

mod companion;
mod start;
mod usage_limit;

pub use companion::{CompanionHandler, APOLOGY};
pub use start::{StartCommandHandler, NEW_CONVERSATION};
pub use usage_limit::{UsageLimit, UsageLimitHandler};
