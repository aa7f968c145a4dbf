//! Account module: request identity and the pre-run limit check

mod context;
mod limit;

pub use context::AccountContext;
pub use limit::{check_account_limit, LimitStatus};
