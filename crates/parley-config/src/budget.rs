//! Daily token budget configuration.

use serde::{Deserialize, Serialize};

/// Default shared daily token quota.
const fn default_daily_token_limit() -> i64 {
    512_000
}

/// Default lockout duration after the quota is hit, in hours.
const fn default_lockout_hours() -> i64 {
    24
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BudgetConfig {
    /// Daily LLM token quota shared across all requests and instances.
    #[serde(default = "default_daily_token_limit")]
    pub daily_token_limit: i64,

    /// How long the ledger stays locked once the quota is reached.
    #[serde(default = "default_lockout_hours")]
    pub lockout_hours: i64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            daily_token_limit: default_daily_token_limit(),
            lockout_hours: default_lockout_hours(),
        }
    }
}
