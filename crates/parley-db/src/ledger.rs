//! Daily token budget guard over the usage ledger.
//!
//! State machine per calendar day: **open** (usage under the limit, no
//! lock), **locked** (`locked_until` in the future), **expired lock**
//! (treated as open again on the next access; the row is not proactively
//! reset).
//!
//! The increment is a single `UPDATE … RETURNING` statement, so two
//! callers racing on the same day both land their tokens in the persisted
//! total — the returned total is compared to the limit only after the
//! write. A plain read-compute-write sequence here would let concurrent
//! requests undercount usage and overshoot the daily quota.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::ParleyDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_optional_datetime};

/// Budget limits applied by [`ParleyDb::add_tokens_and_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetPolicy {
    /// Daily token quota; reaching it locks the ledger.
    pub daily_limit: i64,
    /// How long the ledger stays locked after an overflow.
    pub lockout: Duration,
}

impl BudgetPolicy {
    /// Build a policy with an hour-denominated lockout.
    #[must_use]
    pub fn new(daily_limit: i64, lockout_hours: i64) -> Self {
        Self {
            daily_limit,
            lockout: Duration::hours(lockout_hours),
        }
    }

    /// Build a policy from the budget configuration section.
    #[must_use]
    pub fn from_config(config: &parley_config::BudgetConfig) -> Self {
        Self::new(config.daily_token_limit, config.lockout_hours)
    }
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self::from_config(&parley_config::BudgetConfig::default())
    }
}

/// One persisted ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageDay {
    pub day: NaiveDate,
    pub tokens_used: i64,
    pub locked_until: Option<DateTime<Utc>>,
}

impl UsageDay {
    /// Whether the lock is set and still in the future at `now`.
    #[must_use]
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

impl ParleyDb {
    /// Meter `amount` tokens against today's quota.
    ///
    /// Call sites meter both sides of an LLM call: once with the estimated
    /// prompt size before sending, once with the actual completion size
    /// after receiving.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::LimitReached`] when the ledger is locked or
    /// this call pushes usage to/over the limit; other variants on SQL
    /// failure.
    pub async fn add_tokens_and_check(
        &self,
        amount: i64,
        policy: &BudgetPolicy,
    ) -> Result<i64, DatabaseError> {
        self.add_tokens_and_check_at(Utc::now(), amount, policy)
            .await
    }

    /// Clock-injected variant of [`Self::add_tokens_and_check`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_tokens_and_check`].
    pub async fn add_tokens_and_check_at(
        &self,
        now: DateTime<Utc>,
        amount: i64,
        policy: &BudgetPolicy,
    ) -> Result<i64, DatabaseError> {
        // tokens_used is monotonic within a day.
        let amount = amount.max(0);
        let day = now.date_naive().to_string();

        self.conn()
            .execute(
                "INSERT OR IGNORE INTO usage_ledger (day, tokens_used) VALUES (?1, 0)",
                [day.as_str()],
            )
            .await?;

        // Reject while locked, without applying the increment.
        if let Some(unlock_at) = self.locked_until(&day).await?
            && unlock_at > now
        {
            return Err(DatabaseError::LimitReached { unlock_at });
        }

        // Atomic increment-and-fetch; the comparison happens on the value
        // the database returned, not on a stale read.
        let mut rows = self
            .conn()
            .query(
                "UPDATE usage_ledger SET tokens_used = tokens_used + ?1
                 WHERE day = ?2 RETURNING tokens_used",
                libsql::params![amount, day.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total = row.get::<i64>(0)?;

        if total >= policy.daily_limit {
            let unlock_at = now + policy.lockout;
            // Never shorten a lock another writer already extended.
            self.conn()
                .execute(
                    "UPDATE usage_ledger SET locked_until = ?1
                     WHERE day = ?2 AND (locked_until IS NULL OR locked_until < ?1)",
                    libsql::params![unlock_at.to_rfc3339(), day.as_str()],
                )
                .await?;
            let unlock_at = self.locked_until(&day).await?.unwrap_or(unlock_at);
            warn!(total, limit = policy.daily_limit, %unlock_at, "daily token quota reached, ledger locked");
            return Err(DatabaseError::LimitReached { unlock_at });
        }

        debug!(amount, total, day = %day, "token usage recorded");
        Ok(total)
    }

    /// Read the ledger row for a given day, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on SQL failure or unparseable row data.
    pub async fn usage_on(&self, day: NaiveDate) -> Result<Option<UsageDay>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT day, tokens_used, locked_until FROM usage_ledger WHERE day = ?1",
                [day.to_string().as_str()],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        Ok(Some(row_to_usage_day(&row)?))
    }

    /// Read today's ledger row, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on SQL failure or unparseable row data.
    pub async fn usage_today(&self) -> Result<Option<UsageDay>, DatabaseError> {
        self.usage_on(Utc::now().date_naive()).await
    }

    async fn locked_until(&self, day: &str) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT locked_until FROM usage_ledger WHERE day = ?1",
                [day],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        parse_optional_datetime(get_opt_string(&row, 0)?.as_deref())
    }
}

fn row_to_usage_day(row: &libsql::Row) -> Result<UsageDay, DatabaseError> {
    let day_str = row.get::<String>(0)?;
    let day = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse day '{day_str}': {e}")))?;
    Ok(UsageDay {
        day,
        tokens_used: row.get::<i64>(1)?,
        locked_until: parse_optional_datetime(get_opt_string(row, 2)?.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    async fn test_db() -> ParleyDb {
        ParleyDb::open_local(":memory:").await.unwrap()
    }

    fn policy(limit: i64) -> BudgetPolicy {
        BudgetPolicy::new(limit, 24)
    }

    async fn seed_usage(db: &ParleyDb, day: &str, tokens: i64, locked_until: Option<&str>) {
        db.conn()
            .execute(
                "INSERT INTO usage_ledger (day, tokens_used, locked_until) VALUES (?1, ?2, ?3)",
                libsql::params![day, tokens, locked_until],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn first_call_creates_row_lazily() {
        let db = test_db().await;
        let now = Utc::now();

        let total = db
            .add_tokens_and_check_at(now, 100, &policy(512_000))
            .await
            .unwrap();
        assert_eq!(total, 100);

        let usage = db.usage_on(now.date_naive()).await.unwrap().unwrap();
        assert_eq!(usage.tokens_used, 100);
        assert!(usage.locked_until.is_none());
        assert!(!usage.is_locked_at(now));
    }

    #[tokio::test]
    async fn usage_accumulates_within_a_day() {
        let db = test_db().await;
        let now = Utc::now();
        let p = policy(512_000);

        assert_eq!(db.add_tokens_and_check_at(now, 100, &p).await.unwrap(), 100);
        assert_eq!(db.add_tokens_and_check_at(now, 50, &p).await.unwrap(), 150);
    }

    #[tokio::test]
    async fn overflow_persists_total_and_locks() {
        let db = test_db().await;
        let now = Utc::now();
        let day = now.date_naive().to_string();
        seed_usage(&db, &day, 511_900, None).await;

        let err = db
            .add_tokens_and_check_at(now, 200, &policy(512_000))
            .await
            .unwrap_err();
        let DatabaseError::LimitReached { unlock_at } = err else {
            panic!("expected LimitReached, got {err:?}");
        };
        assert_eq!(unlock_at, now + Duration::hours(24));

        // The overflowing increment is persisted, not rolled back.
        let usage = db.usage_on(now.date_naive()).await.unwrap().unwrap();
        assert_eq!(usage.tokens_used, 512_100);
        assert_eq!(usage.locked_until, Some(unlock_at));
    }

    #[tokio::test]
    async fn exact_limit_also_locks() {
        let db = test_db().await;
        let now = Utc::now();

        let err = db
            .add_tokens_and_check_at(now, 100, &policy(100))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::LimitReached { .. }));
    }

    #[tokio::test]
    async fn locked_ledger_rejects_without_increment() {
        let db = test_db().await;
        let now = Utc::now();
        let day = now.date_naive().to_string();
        let unlock = (now + Duration::hours(3)).to_rfc3339();
        seed_usage(&db, &day, 512_100, Some(&unlock)).await;

        let err = db
            .add_tokens_and_check_at(now, 50, &policy(512_000))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::LimitReached { .. }));

        // The rejected call must not touch the counter.
        let usage = db.usage_on(now.date_naive()).await.unwrap().unwrap();
        assert_eq!(usage.tokens_used, 512_100);
    }

    #[tokio::test]
    async fn expired_lock_reopens_lazily() {
        let db = test_db().await;
        let now = Utc::now();
        let day = now.date_naive().to_string();
        let stale = (now - Duration::hours(1)).to_rfc3339();
        seed_usage(&db, &day, 10, Some(&stale)).await;

        let total = db
            .add_tokens_and_check_at(now, 40, &policy(512_000))
            .await
            .unwrap();
        assert_eq!(total, 50);
    }

    #[tokio::test]
    async fn overflow_past_expired_lock_sets_a_fresh_lock() {
        let db = test_db().await;
        let now = Utc::now();
        let day = now.date_naive().to_string();
        let stale = (now - Duration::hours(2)).to_rfc3339();
        seed_usage(&db, &day, 90, Some(&stale)).await;

        let err = db
            .add_tokens_and_check_at(now, 20, &policy(100))
            .await
            .unwrap_err();
        let DatabaseError::LimitReached { unlock_at } = err else {
            panic!("expected LimitReached, got {err:?}");
        };
        assert_eq!(unlock_at, now + Duration::hours(24));
    }

    #[tokio::test]
    async fn negative_amounts_never_decrease_the_counter() {
        let db = test_db().await;
        let now = Utc::now();
        let p = policy(512_000);

        db.add_tokens_and_check_at(now, 100, &p).await.unwrap();
        let total = db.add_tokens_and_check_at(now, -500, &p).await.unwrap();
        assert_eq!(total, 100);
    }

    #[tokio::test]
    async fn days_are_independent_rows() {
        let db = test_db().await;
        let now = Utc::now();
        let tomorrow = now + Duration::days(1);
        let p = policy(512_000);

        db.add_tokens_and_check_at(now, 100, &p).await.unwrap();
        let total = db.add_tokens_and_check_at(tomorrow, 30, &p).await.unwrap();
        assert_eq!(total, 30);

        assert_eq!(
            db.usage_on(now.date_naive()).await.unwrap().unwrap().tokens_used,
            100
        );
        assert_eq!(
            db.usage_on(tomorrow.date_naive())
                .await
                .unwrap()
                .unwrap()
                .tokens_used,
            30
        );
    }

    #[tokio::test]
    async fn usage_on_missing_day_is_none() {
        let db = test_db().await;
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(db.usage_on(day).await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_increments_never_undercount() {
        let db = Arc::new(test_db().await);
        let now = Utc::now();
        let p = policy(512_000);

        let mut handles = Vec::new();
        for _ in 0..10 {
            let db = Arc::clone(&db);
            handles.push(tokio::spawn(async move {
                db.add_tokens_and_check_at(now, 10, &p).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let usage = db.usage_on(now.date_naive()).await.unwrap().unwrap();
        assert_eq!(usage.tokens_used, 100);
    }

    #[tokio::test]
    async fn limit_reached_message_carries_rfc3339_timestamp() {
        let unlock_at = Utc::now();
        let err = DatabaseError::LimitReached { unlock_at };
        let message = err.to_string();
        assert!(message.contains("Daily token limit reached"));
        assert!(message.contains(&unlock_at.to_rfc3339()));
    }

    #[test]
    fn policy_from_config() {
        let config = parley_config::BudgetConfig {
            daily_token_limit: 1000,
            lockout_hours: 6,
        };
        let p = BudgetPolicy::from_config(&config);
        assert_eq!(p.daily_limit, 1000);
        assert_eq!(p.lockout, Duration::hours(6));

        let default = BudgetPolicy::default();
        assert_eq!(default.daily_limit, 512_000);
        assert_eq!(default.lockout, Duration::hours(24));
    }
}
