use async_trait::async_trait;
use chrono::NaiveDate;
use daybook_kit::SecurityContext;
use daybook_sdk::{DailyFocus, DailyFocusPatch};

use crate::domain::error::DomainError;

/// Storage of one focus record per (user, day).
#[async_trait]
pub trait FocusRepository: Send + Sync {
    async fn find_by_date(
        &self,
        ctx: &SecurityContext,
        date: NaiveDate,
    ) -> Result<Option<DailyFocus>, DomainError>;

    /// Records with `from <= date <= to`, oldest first.
    async fn find_in_range(
        &self,
        ctx: &SecurityContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyFocus>, DomainError>;

    /// Create the record for `date` from defaults overlaid with `patch`, or
    /// apply `patch` to the existing one, in a single atomic statement.
    /// Owner and date are re-asserted on update.
    async fn upsert(
        &self,
        ctx: &SecurityContext,
        date: NaiveDate,
        patch: &DailyFocusPatch,
    ) -> Result<DailyFocus, DomainError>;
}
