//! Outbound ports other than storage.

use async_trait::async_trait;
use daybook_sdk::NutritionFacts;

use super::error::DomainError;

/// External nutrition database.
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Summed facts for everything recognised in `query`, or `None` when
    /// nothing was recognised.
    async fn lookup(&self, query: &str) -> Result<Option<NutritionFacts>, DomainError>;
}
