//! CalorieNinjas natural-language nutrition API.

use std::time::Duration;

use async_trait::async_trait;
use daybook_sdk::NutritionFacts;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::NutritionConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::NutritionProvider;

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Deserialize)]
struct NutritionResponse {
    #[serde(default)]
    items: Vec<NutritionItem>,
}

#[derive(Debug, Deserialize)]
struct NutritionItem {
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    protein_g: f64,
    #[serde(default)]
    carbohydrates_total_g: f64,
    #[serde(default)]
    fat_total_g: f64,
    #[serde(default)]
    fiber_g: f64,
}

impl From<&NutritionItem> for NutritionFacts {
    fn from(item: &NutritionItem) -> Self {
        Self {
            calories: item.calories,
            protein: item.protein_g,
            carbs: item.carbohydrates_total_g,
            fats: item.fat_total_g,
            fiber: item.fiber_g,
        }
    }
}

pub struct CalorieNinjasClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl CalorieNinjasClient {
    /// `None` when no API key is configured.
    pub fn from_config(cfg: &NutritionConfig) -> anyhow::Result<Option<Self>> {
        let Some(api_key) = cfg.resolved_api_key() else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Some(Self {
            client,
            base_url: cfg.base_url.clone(),
            api_key,
        }))
    }
}

#[async_trait]
impl NutritionProvider for CalorieNinjasClient {
    /// Every item the API recognised is summed, so "chicken and rice" yields
    /// one combined total.
    async fn lookup(&self, query: &str) -> Result<Option<NutritionFacts>, DomainError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("query", query)])
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("nutrition request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DomainError::upstream(format!("nutrition API HTTP {status}")));
        }

        let body: NutritionResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("nutrition API returned bad JSON: {e}")))?;

        if body.items.is_empty() {
            return Ok(None);
        }
        Ok(Some(body.items.iter().map(NutritionFacts::from).sum()))
    }
}
