use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// `modules.daybook` configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaybookConfig {
    /// Upper bound for free-text fields (titles, notes, categories).
    pub max_field_length: usize,
    pub max_custom_tasks: usize,
    pub max_goals: usize,
    pub recent_expenses_limit: u64,
    pub nutrition: NutritionConfig,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            max_field_length: 2000,
            max_custom_tasks: 50,
            max_goals: 100,
            recent_expenses_limit: 50,
            nutrition: NutritionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NutritionConfig {
    /// CalorieNinjas key. Without it lookups use the built-in demo table.
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.calorieninjas.com/v1/nutrition".to_owned(),
            timeout_secs: 5,
        }
    }
}

/// Fallback for [`NutritionConfig::api_key`] when the config leaves it unset.
pub const NUTRITION_API_KEY_ENV: &str = "CALORIE_NINJA_API_KEY";

impl NutritionConfig {
    /// The configured key, else a non-blank `CALORIE_NINJA_API_KEY`.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<SecretString> {
        self.api_key.clone().or_else(|| {
            std::env::var(NUTRITION_API_KEY_ENV)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from)
        })
    }
}
