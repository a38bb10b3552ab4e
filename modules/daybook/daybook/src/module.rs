use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use daybook_kit::api::{OpenApiInfo, OpenApiRegistry};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::routes;
use crate::config::DaybookConfig;
use crate::domain::ports::NutritionProvider;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::nutrition::CalorieNinjasClient;
use crate::infra::storage::{self, migrations::Migrator};

/// The daybook module, wired over one database connection.
#[derive(Clone)]
pub struct DaybookModule {
    services: AppServices,
}

impl DaybookModule {
    /// Build services over `db` without touching the schema.
    ///
    /// # Errors
    /// Fails when the nutrition HTTP client cannot be constructed.
    pub fn init(db: &DatabaseConnection, config: &DaybookConfig) -> anyhow::Result<Self> {
        info!("Initializing daybook module");

        let nutrition: Option<Arc<dyn NutritionProvider>> =
            match CalorieNinjasClient::from_config(&config.nutrition)? {
                Some(client) => {
                    info!(base_url = %config.nutrition.base_url, "nutrition API enabled");
                    Some(Arc::new(client))
                }
                None => {
                    info!("no nutrition API key; lookups use the demo table");
                    None
                }
            };

        let services = AppServices::new(
            storage::repositories(db),
            nutrition,
            &ServiceConfig::from(config),
        );

        info!("Daybook module initialized");
        Ok(Self { services })
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Fails when a migration fails or the backend is unsupported.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running daybook database migrations");
        Migrator::up(db, None).await?;
        info!("Daybook database migrations completed successfully");
        Ok(())
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    /// Add the module's routes to `router` and describe them in `openapi`.
    pub fn register_rest(&self, router: Router, openapi: &mut OpenApiRegistry) -> Router {
        info!("Registering daybook REST routes");
        routes::register_routes(router, openapi, self.services.clone())
    }

    /// Every route plus `GET /openapi.json`.
    #[must_use]
    pub fn router(&self, info: &OpenApiInfo) -> Router {
        let mut registry = OpenApiRegistry::new();
        let router = self.register_rest(Router::new(), &mut registry);
        let document = registry.build_openapi(info);
        router.route(
            "/openapi.json",
            get(move || {
                let document = document.clone();
                async move { Json(document) }
            }),
        )
    }
}
