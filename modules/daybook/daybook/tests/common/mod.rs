#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared setup: a migrated in-memory SQLite database per test.

use daybook::DaybookConfig;
use daybook::DaybookModule;
use daybook::domain::service::AppServices;
use daybook_kit::SecurityContext;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

pub async fn database() -> DatabaseConnection {
    // every pooled connection to :memory: would see its own empty database
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    DaybookModule::migrate(&db).await.expect("migrate");
    db
}

pub async fn module() -> (DaybookModule, DatabaseConnection) {
    let db = database().await;
    let module = DaybookModule::init(&db, &DaybookConfig::default()).expect("init module");
    (module, db)
}

pub async fn services() -> AppServices {
    module().await.0.services().clone()
}

pub fn caller(email: &str) -> SecurityContext {
    SecurityContext::new(Uuid::new_v4(), email)
}
