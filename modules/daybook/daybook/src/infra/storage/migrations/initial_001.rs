use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

const POSTGRES_UP: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY NOT NULL,
    email VARCHAR(254) NOT NULL,
    name VARCHAR(255) NOT NULL,
    password_hash TEXT NULL,
    calorie_target INTEGER NOT NULL DEFAULT 2000,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS daily_focus (
    id UUID PRIMARY KEY NOT NULL,
    user_id UUID NOT NULL,
    user_email VARCHAR(254) NOT NULL,
    date DATE NOT NULL,
    main_focus TEXT NOT NULL DEFAULT '',
    is_completed BOOLEAN NOT NULL DEFAULT FALSE,
    system_boot BOOLEAN NOT NULL DEFAULT FALSE,
    planning BOOLEAN NOT NULL DEFAULT FALSE,
    deep_work BOOLEAN NOT NULL DEFAULT FALSE,
    debugging BOOLEAN NOT NULL DEFAULT FALSE,
    learning BOOLEAN NOT NULL DEFAULT FALSE,
    hygiene BOOLEAN NOT NULL DEFAULT FALSE,
    admin BOOLEAN NOT NULL DEFAULT FALSE,
    shutdown BOOLEAN NOT NULL DEFAULT FALSE,
    custom_tasks JSONB NOT NULL DEFAULT '[]',
    notes TEXT NOT NULL DEFAULT '',
    reflection TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_daily_focus_user_date ON daily_focus(user_id, date);

CREATE TABLE IF NOT EXISTS weekly_plans (
    id UUID PRIMARY KEY NOT NULL,
    user_id UUID NOT NULL,
    user_email VARCHAR(254) NOT NULL,
    week_start_date DATE NOT NULL,
    goals JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_weekly_plans_user_week ON weekly_plans(user_id, week_start_date);

CREATE TABLE IF NOT EXISTS expenses (
    id UUID PRIMARY KEY NOT NULL,
    user_id UUID NOT NULL,
    user_email VARCHAR(254) NOT NULL,
    amount DOUBLE PRECISION NOT NULL,
    category VARCHAR(255) NOT NULL,
    description TEXT NULL,
    timestamp TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_expenses_user_timestamp ON expenses(user_id, timestamp);

CREATE TABLE IF NOT EXISTS meals (
    id UUID PRIMARY KEY NOT NULL,
    user_id UUID NOT NULL,
    name TEXT NOT NULL,
    calories DOUBLE PRECISION NOT NULL DEFAULT 0,
    protein DOUBLE PRECISION NOT NULL DEFAULT 0,
    carbs DOUBLE PRECISION NOT NULL DEFAULT 0,
    fats DOUBLE PRECISION NOT NULL DEFAULT 0,
    fiber DOUBLE PRECISION NOT NULL DEFAULT 0,
    meal_type VARCHAR(16) NOT NULL DEFAULT 'Snack',
    date TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, date);
";

const SQLITE_UP: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    email TEXT NOT NULL,
    name TEXT NOT NULL,
    password_hash TEXT NULL,
    calorie_target INTEGER NOT NULL DEFAULT 2000,
    created_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS daily_focus (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    user_email TEXT NOT NULL,
    date TEXT NOT NULL,
    main_focus TEXT NOT NULL DEFAULT '',
    is_completed INTEGER NOT NULL DEFAULT 0,
    system_boot INTEGER NOT NULL DEFAULT 0,
    planning INTEGER NOT NULL DEFAULT 0,
    deep_work INTEGER NOT NULL DEFAULT 0,
    debugging INTEGER NOT NULL DEFAULT 0,
    learning INTEGER NOT NULL DEFAULT 0,
    hygiene INTEGER NOT NULL DEFAULT 0,
    admin INTEGER NOT NULL DEFAULT 0,
    shutdown INTEGER NOT NULL DEFAULT 0,
    custom_tasks TEXT NOT NULL DEFAULT '[]',
    notes TEXT NOT NULL DEFAULT '',
    reflection TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_daily_focus_user_date ON daily_focus(user_id, date);

CREATE TABLE IF NOT EXISTS weekly_plans (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    user_email TEXT NOT NULL,
    week_start_date TEXT NOT NULL,
    goals TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_weekly_plans_user_week ON weekly_plans(user_id, week_start_date);

CREATE TABLE IF NOT EXISTS expenses (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    user_email TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    description TEXT NULL,
    timestamp TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_expenses_user_timestamp ON expenses(user_id, timestamp);

CREATE TABLE IF NOT EXISTS meals (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    calories REAL NOT NULL DEFAULT 0,
    protein REAL NOT NULL DEFAULT 0,
    carbs REAL NOT NULL DEFAULT 0,
    fats REAL NOT NULL DEFAULT 0,
    fiber REAL NOT NULL DEFAULT 0,
    meal_type TEXT NOT NULL DEFAULT 'Snack',
    date TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, date);
";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let sql = match manager.get_database_backend() {
            DatabaseBackend::Postgres => POSTGRES_UP,
            DatabaseBackend::Sqlite => SQLITE_UP,
            DatabaseBackend::MySql => {
                return Err(DbErr::Migration("MySQL is not supported".to_owned()));
            }
        };
        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let sql = "DROP TABLE IF EXISTS meals;
DROP TABLE IF EXISTS expenses;
DROP TABLE IF EXISTS weekly_plans;
DROP TABLE IF EXISTS daily_focus;
DROP TABLE IF EXISTS users;";
        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
