use sea_orm::entity::prelude::*;

/// One row per (user_id, date); enforced by `idx_daily_focus_user_date`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_focus")]
#[allow(clippy::struct_excessive_bools)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub date: Date,
    pub main_focus: String,
    pub is_completed: bool,
    pub system_boot: bool,
    pub planning: bool,
    pub deep_work: bool,
    pub debugging: bool,
    pub learning: bool,
    pub hygiene: bool,
    pub admin: bool,
    pub shutdown: bool,
    pub custom_tasks: Json,
    pub notes: String,
    pub reflection: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
