pub mod daily_focus;
pub mod expense;
pub mod meal;
pub mod user;
pub mod weekly_plan;
