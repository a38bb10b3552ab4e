//! Route table. Every endpoint is registered through [`OperationBuilder`] so
//! the router and the OpenAPI document cannot drift apart.

use axum::http::StatusCode;
use axum::{Extension, Router};
use daybook_kit::api::{OpenApiRegistry, OperationBuilder};

use crate::api::rest::{dto, handlers};
use crate::domain::service::AppServices;

const FOCUS: &str = "Focus";
const PLANS: &str = "Plans";
const EXPENSES: &str = "Expenses";
const MEALS: &str = "Meals";
const ACCOUNTS: &str = "Accounts";

pub fn register_routes(
    mut router: Router,
    openapi: &mut OpenApiRegistry,
    services: AppServices,
) -> Router {
    router = register_focus(router, openapi);
    router = register_plans(router, openapi);
    router = register_expenses(router, openapi);
    router = register_meals(router, openapi);
    router = register_accounts(router, openapi);

    router = OperationBuilder::get("/dashboard")
        .operation_id("daybook.dashboard")
        .summary("Today's focus, streak and spending in one call")
        .tag("Dashboard")
        .authenticated()
        .day_param()
        .handler(handlers::dashboard::overview)
        .enveloped_response::<dto::DashboardDto>(openapi, StatusCode::OK, "Dashboard")
        .error_400(openapi)
        .error_401(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/health")
        .operation_id("daybook.health")
        .summary("Liveness probe")
        .tag("Health")
        .handler(handlers::health::health)
        .json_response::<dto::HealthDto>(openapi, StatusCode::OK, "Service is up")
        .register(router, openapi);

    router.layer(Extension(services))
}

fn register_focus(mut router: Router, openapi: &mut OpenApiRegistry) -> Router {
    router = OperationBuilder::get("/focus/today")
        .operation_id("daybook.focus.get_today")
        .summary("Get the focus record for a day")
        .description("Returns `data: null` when the day has no record; nothing is created.")
        .tag(FOCUS)
        .authenticated()
        .day_param()
        .handler(handlers::focus::get_today)
        .enveloped_nullable_response::<dto::DailyFocusDto>(openapi, StatusCode::OK, "Focus record or null")
        .error_400(openapi)
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::put("/focus/today")
        .operation_id("daybook.focus.put_today")
        .summary("Create or update the focus record for a day")
        .description("Only the fields present in the body change.")
        .tag(FOCUS)
        .authenticated()
        .day_param()
        .json_request::<dto::UpdateFocusReq>(openapi, "Fields to change")
        .handler(handlers::focus::put_today)
        .enveloped_response::<dto::DailyFocusDto>(openapi, StatusCode::OK, "Saved record")
        .error_400(openapi)
        .error_401(openapi)
        .error_409(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/focus/week")
        .operation_id("daybook.focus.week")
        .summary("Completion of the seven days ending today")
        .tag(FOCUS)
        .authenticated()
        .day_param()
        .handler(handlers::focus::week)
        .enveloped_list_response::<dto::DaySummaryDto>(openapi, StatusCode::OK, "Seven days, oldest first")
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    OperationBuilder::get("/focus/stats")
        .operation_id("daybook.focus.stats")
        .summary("Streak and consistency")
        .tag(FOCUS)
        .authenticated()
        .day_param()
        .handler(handlers::focus::stats)
        .enveloped_response::<dto::FocusStatsDto>(openapi, StatusCode::OK, "Focus stats")
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi)
}

fn register_plans(mut router: Router, openapi: &mut OpenApiRegistry) -> Router {
    router = OperationBuilder::get("/plans")
        .operation_id("daybook.plans.get_current")
        .summary("Plan for the week containing the day")
        .description("A week with no saved plan answers an empty plan without an id.")
        .tag(PLANS)
        .authenticated()
        .day_param()
        .handler(handlers::plans::get_current)
        .enveloped_response::<dto::WeeklyPlanDto>(openapi, StatusCode::OK, "Weekly plan")
        .error_400(openapi)
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    OperationBuilder::put("/plans")
        .operation_id("daybook.plans.put_current")
        .summary("Replace the goals of the week containing the day")
        .tag(PLANS)
        .authenticated()
        .day_param()
        .json_request::<dto::PutPlanReq>(openapi, "Full goal list")
        .handler(handlers::plans::put_current)
        .enveloped_response::<dto::WeeklyPlanDto>(openapi, StatusCode::OK, "Saved plan")
        .error_400(openapi)
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi)
}

fn register_expenses(mut router: Router, openapi: &mut OpenApiRegistry) -> Router {
    router = OperationBuilder::post("/expenses")
        .operation_id("daybook.expenses.create")
        .summary("Record an expense")
        .tag(EXPENSES)
        .authenticated()
        .json_request::<dto::ExpenseReq>(openapi, "New expense")
        .handler(handlers::expenses::create)
        .enveloped_response::<dto::ExpenseDto>(openapi, StatusCode::CREATED, "Created expense")
        .error_400(openapi)
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/expenses")
        .operation_id("daybook.expenses.list")
        .summary("Most recent expenses, newest first")
        .tag(EXPENSES)
        .authenticated()
        .handler(handlers::expenses::list)
        .enveloped_list_response::<dto::ExpenseDto>(openapi, StatusCode::OK, "Expenses")
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/expenses/stats")
        .operation_id("daybook.expenses.stats")
        .summary("Spending today, this week and this month")
        .tag(EXPENSES)
        .authenticated()
        .day_param()
        .handler(handlers::expenses::stats)
        .json_response::<dto::ExpenseStatsDto>(openapi, StatusCode::OK, "Totals")
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::put("/expenses/{id}")
        .operation_id("daybook.expenses.update")
        .summary("Change an expense")
        .tag(EXPENSES)
        .authenticated()
        .path_param("id", "Expense id")
        .json_request::<dto::ExpenseReq>(openapi, "Replacement values")
        .handler(handlers::expenses::update)
        .enveloped_response::<dto::ExpenseDto>(openapi, StatusCode::OK, "Updated expense")
        .error_400(openapi)
        .error_401(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(router, openapi);

    OperationBuilder::delete("/expenses/{id}")
        .operation_id("daybook.expenses.delete")
        .summary("Delete an expense")
        .tag(EXPENSES)
        .authenticated()
        .path_param("id", "Expense id")
        .handler(handlers::expenses::delete)
        .json_response::<dto::SuccessDto>(openapi, StatusCode::OK, "Deleted")
        .error_400(openapi)
        .error_401(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(router, openapi)
}

fn register_meals(mut router: Router, openapi: &mut OpenApiRegistry) -> Router {
    router = OperationBuilder::post("/meals")
        .operation_id("daybook.meals.create")
        .summary("Log a meal")
        .tag(MEALS)
        .authenticated()
        .json_request::<dto::CreateMealReq>(openapi, "New meal")
        .handler(handlers::meals::create)
        .enveloped_response::<dto::MealDto>(openapi, StatusCode::CREATED, "Logged meal")
        .error_400(openapi)
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/meals")
        .operation_id("daybook.meals.list")
        .summary("Meals, newest first, optionally for one day")
        .tag(MEALS)
        .authenticated()
        .day_param()
        .handler(handlers::meals::list)
        .enveloped_list_response::<dto::MealDto>(openapi, StatusCode::OK, "Meals")
        .error_400(openapi)
        .error_401(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/meals/summary")
        .operation_id("daybook.meals.summary")
        .summary("Intake for a day against the calorie target")
        .tag(MEALS)
        .authenticated()
        .day_param()
        .handler(handlers::meals::summary)
        .enveloped_response::<dto::NutritionSummaryDto>(openapi, StatusCode::OK, "Summary")
        .error_401(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(router, openapi);

    OperationBuilder::get("/meals/analyze")
        .operation_id("daybook.meals.analyze")
        .summary("Look up nutrition facts for a food description")
        .tag(MEALS)
        .query_param("query", true, "Food description, e.g. `2 idli`")
        .handler(handlers::meals::analyze)
        .json_response::<dto::AnalyzeResponse>(openapi, StatusCode::OK, "Nutrition facts")
        .error_400(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(router, openapi)
}

fn register_accounts(mut router: Router, openapi: &mut OpenApiRegistry) -> Router {
    router = OperationBuilder::post("/auth/signup")
        .operation_id("daybook.auth.signup")
        .summary("Create a password account")
        .tag(ACCOUNTS)
        .json_request::<dto::SignupReq>(openapi, "Name, email and password")
        .handler(handlers::accounts::signup)
        .enveloped_response::<dto::UserDto>(openapi, StatusCode::CREATED, "Created account")
        .error_400(openapi)
        .error_409(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::post("/auth/login")
        .operation_id("daybook.auth.login")
        .summary("Check an email and password")
        .tag(ACCOUNTS)
        .json_request::<dto::LoginReq>(openapi, "Credentials")
        .handler(handlers::accounts::login)
        .enveloped_response::<dto::LoginUserDto>(openapi, StatusCode::OK, "Account")
        .error_400(openapi)
        .error_500(openapi)
        .register(router, openapi);

    router = OperationBuilder::get("/user/target")
        .operation_id("daybook.user.get_target")
        .summary("Daily calorie target")
        .tag(ACCOUNTS)
        .authenticated()
        .handler(handlers::accounts::get_target)
        .json_response::<dto::TargetResponse>(openapi, StatusCode::OK, "Target")
        .error_401(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(router, openapi);

    OperationBuilder::put("/user/target")
        .operation_id("daybook.user.put_target")
        .summary("Change the daily calorie target")
        .tag(ACCOUNTS)
        .authenticated()
        .json_request::<dto::TargetReq>(openapi, "New target")
        .handler(handlers::accounts::put_target)
        .json_response::<dto::TargetResponse>(openapi, StatusCode::OK, "Target")
        .error_400(openapi)
        .error_401(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(router, openapi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::test_support::InMemoryStore;

    #[test]
    fn every_operation_is_documented_once() {
        let mut registry = OpenApiRegistry::new();
        let _router = register_routes(Router::new(), &mut registry, InMemoryStore::shared().services());

        let ops = registry.operations();
        assert_eq!(ops.len(), 21);
        let mut ids: Vec<_> = ops.iter().filter_map(|o| o.operation_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ops.len());

        for name in ["DailyFocusDto", "WeeklyPlanDto", "ExpenseDto", "MealDto", "Problem"] {
            assert!(registry.has_schema(name), "{name} missing");
        }
        let open: Vec<_> = ops.iter().filter(|o| !o.authenticated).map(|o| o.path.as_str()).collect();
        assert!(open.contains(&"/meals/analyze"));
        assert!(open.contains(&"/auth/signup"));
        assert!(!open.contains(&"/focus/today"));
    }
}
