use axum::extract::Extension;
use axum::http::Uri;
use daybook_kit::Authz;
use daybook_kit::api::prelude::*;
use daybook_sdk::LookupSource;

use crate::api::rest::dto::{
    AnalyzeQuery, AnalyzeResponse, CreateMealReq, DayQuery, MealDto, NutritionSummaryDto,
};
use crate::api::rest::error::to_problem;
use crate::domain::calendar::resolve_today;
use crate::domain::service::AppServices;

pub const DEMO_MESSAGE: &str = "Using demo data. Add CALORIE_NINJA_API_KEY for full database.";

pub async fn create(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiJson(req): ApiJson<CreateMealReq>,
) -> ApiResult<impl IntoResponse> {
    let meal = svc
        .meals
        .create(&ctx, req.into())
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(meal_id = %meal.id, "meal logged");
    Ok(created_envelope(MealDto::from(meal)))
}

pub async fn list(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let meals = svc
        .meals
        .list(&ctx, q.date)
        .await
        .map_err(to_problem(&uri))?;
    Ok(ok_envelope(meals.into_iter().map(MealDto::from).collect::<Vec<_>>()))
}

pub async fn summary(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let summary = svc
        .meals
        .summary(&ctx, resolve_today(q.date))
        .await
        .map_err(to_problem(&uri))?;
    Ok(ok_envelope(NutritionSummaryDto::from(summary)))
}

/// Open endpoint; no identity headers needed.
pub async fn analyze(
    uri: Uri,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<AnalyzeQuery>,
) -> ApiResult<impl IntoResponse> {
    let query = q.query.unwrap_or_default();
    let lookup = svc
        .meals
        .analyze(&query)
        .await
        .map_err(to_problem(&uri))?;
    let demo = lookup.source == LookupSource::Demo;
    Ok(Json(AnalyzeResponse {
        success: true,
        is_demo: demo.then_some(true),
        message: demo.then(|| DEMO_MESSAGE.to_owned()),
        data: lookup.into(),
    }))
}
