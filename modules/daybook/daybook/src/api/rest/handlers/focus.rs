use axum::extract::Extension;
use axum::http::Uri;
use daybook_kit::Authz;
use daybook_kit::api::prelude::*;

use crate::api::rest::dto::{
    DailyFocusDto, DayQuery, DaySummaryDto, FocusStatsDto, UpdateFocusReq,
};
use crate::api::rest::error::to_problem;
use crate::domain::calendar::resolve_today;
use crate::domain::service::AppServices;

pub async fn get_today(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let day = resolve_today(q.date);
    let record = svc.focus.get_today(&ctx, day).await.map_err(to_problem(&uri))?;
    Ok(ok_envelope(record.map(DailyFocusDto::from)))
}

pub async fn put_today(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
    ApiJson(req): ApiJson<UpdateFocusReq>,
) -> ApiResult<impl IntoResponse> {
    let day = resolve_today(q.date);
    let saved = svc
        .focus
        .upsert_today(&ctx, day, req.into())
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(%day, "focus day updated");
    Ok(ok_envelope(DailyFocusDto::from(saved)))
}

pub async fn week(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let days = svc
        .focus
        .week(&ctx, resolve_today(q.date))
        .await
        .map_err(to_problem(&uri))?;
    Ok(ok_envelope(
        days.into_iter().map(DaySummaryDto::from).collect::<Vec<_>>(),
    ))
}

pub async fn stats(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let stats = svc
        .focus
        .stats(&ctx, resolve_today(q.date))
        .await
        .map_err(to_problem(&uri))?;
    Ok(ok_envelope(FocusStatsDto::from(stats)))
}

#[cfg(test)]
mod tests {
    use super::super::test_app::{TestApp, body_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn absent_day_reads_as_null() {
        let app = TestApp::new();
        let resp = app.get("/focus/today?date=2024-03-04").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert!(json["data"].is_null());
        assert!(app.store.focus.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_then_get_returns_flat_modules() {
        let app = TestApp::new();
        let resp = app
            .put_json(
                "/focus/today?date=2024-03-04",
                json!({ "mainFocus": "Ship v1", "modDeepWork": true }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["mainFocus"], "Ship v1");
        assert_eq!(json["data"]["modDeepWork"], true);
        assert_eq!(json["data"]["date"], "2024-03-04");

        let resp = app
            .put_json("/focus/today?date=2024-03-04", json!({ "isCompleted": true }))
            .await;
        let json = body_json(resp).await;
        assert_eq!(json["data"]["mainFocus"], "Ship v1");
        assert_eq!(json["data"]["isCompleted"], true);
        assert_eq!(app.store.focus.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn week_has_seven_entries() {
        let app = TestApp::new();
        let json = body_json(app.get("/focus/week?date=2024-03-10").await).await;
        let days = json["data"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["date"], "2024-03-04");
        assert_eq!(days[6]["hasTask"], false);
    }

    #[tokio::test]
    async fn missing_identity_is_rejected_before_storage() {
        let app = TestApp::new();
        let resp = app.anonymous_get("/focus/today").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(resp).await;
        assert_eq!(json["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn bad_date_is_a_problem() {
        let app = TestApp::new();
        let resp = app.get("/focus/today?date=yesterday").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], "INVALID_QUERY");
    }
}
