use axum::extract::Extension;
use axum::http::Uri;
use daybook_kit::Authz;
use daybook_kit::api::prelude::*;

use crate::api::rest::dto::{DayQuery, PutPlanReq, WeeklyPlanDto};
use crate::api::rest::error::to_problem;
use crate::domain::calendar::resolve_today;
use crate::domain::service::AppServices;

pub async fn get_current(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let plan = svc
        .plans
        .get_current(&ctx, resolve_today(q.date))
        .await
        .map_err(to_problem(&uri))?;
    Ok(ok_envelope(WeeklyPlanDto::from(plan)))
}

pub async fn put_current(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
    ApiJson(req): ApiJson<PutPlanReq>,
) -> ApiResult<impl IntoResponse> {
    let goals = req.goals.into_iter().map(Into::into).collect();
    let plan = svc
        .plans
        .put_current(&ctx, resolve_today(q.date), goals)
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(week_start = %plan.week_start_date, "weekly plan replaced");
    Ok(ok_envelope(WeeklyPlanDto::from(plan)))
}

#[cfg(test)]
mod tests {
    use super::super::test_app::{TestApp, body_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn unsaved_week_has_no_id_and_is_not_stored() {
        let app = TestApp::new();
        let json = body_json(app.get("/plans?date=2024-01-07").await).await;
        assert!(json["data"]["id"].is_null());
        assert_eq!(json["data"]["weekStartDate"], "2024-01-01");
        assert_eq!(json["data"]["goals"], json!([]));
        assert!(app.store.plans.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_replaces_goals_for_the_monday() {
        let app = TestApp::new();
        let body = json!({ "goals": [{ "id": "g1", "title": "Read", "startTime": "09:00" }] });
        let resp = app.put_json("/plans?date=2024-01-10", body).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["weekStartDate"], "2024-01-08");
        assert_eq!(json["data"]["goals"][0]["startTime"], "09:00");
        assert!(json["data"]["id"].is_string());

        let resp = app.put_json("/plans?date=2024-01-14", json!({ "goals": [] })).await;
        assert_eq!(body_json(resp).await["data"]["goals"], json!([]));
        assert_eq!(app.store.plans.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn goals_field_is_required() {
        let app = TestApp::new();
        let resp = app.put_json("/plans", json!({})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], "INVALID_BODY");
    }
}
