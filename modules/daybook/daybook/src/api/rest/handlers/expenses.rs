use axum::extract::{Extension, Path};
use axum::http::Uri;
use daybook_kit::Authz;
use daybook_kit::api::bad_request;
use daybook_kit::api::current_trace_id;
use daybook_kit::api::prelude::*;
use uuid::Uuid;

use crate::api::rest::dto::{DayQuery, ExpenseDto, ExpenseReq, ExpenseStatsDto, SuccessDto};
use crate::api::rest::error::to_problem;
use crate::domain::calendar::resolve_today;
use crate::domain::service::AppServices;

/// Ids that are not UUIDs can never match a record; reject them up front.
fn parse_id(uri: &Uri, raw: &str) -> Result<Uuid, Problem> {
    Uuid::parse_str(raw).map_err(|_| {
        bad_request(format!("Invalid expense id: {raw}"))
            .with_code("INVALID_ID")
            .with_instance(uri.path())
            .with_trace_id(current_trace_id())
    })
}

pub async fn create(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiJson(req): ApiJson<ExpenseReq>,
) -> ApiResult<impl IntoResponse> {
    let expense = svc
        .expenses
        .create(&ctx, req.into())
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(expense_id = %expense.id, "expense created");
    Ok(created_envelope(ExpenseDto::from(expense)))
}

pub async fn list(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
) -> ApiResult<impl IntoResponse> {
    let expenses = svc
        .expenses
        .list_recent(&ctx)
        .await
        .map_err(to_problem(&uri))?;
    Ok(ok_envelope(
        expenses.into_iter().map(ExpenseDto::from).collect::<Vec<_>>(),
    ))
}

pub async fn update(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ExpenseReq>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&uri, &id)?;
    let expense = svc
        .expenses
        .update(&ctx, id, req.into())
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(expense_id = %id, "expense updated");
    Ok(ok_envelope(ExpenseDto::from(expense)))
}

pub async fn delete(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&uri, &id)?;
    svc.expenses
        .delete(&ctx, id)
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(expense_id = %id, "expense deleted");
    Ok(Json(SuccessDto { success: true }))
}

/// Totals are answered bare, without the `{success, data}` envelope.
pub async fn stats(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> ApiResult<impl IntoResponse> {
    let stats = svc
        .expenses
        .stats(&ctx, resolve_today(q.date))
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(ExpenseStatsDto::from(stats)))
}

#[cfg(test)]
mod tests {
    use super::super::test_app::{TestApp, body_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn create_list_update_delete() {
        let app = TestApp::new();
        let resp = app
            .post_json("/expenses", json!({ "amount": 12.5, "category": " Food " }))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        assert_eq!(created["data"]["category"], "Food");
        let id = created["data"]["id"].as_str().unwrap().to_owned();

        let listed = body_json(app.get("/expenses").await).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let resp = app
            .put_json(
                &format!("/expenses/{id}"),
                json!({ "amount": 20.0, "category": "Travel", "description": "taxi" }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = body_json(resp).await;
        assert_eq!(updated["data"]["amount"], 20.0);
        assert_eq!(updated["data"]["timestamp"], created["data"]["timestamp"]);

        let resp = app.delete(&format!("/expenses/{id}")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({ "success": true }));

        let resp = app.delete(&format!("/expenses/{id}")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["code"], "EXPENSE_NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_id_is_a_bad_request() {
        let app = TestApp::new();
        let resp = app.delete("/expenses/not-a-uuid").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["code"], "INVALID_ID");
        assert_eq!(json["instance"], "/expenses/not-a-uuid");
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let app = TestApp::new();
        let resp = app
            .post_json("/expenses", json!({ "amount": 0, "category": "Food" }))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["errors"][0]["field"], "amount");
        assert!(app.store.expenses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_are_not_enveloped() {
        let app = TestApp::new();
        app.post_json("/expenses", json!({ "amount": 150, "category": "Food" }))
            .await;
        let json = body_json(app.get("/expenses/stats").await).await;
        assert!(json.get("success").is_none());
        assert_eq!(json["today"], 150.0);
        assert_eq!(json["week"], 150.0);
        assert_eq!(json["month"], 150.0);
    }
}
