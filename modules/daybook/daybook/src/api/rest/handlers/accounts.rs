use axum::extract::Extension;
use axum::http::Uri;
use daybook_kit::Authz;
use daybook_kit::api::prelude::*;

use crate::api::rest::dto::{LoginReq, LoginUserDto, SignupReq, TargetReq, TargetResponse, UserDto};
use crate::api::rest::error::to_problem;
use crate::domain::service::AppServices;

pub async fn signup(
    uri: Uri,
    Extension(svc): Extension<AppServices>,
    ApiJson(req): ApiJson<SignupReq>,
) -> ApiResult<impl IntoResponse> {
    let user = svc
        .accounts
        .signup(&req.name, &req.email, &req.password)
        .await
        .map_err(to_problem(&uri))?;
    Ok(created_envelope(UserDto::from(user)))
}

pub async fn login(
    uri: Uri,
    Extension(svc): Extension<AppServices>,
    ApiJson(req): ApiJson<LoginReq>,
) -> ApiResult<impl IntoResponse> {
    let user = svc
        .accounts
        .login(&req.email, &req.password)
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(user_id = %user.id, "login");
    Ok(ok_envelope(LoginUserDto::from(user)))
}

pub async fn get_target(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
) -> ApiResult<impl IntoResponse> {
    let target = svc
        .accounts
        .get_target(&ctx)
        .await
        .map_err(to_problem(&uri))?;
    Ok(Json(TargetResponse {
        success: true,
        target,
    }))
}

pub async fn put_target(
    uri: Uri,
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiJson(req): ApiJson<TargetReq>,
) -> ApiResult<impl IntoResponse> {
    let target = svc
        .accounts
        .set_target(&ctx, req.target)
        .await
        .map_err(to_problem(&uri))?;
    tracing::info!(target, "calorie target updated");
    Ok(Json(TargetResponse {
        success: true,
        target,
    }))
}
