use axum::extract::Extension;
use daybook_kit::Authz;
use daybook_kit::api::prelude::*;

use crate::api::rest::dto::{DashboardDto, DayQuery};
use crate::domain::calendar::resolve_today;
use crate::domain::service::AppServices;

/// Sections that fail are reported in `degraded`; the request still succeeds.
pub async fn overview(
    Authz(ctx): Authz,
    Extension(svc): Extension<AppServices>,
    ApiQuery(q): ApiQuery<DayQuery>,
) -> impl IntoResponse {
    let dashboard = svc.dashboard.overview(&ctx, resolve_today(q.date)).await;
    ok_envelope(DashboardDto::from(dashboard))
}
