use daybook_kit::api::prelude::*;

use crate::api::rest::dto::HealthDto;

pub async fn health() -> impl IntoResponse {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}
