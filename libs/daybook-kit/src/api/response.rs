use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// The `{"success": true, "data": ...}` wrapper most endpoints answer with.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 200 OK with an enveloped JSON body.
pub fn ok_envelope<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope::ok(data)))
}

/// 201 Created with an enveloped JSON body.
pub fn created_envelope<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(Envelope::ok(data)))
}
