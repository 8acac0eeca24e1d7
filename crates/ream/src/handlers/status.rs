//! Status and version handlers

use axum::response::Json as ResponseJson;
use uuid::Uuid;

use crate::types::{BaseResponse, StatusResponse, VersionResponse};

/// GET /status - liveness probe
pub async fn status() -> ResponseJson<BaseResponse<StatusResponse>> {
  ResponseJson(BaseResponse::success(
    StatusResponse { status: "ok".to_string() },
    Uuid::new_v4(),
  ))
}

/// GET /version - server version
pub async fn version() -> ResponseJson<BaseResponse<VersionResponse>> {
  ResponseJson(BaseResponse::success(
    VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() },
    Uuid::new_v4(),
  ))
}
