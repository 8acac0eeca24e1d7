//! Mapping generation handler

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use uuid::Uuid;

use mapping::error::MappingError;

use crate::state::AppState;
use crate::types::{
  ApiError, BaseResponse, Empty, GenerateMappingRequest, GenerateMappingResponse, MappingData,
};

type HandlerError = (StatusCode, ResponseJson<BaseResponse<Empty>>);

/// POST /mappings/generate - propose template-to-data column mappings
pub async fn generate_mapping(
  State(state): State<AppState>,
  Json(request): Json<GenerateMappingRequest>,
) -> Result<ResponseJson<BaseResponse<GenerateMappingResponse>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  let result = state
    .mappings
    .generate_mapping(
      &request.template_columns,
      &request.data_columns,
      request.command.as_deref(),
    )
    .await;

  match result {
    Ok(mappings) => {
      let mappings: Vec<MappingData> = mappings.iter().map(MappingData::from).collect();
      tracing::info!(count = mappings.len(), "mapping generated");
      Ok(ResponseJson(BaseResponse::success(
        GenerateMappingResponse { mappings },
        transaction_id,
      )))
    }
    Err(e) => {
      tracing::warn!(error = %e, "mapping generation failed");
      let (status, key) = mapping_error_class(&e);
      let error = ApiError::new(key, &e.to_string());
      Err((status, ResponseJson(BaseResponse::error(vec![error], transaction_id))))
    }
  }
}

/// Map mapping error kinds onto response classes: caller mistakes are 400,
/// upstream failures are 502, everything else is a server-side failure
fn mapping_error_class(error: &MappingError) -> (StatusCode, &'static str) {
  match error {
    MappingError::Validation { .. } => (StatusCode::BAD_REQUEST, "invalid_mapping_request"),
    MappingError::Provider { .. } => (StatusCode::BAD_GATEWAY, "inference_upstream_failed"),
    MappingError::Configuration { .. } => {
      (StatusCode::INTERNAL_SERVER_ERROR, "inference_not_configured")
    }
    MappingError::NoContent => (StatusCode::INTERNAL_SERVER_ERROR, "inference_empty_reply"),
    MappingError::Parse { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "inference_reply_invalid"),
  }
}
