//! Report store handlers

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use uuid::Uuid;

use reports::error::StoreError;
use reports::report::NewReport;
use reports::store::DEFAULT_SIMILAR_LIMIT;

use crate::state::AppState;
use crate::types::{
  ApiError, BaseResponse, CreateReportRequest, Empty, GetReportRequest, ListByCompanyRequest,
  ListByTemplateRequest, ListReportsResponse, RemoveReportRequest, ReportData, ReportResponse,
  SimilarReportData, SimilarReportsRequest, SimilarReportsResponse, UpdateEmbeddingRequest,
};

type HandlerError = (StatusCode, ResponseJson<BaseResponse<Empty>>);

/// POST /reports - persist a finished report
pub async fn create_report(
  State(state): State<AppState>,
  Json(request): Json<CreateReportRequest>,
) -> Result<ResponseJson<BaseResponse<ReportResponse>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  let input = NewReport {
    company_id: request.company_id,
    template_id: request.template_id,
    period_start: request.period_start,
    period_end: request.period_end,
    metrics_json: request.metrics_json,
    final_text: request.final_text,
    embedding: request.embedding,
    file_url: request.file_url,
  };

  match state.store.create(input).await {
    Ok(report) => Ok(ResponseJson(BaseResponse::success(
      ReportResponse { report: ReportData::from(&report) },
      transaction_id,
    ))),
    Err(e) => Err(store_failure("report_create_failed", e, transaction_id)),
  }
}

/// POST /reports/get - point lookup by id
pub async fn get_report(
  State(state): State<AppState>,
  Json(request): Json<GetReportRequest>,
) -> Result<ResponseJson<BaseResponse<ReportResponse>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  match state.store.find_by_id(request.id).await {
    Ok(Some(report)) => Ok(ResponseJson(BaseResponse::success(
      ReportResponse { report: ReportData::from(&report) },
      transaction_id,
    ))),
    Ok(None) => {
      let error =
        ApiError::new("report_not_found", &format!("Report {} not found", request.id));
      Err((
        StatusCode::NOT_FOUND,
        ResponseJson(BaseResponse::error(vec![error], transaction_id)),
      ))
    }
    Err(e) => Err(store_failure("report_lookup_failed", e, transaction_id)),
  }
}

/// POST /reports/list/company - a tenant's reports, newest first
pub async fn list_by_company(
  State(state): State<AppState>,
  Json(request): Json<ListByCompanyRequest>,
) -> Result<ResponseJson<BaseResponse<ListReportsResponse>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  match state.store.find_by_company(&request.company_id).await {
    Ok(found) => {
      let reports: Vec<ReportData> = found.iter().map(ReportData::from).collect();
      let count = reports.len();
      Ok(ResponseJson(BaseResponse::success(
        ListReportsResponse { reports, count },
        transaction_id,
      )))
    }
    Err(e) => Err(store_failure("report_list_failed", e, transaction_id)),
  }
}

/// POST /reports/list/template - a template's reports, newest first
pub async fn list_by_template(
  State(state): State<AppState>,
  Json(request): Json<ListByTemplateRequest>,
) -> Result<ResponseJson<BaseResponse<ListReportsResponse>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  match state.store.find_by_template(&request.template_id).await {
    Ok(found) => {
      let reports: Vec<ReportData> = found.iter().map(ReportData::from).collect();
      let count = reports.len();
      Ok(ResponseJson(BaseResponse::success(
        ListReportsResponse { reports, count },
        transaction_id,
      )))
    }
    Err(e) => Err(store_failure("report_list_failed", e, transaction_id)),
  }
}

/// POST /reports/similar - tenant-scoped nearest neighbors
pub async fn similar_reports(
  State(state): State<AppState>,
  Json(request): Json<SimilarReportsRequest>,
) -> Result<ResponseJson<BaseResponse<SimilarReportsResponse>>, HandlerError> {
  let transaction_id = Uuid::new_v4();
  let limit = request.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT);

  match state.store.find_similar(&request.embedding, &request.company_id, limit).await {
    Ok(found) => {
      let results: Vec<SimilarReportData> = found.iter().map(SimilarReportData::from).collect();
      let count = results.len();
      Ok(ResponseJson(BaseResponse::success(
        SimilarReportsResponse { results, count },
        transaction_id,
      )))
    }
    Err(e) => Err(store_failure("similarity_query_failed", e, transaction_id)),
  }
}

/// PUT /reports/embedding - backfill or overwrite a report's embedding
pub async fn update_embedding(
  State(state): State<AppState>,
  Json(request): Json<UpdateEmbeddingRequest>,
) -> Result<ResponseJson<BaseResponse<Empty>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  match state.store.update_embedding(request.id, request.embedding).await {
    Ok(()) => Ok(ResponseJson(BaseResponse::success(Empty {}, transaction_id))),
    Err(e) => Err(store_failure("embedding_update_failed", e, transaction_id)),
  }
}

/// DELETE /reports/remove - delete a report
pub async fn remove_report(
  State(state): State<AppState>,
  Json(request): Json<RemoveReportRequest>,
) -> Result<ResponseJson<BaseResponse<Empty>>, HandlerError> {
  let transaction_id = Uuid::new_v4();

  match state.store.delete(request.id).await {
    Ok(()) => Ok(ResponseJson(BaseResponse::success(Empty {}, transaction_id))),
    Err(e) => Err(store_failure("report_delete_failed", e, transaction_id)),
  }
}

/// Wrap a store error in the response envelope with its status class
fn store_failure(key: &str, error: StoreError, transaction_id: Uuid) -> HandlerError {
  tracing::warn!(error = %error, "store operation failed");

  let status = match &error {
    StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
    StoreError::DimensionMismatch { .. } | StoreError::Validation { .. } => {
      StatusCode::BAD_REQUEST
    }
  };

  let api_error = ApiError::new(key, &error.to_string());
  (status, ResponseJson(BaseResponse::error(vec![api_error], transaction_id)))
}
