//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use common::{
    protocol::{DecryptResponse, EncryptRequest, ErrorResponse, HealthResponse, TxSecureRecord},
    ServiceError,
};
use envelope::{build_record_fields, decrypt_record};
use tracing::{info, warn};
use uuid::Uuid;

use super::state::AppState;
use crate::store::StoreError;

/// Error returned by handlers; renders as an [`ErrorResponse`] body.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(ServiceError::Internal(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if status.is_server_error() {
            warn!(error = %self.0, "request failed");
            "the request could not be completed".to_owned()
        } else {
            self.0.to_string()
        };
        (status, Json(ErrorResponse::new(self.0.code(), message))).into_response()
    }
}

/// `POST /tx/encrypt` — seal a payload and store the resulting record.
///
/// The response is the complete stored record, ciphertext only.
pub async fn encrypt(
    State(state): State<AppState>,
    body: Result<Json<EncryptRequest>, JsonRejection>,
) -> Result<Json<TxSecureRecord>, ApiError> {
    let Json(req) = body.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    if req.party_id.is_empty() {
        return Err(ServiceError::InvalidInput("partyId must not be empty".into()).into());
    }

    let fields = build_record_fields(&req.party_id, &req.payload, &state.master_key)
        .map_err(ServiceError::EncryptionFailure)?;
    let record = TxSecureRecord::new(
        Uuid::new_v4().to_string(),
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        fields,
    );

    state.store.put(record.clone()).await?;
    info!(id = %record.id, "transaction encrypted");
    Ok(Json(record))
}

/// `GET /tx/{id}` — return the stored record unchanged.
pub async fn get_tx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TxSecureRecord>, ApiError> {
    let record = state.store.get(&id).await?.ok_or(ServiceError::NotFound)?;
    Ok(Json(record))
}

/// `POST /tx/{id}/decrypt` — open a stored record with the master key.
///
/// Any envelope failure is a `400` carrying the failure code; the cause of an
/// authentication failure is never distinguished further.
pub async fn decrypt_tx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let record = state.store.get(&id).await?.ok_or(ServiceError::NotFound)?;

    let payload = decrypt_record(&record.fields, &state.master_key).map_err(|e| {
        warn!(id = %id, code = e.code(), "record could not be decrypted");
        ServiceError::Envelope(e)
    })?;

    info!(id = %id, "transaction decrypted");
    Ok(Json(DecryptResponse {
        id: record.id,
        party_id: record.fields.party_id,
        payload,
    }))
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `503 Service Unavailable` if the record store cannot be reached.
pub async fn health(State(state): State<AppState>) -> Response {
    let (status_code, status_str, records) = match state.store.count().await {
        Ok(n) => (StatusCode::OK, "ok", n),
        Err(e) => {
            warn!(error = %e, "record store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", 0)
        }
    };

    let body = HealthResponse {
        status: status_str.into(),
        mk_version: state.master_key.version(),
        records,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
