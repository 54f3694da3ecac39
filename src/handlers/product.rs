use crate::core::error::ProductError;
use crate::core::state::AppState;
use crate::models::product::{ProductUpdate, ProductUpdateResponse};
use crate::utils::client::ClientAddr;
use crate::utils::time::iso_timestamp;
use crate::validation::payload::ProductStatusRequest;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Update a product's status
///
/// POST /api/product
/// Body: `{"username": "...", "productId": 17, "status": "active"}`
///
/// Nothing is stored; the write goes to a simulated store that fails a
/// configurable share of the time.
pub async fn product_status_handler(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    body: Bytes,
) -> Result<Response, ProductError> {
    let request: ProductStatusRequest = if body.iter().all(|b| b.is_ascii_whitespace()) {
        ProductStatusRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ProductError::MalformedRequest(e.to_string()))?
    };

    let update = request.validate().map_err(|e| {
        warn!(client = %client, error = %e, "Rejected product status update");
        e
    })?;

    let processing_ms = match state.product_store.write_status(&update) {
        Ok(ms) => {
            state.metrics.record_product_update(true);
            ms
        }
        Err(e) => {
            state.metrics.record_product_update(false);
            return Err(e);
        }
    };

    info!(
        client = %client,
        product_id = %update.product_id,
        status = %update.status,
        updated_by = %update.username,
        processing_ms,
        "Product status updated"
    );

    Ok((
        StatusCode::OK,
        Json(ProductUpdateResponse {
            success: true,
            message: "Product status updated successfully".to_string(),
            data: ProductUpdate {
                product_id: update.product_id,
                status: update.status.to_string(),
                updated_by: update.username,
                updated_at: iso_timestamp(),
                processing_time: format!("{}ms", processing_ms),
            },
        }),
    )
        .into_response())
}
