// Dashboard handlers (d400-d401)
pub mod d400_order_summary;
pub mod d401_order_history;

use axum::http::StatusCode;

use crate::shared::upstream::UpstreamError;

/// Статус ответа для ошибки API магазина
pub(crate) fn upstream_status(error: &UpstreamError) -> StatusCode {
    match error {
        UpstreamError::NotInitialized | UpstreamError::Client(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}
