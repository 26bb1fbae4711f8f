use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use std::time::Duration;

use crate::shared::format::format_number;

const CYAN: &str = "36";
const BROWN: &str = "33";

/// Одна строка журнала запросов
fn format_line(
    status: StatusCode,
    method: &Method,
    path: &str,
    elapsed: Duration,
    size: Option<usize>,
) -> String {
    // время голубым для 2xx, коричневым для остальных
    let color = if status.is_success() && size.is_some() {
        CYAN
    } else {
        BROWN
    };
    let size = size.map(format_number).unwrap_or_else(|| "error".to_string());

    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color,
        Utc::now().format("%H:%M:%S"),
        elapsed.as_millis(),
        size,
        status.as_u16(),
        method,
        path
    )
}

/// Middleware для логирования HTTP запросов
///
/// Печатает время (UTC), длительность, размер ответа, статус, метод и путь.
/// Тело ответа буферизуется, чтобы узнать реальный размер.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            println!(
                "{}",
                format_line(parts.status, &method, &path, start.elapsed(), Some(bytes.len()))
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            println!(
                "{}",
                format_line(parts.status, &method, &path, start.elapsed(), None)
            );
            tracing::warn!("Cannot read response body of {} {}: {}", method, path, e);
            Response::from_parts(parts, Body::default())
        }
    }
}
