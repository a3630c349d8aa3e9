use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw, returned as JSON by every echo route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(status))
        .route("/bytes/{len}", any(bytes))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "mock server listening");
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let echo = Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    tracing::debug!(method = %echo.method, path = %echo.path, "echo");
    Json(echo)
}

async fn status(Path(code): Path<u16>) -> Result<StatusCode, StatusCode> {
    StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)
}

async fn bytes(Path(len): Path<usize>) -> Result<Vec<u8>, StatusCode> {
    if len > 1 << 20 {
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }
    Ok((0..len).map(|i| (i % 251) as u8).collect())
}
