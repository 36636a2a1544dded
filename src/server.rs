//! HTTP controller: `POST /decode` with multipart upload.
//!
//! Every failure is answered with a bare status code and an empty body.

use std::net::SocketAddr;

use axum::Router;
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use crate::config::Limits;
use crate::error::Error;
use crate::{decode_image_bytes, format};

#[derive(Debug, Clone)]
struct AppState {
    limits: Limits,
}

/// Build the service router exposing `POST /decode`.
pub fn router(limits: Limits) -> Router {
    Router::new()
        .route("/decode", post(decode_upload))
        .layer(DefaultBodyLimit::max(limits.max_upload_bytes))
        .with_state(AppState { limits })
}

/// Serve until ctrl-c.
pub async fn serve(bind: SocketAddr, limits: Limits) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(limits))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        return;
    }
    tracing::info!("received ctrl-c, shutting down");
}

async fn decode_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, Error> {
    let mut multipart = multipart.map_err(|err| Error::MalformedUpload(err.body_text()))?;
    let limits = state.limits;
    let upload = read_upload(&mut multipart, limits.max_upload_bytes).await?;

    // Image and symbol decoding are CPU-bound
    let texts = tokio::task::spawn_blocking(move || decode_image_bytes(&upload, &limits))
        .await
        .map_err(|err| Error::Fault(format!("decode task failed: {err}")))??;

    tracing::info!(symbols = texts.len(), "decoded upload");
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format::render(&texts),
    )
        .into_response())
}

/// Bytes of the first part carrying a `Content-Disposition` header.
async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<Bytes, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, limit))?
    {
        if !field.headers().contains_key(header::CONTENT_DISPOSITION) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("<unnamed>").to_owned();
        tracing::info!(%file_name, "decoding uploaded file");
        return field.bytes().await.map_err(|err| multipart_error(err, limit));
    }
    Err(Error::MissingUpload)
}

fn multipart_error(err: MultipartError, limit: usize) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::UploadTooLarge { limit }
    } else {
        Error::MalformedUpload(err.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "decode request failed");
        } else {
            tracing::info!(error = %self, status = status.as_u16(), "decode request rejected");
        }
        status.into_response()
    }
}
