/*
 * Responsibility
 * - upload / download / rename / delete / stat handlers
 * - Names from the path or form are validated into FileName before touching storage
 * - The acting subject comes from AuthenticatedClaims (set by the auth middleware)
 */
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::{
    api::{
        dto::files::{MessageResponse, RenameRequest},
        extractors::AuthClaimsExtractor,
    },
    error::AppError,
    services::storage::{FileMeta, FileName},
    state::AppState,
};

const UPLOAD_FIELD: &str = "file";

pub async fn upload(
    State(state): State<AppState>,
    AuthClaimsExtractor(auth): AuthClaimsExtractor,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .ok_or_else(|| AppError::bad_request("invalid_form", "missing file name"))
            .and_then(|raw| FileName::parse(raw).map_err(AppError::from))?;
        let contents = field.bytes().await?;

        state.files.store(&name, &contents).await?;

        info!(
            sub = auth.subject().unwrap_or("-"),
            file = %name,
            size = contents.len(),
            "file uploaded"
        );
        return Ok(Json(MessageResponse::new("File uploaded successfully")));
    }

    Err(AppError::bad_request(
        "invalid_form",
        "Unable to retrieve file from form data",
    ))
}

pub async fn download(
    State(state): State<AppState>,
    AuthClaimsExtractor(auth): AuthClaimsExtractor,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let name = FileName::parse(&filename)?;
    let contents = state.files.fetch(&name).await?;

    let disposition = content_disposition(&name)?;

    info!(sub = auth.subject().unwrap_or("-"), file = %name, "file downloaded");

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    )
        .into_response())
}

// FileName already excludes quotes and control characters.
fn content_disposition(name: &FileName) -> Result<HeaderValue, AppError> {
    let raw = name.as_str();
    let value = if raw.is_ascii() {
        format!("attachment; filename=\"{raw}\"")
    } else {
        // RFC 5987 form for non-ASCII names
        let encoded: String = raw
            .bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                    char::from(b).to_string()
                } else {
                    format!("%{b:02X}")
                }
            })
            .collect();
        format!("attachment; filename*=UTF-8''{encoded}")
    };

    HeaderValue::from_str(&value).map_err(|_| AppError::Internal)
}

pub async fn rename(
    State(state): State<AppState>,
    AuthClaimsExtractor(auth): AuthClaimsExtractor,
    Json(req): Json<RenameRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let from = FileName::parse(&req.from)?;
    let to = FileName::parse(&req.to)?;

    state.files.rename(&from, &to).await?;

    info!(sub = auth.subject().unwrap_or("-"), from = %from, to = %to, "file renamed");
    Ok(Json(MessageResponse::new("File renamed successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthClaimsExtractor(auth): AuthClaimsExtractor,
    Path(filename): Path<String>,
) -> Result<StatusCode, AppError> {
    let name = FileName::parse(&filename)?;
    state.files.delete(&name).await?;

    info!(sub = auth.subject().unwrap_or("-"), file = %name, "file deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stat(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<FileMeta>, AppError> {
    let name = FileName::parse(&filename)?;
    Ok(Json(state.files.stat(&name).await?))
}
