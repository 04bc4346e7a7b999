//! Document upload, listing, and signed download handlers

use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    http::header,
    response::Response,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use portal_shared::constants::{CLIENT_DOCUMENTS_PREFIX, IDENTITY_DOCUMENTS_PREFIX};

use crate::error::ApiError;
use crate::middleware::{require_client_read, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Which of the two per-user folders a document lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Identity documents backing the KYC form (passport, ID card).
    Identity,
    #[default]
    Client,
}

impl DocumentKind {
    fn folder(&self, user_id: &Uuid) -> String {
        match self {
            DocumentKind::Identity => format!("{}/{}", IDENTITY_DOCUMENTS_PREFIX, user_id),
            DocumentKind::Client => format!("{}/{}", CLIENT_DOCUMENTS_PREFIX, user_id),
        }
    }

    fn from_field(value: &str) -> Option<Self> {
        match value {
            "identity" => Some(DocumentKind::Identity),
            "client" => Some(DocumentKind::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub name: String,
    pub path: String,
    pub url: String,
}

/// Upload a document - POST /api/documents/{user_id} (multipart)
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    require_client_read(&state, &user, &user_id).await?;

    let mut kind = DocumentKind::default();
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "kind" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid kind: {}", e)))?;
                kind = DocumentKind::from_field(&text).ok_or_else(|| {
                    ApiError::BadRequest("kind must be identity or client".to_string())
                })?;
            }
            "file" => {
                filename = field.file_name().map(sanitize_filename);
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let file_data = file_data.ok_or_else(|| ApiError::BadRequest("file required".to_string()))?;
    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("filename required".to_string()))?;

    info!("Storing document {} for user {}", filename, user_id);

    let path = format!("{}/{}", kind.folder(&user_id), filename);
    let stored = state.documents.save(&path, &file_data).await?;
    let url = state.documents.signed_url(&stored).await?;

    Ok(Json(ApiResponse::success(UploadResponse {
        name: filename,
        path: stored,
        url,
    })))
}

#[derive(Debug, Serialize)]
pub struct DocumentEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub kind: &'static str,
    pub url: String,
}

/// List a user's documents with signed URLs - GET /api/documents/{user_id}
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<DocumentEntry>>>, ApiError> {
    require_client_read(&state, &user, &user_id).await?;

    let mut entries = Vec::new();
    for (kind, label) in [
        (DocumentKind::Identity, "identity"),
        (DocumentKind::Client, "client"),
    ] {
        for document in state.documents.list(&kind.folder(&user_id)).await? {
            let url = state.documents.signed_url(&document.path).await?;
            entries.push(DocumentEntry {
                name: document.name,
                path: document.path,
                size: document.size,
                kind: label,
                url,
            });
        }
    }

    Ok(Json(ApiResponse::success(entries)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub kind: DocumentKind,
}

/// Delete one document - DELETE /api/documents/{user_id}/{file}
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, file)): Path<(Uuid, String)>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_client_read(&state, &user, &user_id).await?;

    let file = sanitize_filename(&file);
    if file.is_empty() {
        return Err(ApiError::BadRequest("invalid file name".to_string()));
    }

    let path = format!("{}/{}", params.kind.folder(&user_id), file);
    state.documents.delete(&path).await?;
    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub expires: i64,
    pub sig: String,
}

/// Signed download - GET /api/documents/raw/{*path}
///
/// Public route; access control is the signature itself.
pub async fn download_document(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    if params.expires < Utc::now().timestamp() {
        return Err(ApiError::Unauthorized("Link expired".to_string()));
    }
    if !state.url_signer.verify(&path, params.expires, &params.sig) {
        return Err(ApiError::Unauthorized("Invalid signature".to_string()));
    }

    let content = state.documents.open(&path).await.map_err(|_e| {
        // Don't leak store-layout details on a signed-URL miss
        ApiError::NotFound("Document not found".to_string())
    })?;

    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .body(axum::body::Body::from(content))
        .map_err(|e| ApiError::InternalError(e.to_string()))
}

/// Keep only the final path component of a client-supplied file name.
fn sanitize_filename(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("passeport.pdf"), "passeport.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\tmp\\doc.pdf"), "doc.pdf");
    }

    #[test]
    fn test_document_kind_folders() {
        let id = Uuid::nil();
        assert_eq!(
            DocumentKind::Identity.folder(&id),
            format!("documents/{}", id)
        );
        assert_eq!(
            DocumentKind::Client.folder(&id),
            format!("documents/clients/{}", id)
        );
    }
}
