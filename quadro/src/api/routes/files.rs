//! CSV upload and current-file endpoints

use crate::api::AppContext;
use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{CurrentFileResponse, UploadResponse};
use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post},
};
use quadro_agent::NO_FILE_LOADED;
use std::path::Path;
use tracing::warn;

/// Create upload and current-file routes
pub fn file_routes(context: AppContext) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .route("/current", get(current_file))
        .with_state(context)
}

/// POST /upload - store a CSV file and load it into the agent
async fn upload(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut stored = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("Erro ao ler o upload: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(sanitize_filename)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Arquivo sem nome.".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(format!("Erro ao ler o arquivo: {err}")))?;

        tokio::fs::create_dir_all(&ctx.files_dir)
            .await
            .map_err(|err| ApiError::Internal(format!("Erro ao preparar o diretório: {err}")))?;
        let path = ctx.files_dir.join(&filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|err| ApiError::Internal(format!("Erro ao salvar o arquivo: {err}")))?;
        stored = Some((filename, path));
        break;
    }

    let Some((filename, path)) = stored else {
        return Err(ApiError::BadRequest("Nenhum arquivo enviado.".to_string()));
    };

    match ctx.agent.load_file(&path).await {
        Ok(_) => Ok(Json(UploadResponse {
            message: format!("Arquivo '{filename}' carregado com sucesso!"),
            filename,
        })),
        Err(err) => {
            warn!(error = %err, file = %path.display(), "falha ao carregar o CSV");
            Err(ApiError::BadRequest("Erro ao carregar o arquivo.".to_string()))
        }
    }
}

/// GET /current - which file is loaded
async fn current_file(State(ctx): State<AppContext>) -> Json<CurrentFileResponse> {
    match ctx.agent.current_file().await {
        Some(path) => Json(CurrentFileResponse {
            current_file: Some(path.display().to_string()),
            message: None,
        }),
        None => Json(CurrentFileResponse {
            current_file: None,
            message: Some(NO_FILE_LOADED.to_string()),
        }),
    }
}

// Browsers send whatever name the user's disk had; only the final path
// component may reach the files directory.
fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
