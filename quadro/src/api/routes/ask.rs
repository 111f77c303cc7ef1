//! Question endpoint: textual answers or synthesized charts.
//!
//! The pipeline per request: agent → normalizer → classifier → renderer.
//! Chartable payloads come back as a PNG attachment; everything else, the
//! decoded structure or the agent's reply, under `{"response": …}`. Hard
//! classifier/renderer errors stay HTTP 200 with an explanatory text so the
//! client contract never changes shape.

use crate::api::AppContext;
use crate::api::types::{AskForm, AskResponse};
use axum::{
    Form, Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};
use quadro_chart::render;
use quadro_core::{NormalizedResponse, classify, normalize};
use serde_json::json;
use tracing::warn;

/// Create the question route
pub fn ask_routes(context: AppContext) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .with_state(context)
}

/// POST /ask - answer a question as text or as a PNG chart
async fn ask(State(ctx): State<AppContext>, Form(form): Form<AskForm>) -> Response {
    let reply = ctx.agent.ask(&form.pergunta).await;
    let answer = reply.answer_text();

    let payload = match normalize(answer) {
        NormalizedResponse::Structured(payload) => payload,
        NormalizedResponse::Text(_) => {
            let response =
                serde_json::to_value(&reply).unwrap_or_else(|_| json!({ "output": answer }));
            return Json(AskResponse { response }).into_response();
        }
    };

    match classify(&payload) {
        Ok(Some(archetype)) => match render(&payload, archetype) {
            Ok(png) => png_attachment(png),
            Err(err) => {
                warn!(error = %err, archetype = archetype.name(), "falha ao desenhar o gráfico");
                error_text(format!("Erro ao gerar o gráfico: {err}"))
            }
        },
        Ok(None) => Json(AskResponse { response: payload }).into_response(),
        Err(err) => {
            warn!(error = %err, "payload rejeitado pelo classificador");
            error_text(format!("Erro ao gerar o gráfico: {err}"))
        }
    }
}

fn png_attachment(png: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=grafico.png",
            ),
        ],
        png,
    )
        .into_response()
}

// Reply-shaped, so the frontend renders it like any other answer.
fn error_text(message: String) -> Response {
    Json(AskResponse {
        response: json!({ "output": message }),
    })
    .into_response()
}
