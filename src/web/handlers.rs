use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use log::{info, error};

use crate::model::{GenerationParams, MeditronPipeline, MODEL_TAG};
use crate::prompt::format_prompt;
use crate::web::models::{ChatRequest, ChatResponse};

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint
pub async fn chat(
    pipeline: web::Data<MeditronPipeline>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    info!(
        "Chat request (role: {}, max_length: {}): {}",
        req.role, req.max_length, req.message
    );

    let prompt = format_prompt(&req.message, &req.role);
    let params = GenerationParams {
        max_length: req.max_length,
        temperature: req.temperature,
        top_p: req.top_p,
    };

    // Any failure past this point becomes a generic 500; the error text
    // is passed through as the detail message.
    match pipeline.generate(&prompt, &params).await {
        Ok(response) => HttpResponse::Ok().json(ChatResponse {
            success: true,
            response,
            model: MODEL_TAG.to_string(),
        }),
        Err(e) => {
            error!("Generation error: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "detail": e.to_string()
            }))
        }
    }
}
