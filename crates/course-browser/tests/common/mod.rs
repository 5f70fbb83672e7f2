//! Mock gateway and RAG API servers for integration tests

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const FOLDER: &str = "plan-comun/CII-2750";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4 test";

/// Serve `router` on an ephemeral port, returning its base URL
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL where nothing is listening
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn error_body(message: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
}

async fn list_files(Path(folder): Path<String>) -> Response {
    if folder != FOLDER {
        return error_body("Error al listar archivos");
    }
    Json(json!([
        {
            "fileName": "Tarea_1.pdf",
            "key": format!("{}/Tarea_1.pdf", FOLDER),
            "size": 2048,
            "lastModified": "2024-03-01T12:00:00.000Z"
        },
        {
            "fileName": "Guia-2.pdf",
            "key": format!("{}/Guia-2.pdf", FOLDER),
            "size": 512
        },
        {
            "fileName": "Clase 03 - Grafos.pdf",
            "key": format!("{}/Clase 03 - Grafos.pdf", FOLDER)
        }
    ]))
    .into_response()
}

async fn download(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("key") {
        Some(key) if key.ends_with("Tarea_1.pdf") => (
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"Tarea_1.pdf\""),
            ],
            PDF_BYTES,
        )
            .into_response(),
        _ => error_body("Error al descargar archivo"),
    }
}

/// Gateway serving three files under `FOLDER`
pub fn gateway_router() -> Router {
    Router::new()
        .route("/api/files/:folder", get(list_files))
        .route("/api/download", get(download))
}

/// Request bodies received by the mock RAG API
pub type RequestLog = Arc<Mutex<Vec<Value>>>;

async fn query(State(log): State<RequestLog>, Json(body): Json<Value>) -> Response {
    log.lock().push(body.clone());

    let prompt = body["prompt"].as_str().unwrap_or_default();
    let ramo = body["ramo"].clone();

    match (body["mode"].as_str().unwrap_or_default(), prompt) {
        (_, "fail") => (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response(),
        (_, "garbage") => "<html>not json</html>".into_response(),
        ("search", _) => Json(json!({
            "answer": {
                "matching_files": [
                    {"file": "Tarea_1", "relevance": "high", "reason": "Ejercicios de grafos"}
                ],
                "total_matches": 1,
                "search_summary": "Un archivo trata el tema"
            },
            "sources": ["Tarea_1"],
            "ramo": ramo
        }))
        .into_response(),
        ("qa", _) => Json(json!({
            "answer": "{\"answer\": \"Primera línea\nSegunda línea\", \"confidence\": \"medium\", \"sources\": [{\"file\": \"Tarea_1\", \"page\": 2}]}",
            "sources": ["Tarea_1"],
            "ramo": ramo
        }))
        .into_response(),
        ("flashcards", _) => Json(json!({
            "answer": "{\"flashcards\": [{\"id\": 1, \"question\": \"¿Qué es un grafo?\", \"answer\": \"Nodos y aristas\", \"difficulty\": \"easy\"}], \"total_generated\": 1, \"topics_covered\": [\"Grafos\"]}",
            "sources": ["Tarea_1"],
            "ramo": ramo
        }))
        .into_response(),
        _ => (StatusCode::UNPROCESSABLE_ENTITY, "unknown mode").into_response(),
    }
}

/// RAG API answering by mode; prompts "fail" and "garbage" trigger errors
pub fn rag_router(log: RequestLog) -> Router {
    Router::new().route("/api/query", post(query)).with_state(log)
}
