use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::internal::{
    exec::scheduler::Discipline,
    kernel::Kernel,
    mem::allocator::{MemoryAllocator, Slot},
    process::process::{AdmissionWarning, Pid, Process},
    trace::trace::Trace,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

// Kernel plus the traces of every run served so far
#[derive(Clone)]
pub struct AppState {
    pub kernel: Arc<Mutex<Kernel>>,
    pub runs: Arc<RwLock<HashMap<String, Trace>>>,
}

impl AppState {
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel: Arc::new(Mutex::new(kernel)),
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/processes", post(create_process).get(list_processes))
        .route("/v1/files", post(create_file))
        .route("/v1/files/:name", get(read_file))
        .route("/v1/memory", post(allocate_memory))
        .route("/v1/memory/:address", get(read_slot))
        .route("/v1/schedule/:discipline", post(run_schedule))
        .route("/v1/trace/:run_id", get(get_trace))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(status: StatusCode, message: String) -> ApiError {
    (status, Json(serde_json::json!({ "error": message })))
}

#[derive(Serialize, Deserialize)]
pub struct CreateProcessResponse {
    pub pid: Pid,
    pub warnings: Vec<AdmissionWarning>,
}

async fn create_process(
    State(state): State<AppState>,
    Json(process): Json<Process>,
) -> (StatusCode, Json<CreateProcessResponse>) {
    let warnings = state.kernel.lock().await.create_process(
        process.pid,
        process.burst_time,
        process.priority,
        process.arrival_time,
    );

    (
        StatusCode::CREATED,
        Json(CreateProcessResponse {
            pid: process.pid,
            warnings,
        }),
    )
}

async fn list_processes(State(state): State<AppState>) -> Json<Vec<Process>> {
    let kernel = state.kernel.lock().await;
    Json(kernel.scheduler().processes().to_vec())
}

#[derive(Serialize, Deserialize)]
pub struct FileBody {
    pub name: String,
    pub content: String,
}

async fn create_file(
    State(state): State<AppState>,
    Json(file): Json<FileBody>,
) -> (StatusCode, Json<serde_json::Value>) {
    state
        .kernel
        .lock()
        .await
        .create_file(&file.name, &file.content);
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "name": file.name })),
    )
}

async fn read_file(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<FileBody>, ApiError> {
    let kernel = state.kernel.lock().await;
    let content = kernel
        .read_file(&name)
        .map_err(|e| api_error(StatusCode::NOT_FOUND, e.to_string()))?;

    Ok(Json(FileBody { name, content }))
}

#[derive(Serialize, Deserialize)]
pub struct AllocateRequest {
    pub pid: Pid,
    pub address: i64,
}

#[derive(Serialize, Deserialize)]
pub struct SlotResponse {
    pub address: i64,
    pub slot: Slot,
}

async fn allocate_memory(
    State(state): State<AppState>,
    Json(request): Json<AllocateRequest>,
) -> Result<Json<SlotResponse>, ApiError> {
    let mut kernel = state.kernel.lock().await;
    kernel
        .allocate_memory(request.pid, request.address)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(SlotResponse {
        address: request.address,
        slot: Slot::Owned(request.pid),
    }))
}

async fn read_slot(
    Path(address): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<SlotResponse>, ApiError> {
    let kernel = state.kernel.lock().await;
    let slot = kernel.memory().slot(address).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            format!(
                "Address {} outside table of size {}",
                address,
                kernel.memory().size()
            ),
        )
    })?;

    Ok(Json(SlotResponse { address, slot }))
}

async fn run_schedule(
    Path(discipline): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Trace>, ApiError> {
    let discipline = discipline
        .parse::<Discipline>()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    // Simulated execution sleeps, keep it off the async workers
    let kernel = state.kernel.clone();
    let trace = tokio::task::spawn_blocking(move || kernel.blocking_lock().run(discipline))
        .await
        .map_err(|e| {
            tracing::error!("Scheduling run failed: {}", e);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Scheduling run failed: {}", e),
            )
        })?;

    state
        .runs
        .write()
        .await
        .insert(trace.run_id.clone(), trace.clone());

    Ok(Json(trace))
}

async fn get_trace(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Trace>, ApiError> {
    let runs = state.runs.read().await;
    let trace = runs
        .get(&run_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Run {} not found", run_id)))?
        .clone();

    Ok(Json(trace))
}
