//! Route handlers for the workflow REST surface

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use flow_graph::Workflow;
use flowbuilder_workflow_service::{
    CreateWorkflowRequest, ExecutionTicket, UpdateWorkflowRequest, WorkflowList,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::constants::messages;
use crate::extract::JsonBody;
use crate::response::{ApiError, ApiResponse};
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// `data` payload for single-workflow responses
#[derive(Debug, Serialize)]
pub struct WorkflowBody {
    pub workflow: Workflow,
}

pub async fn list_workflows(State(state): State<AppState>) -> ApiResult<ApiResponse<WorkflowList>> {
    let list = state
        .service
        .list_workflows()
        .await
        .map_err(|e| ApiError::from_service(e, messages::FETCH_WORKFLOWS_FAILED))?;
    Ok(ApiResponse::ok(list))
}

pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<WorkflowBody>> {
    let workflow = state
        .service
        .get_workflow(&id)
        .await
        .map_err(|e| ApiError::from_service(e, messages::FETCH_WORKFLOW_FAILED))?;
    Ok(ApiResponse::ok(WorkflowBody { workflow }))
}

pub async fn create_workflow(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateWorkflowRequest>,
) -> ApiResult<(StatusCode, ApiResponse<WorkflowBody>)> {
    let workflow = state
        .service
        .create_workflow(request)
        .await
        .map_err(|e| ApiError::from_service(e, messages::CREATE_FAILED))?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(WorkflowBody { workflow }).with_message(messages::WORKFLOW_CREATED),
    ))
}

pub async fn update_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateWorkflowRequest>,
) -> ApiResult<ApiResponse<WorkflowBody>> {
    let workflow = state
        .service
        .update_workflow(&id, request)
        .await
        .map_err(|e| ApiError::from_service(e, messages::UPDATE_FAILED))?;
    Ok(ApiResponse::ok(WorkflowBody { workflow }).with_message(messages::WORKFLOW_UPDATED))
}

pub async fn delete_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state
        .service
        .delete_workflow(&id)
        .await
        .map_err(|e| ApiError::from_service(e, messages::DELETE_FAILED))?;
    Ok(ApiResponse::notice(messages::WORKFLOW_DELETED))
}

pub async fn execute_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<ExecutionTicket>> {
    let ticket = state
        .service
        .execute_workflow(&id)
        .await
        .map_err(|e| ApiError::from_service(e, messages::EXECUTE_FAILED))?;
    Ok(ApiResponse::ok(ticket).with_message(messages::EXECUTION_STARTED))
}

pub async fn ping() -> Json<Value> {
    Json(json!({ "message": messages::PING }))
}

pub async fn demo() -> Json<Value> {
    Json(json!({ "message": messages::DEMO }))
}
