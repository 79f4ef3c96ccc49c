//! Workflow application service
//!
//! Implements list/get/create/update/delete/execute over an injected
//! [`WorkflowStore`]. Request payloads are already typed: node
//! configurations were validated against the integration catalog while
//! the request was decoded.

use std::sync::Arc;

use chrono::Utc;
use flow_graph::{Workflow, WorkflowConnection, WorkflowNode};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkflowServiceError};
use crate::ids::IdGenerator;
use crate::store::WorkflowStore;

/// Fields accepted when creating a workflow
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowRequest {
    /// Required, must be non-empty
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Option<Vec<WorkflowNode>>,
    #[serde(default)]
    pub connections: Option<Vec<WorkflowConnection>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CreateWorkflowRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Partial update: only present fields replace the stored values
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkflowRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Option<Vec<WorkflowNode>>,
    #[serde(default)]
    pub connections: Option<Vec<WorkflowConnection>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateWorkflowRequest {
    /// Merge the present fields over `workflow`
    fn apply(self, workflow: &mut Workflow) {
        if let Some(name) = self.name {
            workflow.name = name;
        }
        if let Some(description) = self.description {
            workflow.description = Some(description);
        }
        if let Some(nodes) = self.nodes {
            workflow.nodes = nodes;
        }
        if let Some(connections) = self.connections {
            workflow.connections = connections;
        }
        if let Some(is_active) = self.is_active {
            workflow.is_active = is_active;
        }
    }
}

/// All workflows plus their count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowList {
    pub workflows: Vec<Workflow>,
    pub total: usize,
}

/// Handle returned by the execution stub
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionTicket {
    pub execution_id: String,
}

/// Workflow CRUD and the execution stub
pub struct WorkflowService {
    store: Arc<dyn WorkflowStore>,
    workflow_ids: IdGenerator,
    execution_ids: IdGenerator,
}

impl WorkflowService {
    pub fn new(store: Arc<dyn WorkflowStore>) -> Self {
        Self {
            store,
            workflow_ids: IdGenerator::new("workflow"),
            execution_ids: IdGenerator::new("exec"),
        }
    }

    pub async fn list_workflows(&self) -> Result<WorkflowList> {
        let workflows = self.store.list().await?;
        log::debug!("Listing {} workflows", workflows.len());
        Ok(WorkflowList {
            total: workflows.len(),
            workflows,
        })
    }

    pub async fn get_workflow(&self, id: &str) -> Result<Workflow> {
        match self.store.get(id).await? {
            Some(workflow) => Ok(workflow),
            None => {
                log::debug!("Workflow '{}' not found", id);
                Err(WorkflowServiceError::not_found(id))
            }
        }
    }

    /// Create a workflow. Nodes and connections default to empty and the
    /// workflow starts inactive.
    pub async fn create_workflow(&self, request: CreateWorkflowRequest) -> Result<Workflow> {
        let name = match request.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(WorkflowServiceError::validation("Workflow name is required")),
        };

        let workflow = Workflow {
            description: request.description,
            nodes: request.nodes.unwrap_or_default(),
            connections: request.connections.unwrap_or_default(),
            is_active: request.is_active.unwrap_or(false),
            ..Workflow::new(self.workflow_ids.next_id(), name, Utc::now())
        };

        let workflow = self.store.create(workflow).await?;
        log::info!("Created workflow '{}' ({})", workflow.id, workflow.name);
        Ok(workflow)
    }

    /// Merge present fields over the stored record and refresh `updatedAt`.
    ///
    /// Read and write are separate store calls; a concurrent update in
    /// between is overwritten.
    pub async fn update_workflow(&self, id: &str, request: UpdateWorkflowRequest) -> Result<Workflow> {
        let mut workflow = self.get_workflow(id).await?;
        request.apply(&mut workflow);
        workflow.updated_at = Utc::now();

        let updated = self
            .store
            .update(workflow)
            .await?
            .ok_or_else(|| WorkflowServiceError::not_found(id))?;
        log::info!("Updated workflow '{}'", id);
        Ok(updated)
    }

    pub async fn delete_workflow(&self, id: &str) -> Result<Workflow> {
        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| WorkflowServiceError::not_found(id))?;
        log::info!("Deleted workflow '{}'", id);
        Ok(removed)
    }

    /// Execution stub: checks that the workflow exists and returns a fresh
    /// execution id. Nodes, connections and configs are not interpreted.
    pub async fn execute_workflow(&self, id: &str) -> Result<ExecutionTicket> {
        let workflow = self.get_workflow(id).await?;
        let execution_id = self.execution_ids.next_id();
        log::info!("Execution '{}' started for workflow '{}'", execution_id, workflow.id);
        Ok(ExecutionTicket { execution_id })
    }
}
