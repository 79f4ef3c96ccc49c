//! Workflow storage.
//!
//! Handlers never touch storage directly; they go through the
//! [`WorkflowStore`] trait so a durable backend can replace the
//! process-local one without changing service or HTTP code.
//!
//! The in-memory store keeps records in insertion order. Each call is
//! atomic on its own, but nothing spans calls: two clients updating the
//! same workflow race and the last write wins.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use flow_graph::Workflow;
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};

/// Storage backend for workflow records
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> StoreResult<Vec<Workflow>>;

    /// Fetch one record
    async fn get(&self, id: &str) -> StoreResult<Option<Workflow>>;

    /// Append a new record; fails if the id is taken
    async fn create(&self, workflow: Workflow) -> StoreResult<Workflow>;

    /// Replace the record with the same id.
    ///
    /// Returns `None` if no such record exists.
    async fn update(&self, workflow: Workflow) -> StoreResult<Option<Workflow>>;

    /// Remove a record, returning it if it existed
    async fn delete(&self, id: &str) -> StoreResult<Option<Workflow>>;

    /// Number of stored records
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.list().await?.len())
    }
}

/// Process-lifetime store backed by an ordered list
#[derive(Debug, Default)]
pub struct InMemoryWorkflowStore {
    workflows: RwLock<Vec<Workflow>>,
}

impl InMemoryWorkflowStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the two sample workflows
    pub fn with_samples() -> Self {
        Self::from_workflows(sample_workflows())
    }

    pub fn from_workflows(workflows: Vec<Workflow>) -> Self {
        Self {
            workflows: RwLock::new(workflows),
        }
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn list(&self) -> StoreResult<Vec<Workflow>> {
        Ok(self.workflows.read().clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Workflow>> {
        Ok(self.workflows.read().iter().find(|w| w.id == id).cloned())
    }

    async fn create(&self, workflow: Workflow) -> StoreResult<Workflow> {
        let mut workflows = self.workflows.write();
        if workflows.iter().any(|w| w.id == workflow.id) {
            return Err(StoreError::DuplicateId(workflow.id));
        }
        workflows.push(workflow.clone());
        Ok(workflow)
    }

    async fn update(&self, workflow: Workflow) -> StoreResult<Option<Workflow>> {
        let mut workflows = self.workflows.write();
        let Some(slot) = workflows.iter_mut().find(|w| w.id == workflow.id) else {
            return Ok(None);
        };
        *slot = workflow.clone();
        Ok(Some(workflow))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Workflow>> {
        let mut workflows = self.workflows.write();
        let index = workflows.iter().position(|w| w.id == id);
        Ok(index.map(|index| workflows.remove(index)))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.workflows.read().len())
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The records a fresh process starts with
pub fn sample_workflows() -> Vec<Workflow> {
    let email_to_slack = Workflow {
        description: Some("Forward important emails to Slack channel".to_string()),
        is_active: true,
        ..Workflow::new("workflow-1", "Email to Slack Notification", seed_date(2024, 12, 1))
    };
    let lead_pipeline = Workflow {
        description: Some("Process new leads from website form".to_string()),
        ..Workflow::new("workflow-2", "Lead Processing Pipeline", seed_date(2024, 11, 28))
    };
    vec![email_to_slack, lead_pipeline]
}
