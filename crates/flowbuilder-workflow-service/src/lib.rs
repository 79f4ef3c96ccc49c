//! FlowBuilder workflow service
//!
//! Host-agnostic workflow persistence and application operations. The
//! HTTP server wraps [`WorkflowService`]; other hosts can do the same
//! without depending on axum.

pub mod error;
pub mod ids;
pub mod service;
pub mod store;

pub use error::{Result, StoreError, StoreResult, WorkflowServiceError};
pub use ids::IdGenerator;
pub use service::{
    CreateWorkflowRequest, ExecutionTicket, UpdateWorkflowRequest, WorkflowList, WorkflowService,
};
pub use store::{sample_workflows, InMemoryWorkflowStore, WorkflowStore};
