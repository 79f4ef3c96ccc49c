//! Server-wide constants
//!
//! Default network settings, environment variable names and the fixed
//! user-facing messages of the REST surface.

/// Network port configuration
pub mod ports {
    /// Default listening port
    pub const SERVER: u16 = 8080;
}

/// Server host configuration
pub mod hosts {
    /// Default host for local server binding
    pub const LOCAL: &str = "127.0.0.1";
}

/// Environment variables read at startup
pub mod env {
    pub const HOST: &str = "FLOWBUILDER_HOST";
    pub const PORT: &str = "FLOWBUILDER_PORT";
    /// Path of the JSON configuration file
    pub const CONFIG: &str = "FLOWBUILDER_CONFIG";
}

pub mod paths {
    /// Configuration file looked up in the working directory
    pub const CONFIG_FILE: &str = "flowbuilder.json";
}

/// Messages returned in response envelopes
pub mod messages {
    pub const WORKFLOW_NOT_FOUND: &str = "Workflow not found";

    pub const WORKFLOW_CREATED: &str = "Workflow created successfully";
    pub const WORKFLOW_UPDATED: &str = "Workflow updated successfully";
    pub const WORKFLOW_DELETED: &str = "Workflow deleted successfully";
    pub const EXECUTION_STARTED: &str = "Workflow execution started";

    pub const FETCH_WORKFLOWS_FAILED: &str = "Failed to fetch workflows";
    pub const FETCH_WORKFLOW_FAILED: &str = "Failed to fetch workflow";
    pub const CREATE_FAILED: &str = "Failed to create workflow";
    pub const UPDATE_FAILED: &str = "Failed to update workflow";
    pub const DELETE_FAILED: &str = "Failed to delete workflow";
    pub const EXECUTE_FAILED: &str = "Failed to execute workflow";

    pub const PING: &str = "Hello from FlowBuilder server!";
    pub const DEMO: &str = "Hello from the demo endpoint";
}
