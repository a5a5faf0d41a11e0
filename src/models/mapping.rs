//! Model-name mapping models.
//!
//! The node advertises public model names and forwards each to an upstream
//! provider model; the operator edits this mapping from the console.

use serde::{Deserialize, Serialize};

/// One advertised-name → upstream-model mapping row.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct ModelMapping {
    /// Public model name clients request.
    pub name: String,
    /// Upstream model identifier requests are forwarded to.
    pub mapped_to: String,
}

/// Response from the model-mappings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMappingsResponse {
    pub mappings: Vec<ModelMapping>,
}

/// Request body replacing the full mapping set.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateMappingsRequest {
    pub mappings: Vec<ModelMapping>,
}
