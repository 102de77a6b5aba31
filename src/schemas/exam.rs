use serde::{Deserialize, Serialize};

use crate::services::judge::ExecutionOutput;

#[derive(Debug, Deserialize)]
pub(crate) struct RunCodeRequest {
    pub(crate) language: String,
    #[serde(alias = "script")]
    pub(crate) code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunCodeResponse {
    pub(crate) output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cpu_time: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) memory: Option<serde_json::Value>,
}

impl RunCodeResponse {
    pub(crate) fn from_execution(execution: ExecutionOutput) -> Self {
        Self {
            output: execution.output,
            error: execution.error,
            cpu_time: execution.cpu_time,
            memory: execution.memory,
        }
    }
}
