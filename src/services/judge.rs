use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::Settings;
use crate::core::metrics;
use crate::db::types::CodeLanguage;

#[derive(Debug, Error)]
pub(crate) enum JudgeError {
    #[error("code execution service is not configured")]
    NotConfigured,
    #[error("code execution request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("code execution service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("code execution response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExecutionOutput {
    pub(crate) output: String,
    pub(crate) error: Option<String>,
    pub(crate) cpu_time: Option<serde_json::Value>,
    pub(crate) memory: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verification {
    pub(crate) passed: bool,
    pub(crate) execution: ExecutionOutput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    script: &'a str,
    language: &'a str,
    version_index: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponse {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    cpu_time: Option<serde_json::Value>,
    #[serde(default)]
    memory: Option<serde_json::Value>,
}

/// Pass-through client for the external judge. Credentials stay server-side
/// and failures are reported as-is; there are no retries.
#[derive(Debug, Clone)]
pub(crate) struct JudgeClient {
    client: Client,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl JudgeClient {
    pub(crate) fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let judge = settings.judge();
        Self::new(
            &judge.api_url,
            &judge.client_id,
            &judge.client_secret,
            Duration::from_secs(judge.timeout_seconds),
        )
    }

    pub(crate) fn new(
        api_url: &str,
        client_id: &str,
        client_secret: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .context("Failed to build judge HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    pub(crate) async fn execute(
        &self,
        language: CodeLanguage,
        script: &str,
    ) -> Result<ExecutionOutput, JudgeError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(JudgeError::NotConfigured);
        }

        let started = Instant::now();
        let result = self.send(language, script).await;
        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::record_judge_call(outcome, started.elapsed().as_secs_f64());

        if let Err(err) = &result {
            tracing::warn!(language = language.as_str(), error = %err, "Judge call failed");
        }
        result
    }

    async fn send(
        &self,
        language: CodeLanguage,
        script: &str,
    ) -> Result<ExecutionOutput, JudgeError> {
        let request = ExecuteRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            script,
            language: judge_language(language),
            version_index: "0",
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(JudgeError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Upstream { status: status.as_u16(), body });
        }

        let body: ExecuteResponse = response.json().await.map_err(JudgeError::Decode)?;
        Ok(ExecutionOutput {
            output: body.output.unwrap_or_default(),
            error: body.error.filter(|value| !value.is_empty()),
            cpu_time: body.cpu_time,
            memory: body.memory,
        })
    }

    /// Runs `script` and compares its output with `expected_output`.
    pub(crate) async fn verify(
        &self,
        language: CodeLanguage,
        script: &str,
        expected_output: &str,
    ) -> Result<Verification, JudgeError> {
        let execution = self.execute(language, script).await?;
        let passed = execution.error.is_none() && outputs_match(&execution.output, expected_output);
        Ok(Verification { passed, execution })
    }
}

fn judge_language(language: CodeLanguage) -> &'static str {
    match language {
        CodeLanguage::Javascript => "nodejs",
        other => other.as_str(),
    }
}

pub(crate) fn normalize_output(value: &str) -> String {
    value.replace("\r\n", "\n").trim().to_string()
}

pub(crate) fn outputs_match(actual: &str, expected: &str) -> bool {
    normalize_output(actual) == normalize_output(expected)
}
