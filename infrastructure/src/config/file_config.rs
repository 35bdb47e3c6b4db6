//! On-disk configuration schema.
//!
//! All fields are optional in the file; missing sections fall back to
//! defaults. Validation reports issues as strings so the CLI can warn
//! without dying on a half-broken config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use nlmake_application::{ExecutionParams, SafetyConfig};
use nlmake_domain::{ConfidenceThreshold, DomainError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub ollama: OllamaConfig,
    pub routing: RoutingConfig,
    pub safety: FileSafetyConfig,
    pub runner: RunnerConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    /// Per-request timeout in seconds. Kept short so a stalled model
    /// surfaces quickly; raise it in config for slow hardware.
    pub timeout_secs: u64,
    /// Retries after a failed interpretation call.
    pub max_retries: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 10,
            max_retries: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Execution threshold as a whole-number percentage (0-100).
    pub confidence_threshold: u8,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        RoutingConfig {
            confidence_threshold: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSafetyConfig {
    /// Confirm before dispatching to mutating specialists.
    pub confirm_mutating: bool,
}

impl Default for FileSafetyConfig {
    fn default() -> Self {
        FileSafetyConfig {
            confirm_mutating: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub make_program: String,
    pub timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            make_program: "make".to_string(),
            timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Shell command that runs the verification suite for the TDD cycle.
    pub verify_command: String,
    /// Re-attempts allowed when a TDD phase's verification goes wrong.
    pub max_verify_retries: u32,
    /// Whether refactor phases get a dedicated authoring pass.
    pub refactor: bool,
    /// Where the TDD plan artifact lives.
    pub plan_artifact: String,
    /// Per-task timeout for specialists, in seconds.
    pub task_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            verify_command: "make test".to_string(),
            max_verify_retries: 2,
            refactor: true,
            plan_artifact: ".nlmake/tdd-plan.md".to_string(),
            task_timeout_secs: 120,
        }
    }
}

impl FileConfig {
    /// Collect human-readable issues without failing the load.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.routing.confidence_threshold > 100 {
            issues.push(format!(
                "routing.confidence_threshold must be 0-100, got {}",
                self.routing.confidence_threshold
            ));
        }
        if self.ollama.base_url.trim().is_empty() {
            issues.push("ollama.base_url is empty".to_string());
        }
        if self.ollama.model.trim().is_empty() {
            issues.push("ollama.model is empty".to_string());
        }
        if self.ollama.timeout_secs == 0 {
            issues.push("ollama.timeout_secs must be positive".to_string());
        }
        if self.runner.timeout_secs == 0 {
            issues.push("runner.timeout_secs must be positive".to_string());
        }
        if self.agent.verify_command.trim().is_empty() {
            issues.push("agent.verify_command is empty".to_string());
        }
        issues
    }

    /// Resolve the routing and agent tunables into application params.
    pub fn execution_params(&self) -> Result<ExecutionParams, DomainError> {
        Ok(ExecutionParams {
            threshold: ConfidenceThreshold::from_percent(self.routing.confidence_threshold)?,
            interpreter_retries: self.ollama.max_retries,
            retry_backoff: Duration::from_millis(500),
            max_verify_retries: self.agent.max_verify_retries,
            refactor_enabled: self.agent.refactor,
        })
    }

    pub fn safety(&self) -> SafetyConfig {
        SafetyConfig {
            confirm_mutating: self.safety.confirm_mutating,
        }
    }

    /// Render the effective configuration as TOML (for `config show`).
    pub fn render(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("# could not render: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        let params = config.execution_params().unwrap();
        assert_eq!(params.threshold.value(), 0.8);
        assert!(params.refactor_enabled);
        // Interpretation calls fail fast by default.
        assert_eq!(config.ollama.timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [routing]
            confidence_threshold = 65

            [ollama]
            model = "qwen2.5:7b"
            "#,
        )
        .unwrap();
        assert_eq!(config.routing.confidence_threshold, 65);
        assert_eq!(config.ollama.model, "qwen2.5:7b");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.runner.make_program, "make");
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let mut config = FileConfig::default();
        config.ollama.model = String::new();
        config.runner.timeout_secs = 0;
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_threshold_percent_conversion() {
        let mut config = FileConfig::default();
        config.routing.confidence_threshold = 65;
        let params = config.execution_params().unwrap();
        assert_eq!(params.threshold.value(), 0.65);
    }
}
