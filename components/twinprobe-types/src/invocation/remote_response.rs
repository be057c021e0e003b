use serde::{Deserialize, Serialize};

/// Structured result of a synchronous smart service invocation, as produced by the
/// middleware.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResponse {
    /// Whether the remote computation succeeded.
    pub success: bool,
    /// State the remote execution finished in (e.g. `COMPLETED`).
    pub execution_state: String,
    /// Output arguments of the remote computation.
    #[serde(default)]
    pub output_arguments: serde_json::Value,
}

impl RemoteResponse {
    /// Indicates whether the remote execution reached its terminal `COMPLETED` state.
    pub fn is_completed(&self) -> bool {
        self.execution_state.eq_ignore_ascii_case("completed")
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteResponse;
    use insta::assert_json_snapshot;

    #[test]
    fn serialization() {
        assert_json_snapshot!(RemoteResponse {
            success: true,
            execution_state: "COMPLETED".to_string(),
            output_arguments: serde_json::json!({ "anomalies": 2 }),
        }, @r###"
        {
          "success": true,
          "executionState": "COMPLETED",
          "outputArguments": {
            "anomalies": 2
          }
        }
        "###);
    }

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::from_str::<RemoteResponse>(
                r#"{ "success": false, "executionState": "FAILED" }"#
            )?,
            RemoteResponse {
                success: false,
                execution_state: "FAILED".to_string(),
                output_arguments: serde_json::Value::Null,
            }
        );

        Ok(())
    }

    #[test]
    fn terminal_state_check_is_case_insensitive() {
        let response = |execution_state: &str| RemoteResponse {
            success: true,
            execution_state: execution_state.to_string(),
            output_arguments: serde_json::Value::Null,
        };

        assert!(response("COMPLETED").is_completed());
        assert!(response("Completed").is_completed());
        assert!(!response("RUNNING").is_completed());
        assert!(!response("").is_completed());
    }
}
