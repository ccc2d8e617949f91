//! Agent configuration types.

use serde::{Deserialize, Serialize};

/// Content type of agent wire messages on HTTP transports.
pub const AGENT_WIRE_CONTENT_TYPE: &str = "application/ssi-agent-wire";

/// Top-level agent configuration (`~/.ariadne/config.toml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Display name of the agent owner.
    pub agent_name: String,
    /// Image shown for the agent owner.
    pub owner_image_url: Option<String>,
    /// The agent's DID, issued by the wallet provider.
    pub agent_did: Option<String>,
    /// Public URL where this agent receives messages.
    pub endpoint_uri: Option<String>,
    /// Address the HTTP transport binds to.
    pub listen_addr: String,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Events retained in the event bus history.
    pub event_history_size: usize,
    /// Largest accepted inbound message body.
    pub max_body_bytes: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_name: "ariadne-agent".to_string(),
            owner_image_url: None,
            agent_did: None,
            endpoint_uri: None,
            listen_addr: "127.0.0.1:4300".to_string(),
            log_level: "info".to_string(),
            event_history_size: 1000,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"agent_name": "alice", "event_history_size": 10}"#).unwrap();
        assert_eq!(config.agent_name, "alice");
        assert_eq!(config.event_history_size, 10);
        assert_eq!(config.listen_addr, "127.0.0.1:4300");
        assert_eq!(config.log_level, "info");
    }
}
