//! `ariadne inspect` — decode a wire message and show its envelope.

use crate::ui;
use ariadne_types::message::AgentMessage;
use ariadne_wire::{get_parent_thread_id, get_thread_id, TypeRegistry};
use std::path::Path;

pub fn cmd_inspect(file: &Path) {
    let raw = std::fs::read(file).unwrap_or_else(|e| {
        ui::error(&format!("Cannot read {}: {e}", file.display()));
        std::process::exit(1);
    });

    let registry = TypeRegistry::with_builtin_types();
    let message = registry.decode(&raw).unwrap_or_else(|e| {
        ui::error_with_fix(
            &format!("Cannot decode message: {e}"),
            &format!("Known message types: {}", registry.message_types().join(", ")),
        );
        std::process::exit(1);
    });

    for (label, value) in describe(&*message) {
        ui::kv(label, &value);
    }
}

/// Envelope summary lines for a decoded message.
pub fn describe(message: &dyn AgentMessage) -> Vec<(&'static str, String)> {
    vec![
        ("id", message.id().to_string()),
        ("type", message.message_type().to_string()),
        ("thread id", get_thread_id(message).to_string()),
        (
            "parent thread",
            get_parent_thread_id(message).unwrap_or("-").to_string(),
        ),
        ("decorators", message.decorators().len().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_types::messages::TrustPingMessage;
    use ariadne_wire::thread_from_parent;

    #[test]
    fn test_describe_unthreaded() {
        let ping = TrustPingMessage::new(true);
        let lines = describe(&ping);
        assert_eq!(lines[0], ("id", ping.id().to_string()));
        assert_eq!(lines[1], ("type", "trust_ping".to_string()));
        assert_eq!(lines[2], ("thread id", ping.id().to_string()));
        assert_eq!(lines[3], ("parent thread", "-".to_string()));
        assert_eq!(lines[4], ("decorators", "0".to_string()));
    }

    #[test]
    fn test_describe_decoded_file() {
        let mut ping = TrustPingMessage::new(false);
        thread_from_parent(&mut ping, "connection-1").unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), ariadne_wire::encode_message(&ping).unwrap()).unwrap();

        let raw = std::fs::read(file.path()).unwrap();
        let message = TypeRegistry::with_builtin_types().decode(&raw).unwrap();
        let lines = describe(&*message);
        assert_eq!(lines[3], ("parent thread", "connection-1".to_string()));
        assert_eq!(lines[4], ("decorators", "1".to_string()));
    }
}
