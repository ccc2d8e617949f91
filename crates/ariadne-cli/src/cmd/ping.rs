//! `ariadne ping` — round-trip a trust ping through an in-process kernel.

use super::{boot_kernel, runtime};
use crate::ui;
use ariadne_types::config::AgentConfig;
use ariadne_types::message::AgentMessage;
use ariadne_types::messages::TrustPingMessage;
use ariadne_wire::encode_message;

pub fn cmd_ping(config: AgentConfig, respond: bool, comment: Option<String>) {
    let kernel = boot_kernel(config);

    let mut ping = TrustPingMessage::new(respond);
    ping.comment = comment;
    let raw = encode_message(&ping).unwrap_or_else(|e| {
        ui::error(&format!("Cannot encode ping: {e}"));
        std::process::exit(1);
    });

    let rt = runtime();
    match rt.block_on(kernel.process(&raw)) {
        Ok(Some(reply)) => {
            ui::success(&format!("Ping {} answered", ping.id()));
            match serde_json::from_slice::<serde_json::Value>(&reply) {
                Ok(value) => println!(
                    "{}",
                    serde_json::to_string_pretty(&value).unwrap_or_default()
                ),
                Err(_) => println!("{}", String::from_utf8_lossy(&reply)),
            }
        }
        Ok(None) => {
            ui::success("no reply");
            if !respond {
                ui::hint("Pass --respond to request a trust_ping_response");
            }
        }
        Err(e) => {
            ui::error(&format!("Dispatch failed: {e}"));
            std::process::exit(1);
        }
    }
}
