//! `ariadne start` — serve the agent endpoint until Ctrl+C.

use super::{boot_kernel, runtime};
use crate::ui;
use ariadne_types::config::AgentConfig;
use std::sync::Arc;
use tracing::warn;

pub fn cmd_start(config: AgentConfig) {
    let kernel = Arc::new(boot_kernel(config));
    let rt = runtime();

    rt.block_on(async move {
        kernel.start().await;
        ui::success(&format!("Agent '{}' ready", kernel.config().agent_name));
        ui::kv("listen", &kernel.config().listen_addr);
        if let Some(endpoint) = &kernel.config().endpoint_uri {
            ui::kv("endpoint", endpoint);
        }
        ui::kv(
            "message types",
            &kernel.dispatcher().handlers().message_types().join(", "),
        );

        let result = ariadne_api::serve(Arc::clone(&kernel), shutdown_signal()).await;
        kernel.shutdown().await;

        if let Err(e) = result {
            ui::error_with_fix(
                &format!("Agent endpoint failed: {e}"),
                "Check listen_addr in ~/.ariadne/config.toml",
            );
            std::process::exit(1);
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl+C, serving until killed");
        std::future::pending::<()>().await;
    }
}
