//! Command implementations.

pub mod inspect;
pub mod ping;
pub mod start;

use crate::ui;
use ariadne_kernel::AgentKernel;
use ariadne_types::config::AgentConfig;

pub(crate) fn boot_kernel(config: AgentConfig) -> AgentKernel {
    match AgentKernel::boot(config) {
        Ok(kernel) => kernel,
        Err(e) => {
            ui::error_with_fix(
                &format!("Failed to boot kernel: {e}"),
                "Each message type may be handled by exactly one handler",
            );
            std::process::exit(1);
        }
    }
}

pub(crate) fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        ui::error(&format!("Failed to create Tokio runtime: {e}"));
        std::process::exit(1);
    })
}
