mod one_time;
mod prompt;

pub use one_time::{GatePhase, OneTimeGate, OneTimeGateConfig};
pub use prompt::{PromptGate, PromptGateConfig, PromptPhase};

pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
