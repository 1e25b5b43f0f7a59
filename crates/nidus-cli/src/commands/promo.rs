use clap::Subcommand;
use nidus_core::{Config, KvAdapter, PromptGate, PromptGateConfig};

use super::{open_kv, session_id, session_key};

#[derive(Subcommand)]
pub enum PromoAction {
    /// Print current gate state as JSON
    Status,
    /// Schedule the prompt for this session
    Schedule,
    /// Poll for the delay elapsing
    Poll,
    /// Dismiss the prompt for the rest of the session
    Dismiss,
    /// Clear this session's flags and parked gate state
    ResetSession,
}

fn gate_key() -> String {
    session_key("promo_gate")
}

fn session_config() -> PromptGateConfig {
    let config = Config::load_or_default();
    PromptGateConfig {
        session_key: session_key(&config.promotion.session_key),
        delay_ms: config.promotion.delay_ms,
    }
}

fn load_gate(kv: &KvAdapter) -> PromptGate {
    if let Some(gate) = kv.read::<PromptGate>(&gate_key()) {
        return gate;
    }
    PromptGate::new(session_config(), kv)
}

pub fn run(action: PromoAction) -> Result<(), Box<dyn std::error::Error>> {
    let kv = open_kv()?;
    let mut gate = load_gate(&kv);

    match action {
        PromoAction::Status => {
            println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
        }
        PromoAction::Schedule => {
            if let Some(event) = gate.schedule(&kv) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        PromoAction::Poll => {
            if let Some(event) = gate.poll() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        PromoAction::Dismiss => {
            if let Some(event) = gate.dismiss() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        PromoAction::ResetSession => {
            let config = session_config();
            kv.remove(&config.session_key);
            kv.remove(&gate_key());
            println!("session '{}' cleared", session_id());
            return Ok(());
        }
    }

    kv.write(&gate_key(), &gate);
    Ok(())
}
