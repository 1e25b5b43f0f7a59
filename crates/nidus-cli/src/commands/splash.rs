use clap::Subcommand;
use nidus_core::{Config, KvAdapter, OneTimeGate};

use super::open_kv;

const GATE_KEY: &str = "splash_gate";

#[derive(Subcommand)]
pub enum SplashAction {
    /// Print current gate state as JSON
    Status,
    /// Evaluate the gate and start showing if pending
    Begin,
    /// Skip the sequence (if allowed)
    Skip,
    /// Signal the natural end of the sequence
    Complete,
    /// Poll for a pending minimum-display completion
    Poll,
    /// Clear gate state and the persisted flag
    Reset,
}

fn load_gate(kv: &KvAdapter) -> OneTimeGate {
    if let Some(gate) = kv.read::<OneTimeGate>(GATE_KEY) {
        return gate;
    }
    let config = Config::load_or_default();
    OneTimeGate::new(config.splash, kv)
}

fn save_gate(kv: &KvAdapter, gate: &OneTimeGate) {
    kv.write(GATE_KEY, gate);
}

pub fn run(action: SplashAction) -> Result<(), Box<dyn std::error::Error>> {
    let kv = open_kv()?;
    let mut gate = load_gate(&kv);

    match action {
        SplashAction::Status => {
            println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
        }
        SplashAction::Begin => {
            if let Some(event) = gate.begin() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        SplashAction::Skip => {
            if let Some(event) = gate.skip(&kv) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        SplashAction::Complete => {
            if let Some(event) = gate.finish(&kv) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                // Natural end arrived before the minimum display time;
                // `poll` finishes the job later.
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        SplashAction::Poll => {
            if let Some(event) = gate.poll(&kv) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
            }
        }
        SplashAction::Reset => {
            let config = Config::load_or_default();
            kv.remove(&config.splash.key);
            kv.remove(GATE_KEY);
            println!("splash gate reset");
            return Ok(());
        }
    }

    save_gate(&kv, &gate);
    Ok(())
}
