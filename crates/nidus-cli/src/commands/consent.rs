use clap::Subcommand;
use nidus_core::Config;

use super::open_kv;

#[derive(Subcommand)]
pub enum ConsentAction {
    /// Print the acknowledgment state as JSON
    Status,
    /// Acknowledge the cookie notice
    Accept,
    /// Clear the acknowledgment flag
    Reset,
}

pub fn run(action: ConsentAction) -> Result<(), Box<dyn std::error::Error>> {
    let kv = open_kv()?;
    let key = Config::load_or_default().consent.key;

    match action {
        ConsentAction::Status => {
            let state = serde_json::json!({
                "key": key,
                "acknowledged": kv.contains(&key),
            });
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        ConsentAction::Accept => {
            kv.mark(&key);
            println!("consent acknowledged");
        }
        ConsentAction::Reset => {
            kv.remove(&key);
            println!("consent cleared");
        }
    }

    Ok(())
}
