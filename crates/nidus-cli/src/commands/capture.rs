use chrono::Utc;
use clap::Subcommand;
use nidus_core::{Config, Event, LeadBook, NewLead, RelayClient};

use super::open_kv;

#[derive(Subcommand)]
pub enum CaptureAction {
    /// Validate, dedup, and record a lead
    Submit {
        /// Collection name ("newsletter", "promotions") or a raw storage key
        #[arg(long)]
        collection: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        /// Forward the record to the configured intake endpoint
        #[arg(long)]
        relay: bool,
    },
    /// Print a collection as JSON
    List {
        #[arg(long)]
        collection: String,
    },
    /// Print the number of records in a collection
    Count {
        #[arg(long)]
        collection: String,
    },
}

/// Map the well-known collection names onto their configured storage keys;
/// anything else is taken as a raw key.
fn collection_key(config: &Config, collection: &str) -> String {
    match collection {
        "newsletter" => config.capture.newsletter_key.clone(),
        "promotions" => config.capture.promotions_key.clone(),
        other => other.to_string(),
    }
}

pub fn run(action: CaptureAction) -> Result<(), Box<dyn std::error::Error>> {
    let kv = open_kv()?;
    let config = Config::load_or_default();
    let book = LeadBook::new(kv);

    match action {
        CaptureAction::Submit {
            collection,
            email,
            phone,
            relay,
        } => {
            let key = collection_key(&config, &collection);
            let record = book.submit(&key, NewLead { email, phone })?;
            println!(
                "{}",
                serde_json::to_string_pretty(&LeadBook::captured_event(&collection, &record))?
            );

            if relay {
                let client = RelayClient::new(&config.relay)?;
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                // The local record stands whatever the relay outcome.
                let event = match runtime.block_on(client.send(&collection, &record)) {
                    Ok(receipt) => Event::RelayDelivered {
                        delivery_id: receipt.delivery_id,
                        status: receipt.status,
                        at: Utc::now(),
                    },
                    Err(e) => Event::RelayFailed {
                        reason: e.to_string(),
                        at: Utc::now(),
                    },
                };
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        CaptureAction::List { collection } => {
            let key = collection_key(&config, &collection);
            println!("{}", serde_json::to_string_pretty(&book.list(&key))?);
        }
        CaptureAction::Count { collection } => {
            let key = collection_key(&config, &collection);
            println!("{}", book.count(&key));
        }
    }

    Ok(())
}
