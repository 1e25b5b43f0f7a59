use chrono::Utc;
use clap::Subcommand;
use nidus_core::{Config, Event, JobBoard};

use super::open_kv;

#[derive(Subcommand)]
pub enum JobsAction {
    /// Print the current postings as JSON
    List,
    /// Write the default postings if none exist yet
    Seed,
    /// Record an application for a posting
    Apply {
        /// Posting id (see `jobs list`)
        #[arg(long)]
        job: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Print recorded applications as JSON
    Applications,
}

pub fn run(action: JobsAction) -> Result<(), Box<dyn std::error::Error>> {
    let kv = open_kv()?;
    let config = Config::load_or_default();
    let board = JobBoard::new(kv, config.jobs.jobs_key, config.jobs.applications_key);

    match action {
        JobsAction::List => {
            println!("{}", serde_json::to_string_pretty(&board.list_jobs())?);
        }
        JobsAction::Seed => {
            if board.seed() {
                println!("postings seeded");
            } else {
                println!("postings already present");
            }
        }
        JobsAction::Apply { job, email, phone } => {
            let application = board.apply(&job, &email, phone)?;
            let event = Event::ApplicationRecorded {
                job_id: application.job_id.clone(),
                email: application.email.clone(),
                id: application.id,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        JobsAction::Applications => {
            println!(
                "{}",
                serde_json::to_string_pretty(&board.list_applications())?
            );
        }
    }

    Ok(())
}
