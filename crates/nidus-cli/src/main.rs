use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "nidus-cli", version, about = "Nidus engagement CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One-time splash gate
    Splash {
        #[command(subcommand)]
        action: commands::splash::SplashAction,
    },
    /// Session-scoped promotional prompt gate
    Promo {
        #[command(subcommand)]
        action: commands::promo::PromoAction,
    },
    /// Lead capture collections
    Capture {
        #[command(subcommand)]
        action: commands::capture::CaptureAction,
    },
    /// Cookie-consent acknowledgment flag
    Consent {
        #[command(subcommand)]
        action: commands::consent::ConsentAction,
    },
    /// Mock job board
    Jobs {
        #[command(subcommand)]
        action: commands::jobs::JobsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Splash { action } => commands::splash::run(action),
        Commands::Promo { action } => commands::promo::run(action),
        Commands::Capture { action } => commands::capture::run(action),
        Commands::Consent { action } => commands::consent::run(action),
        Commands::Jobs { action } => commands::jobs::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "nidus-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
