use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;

use physio_cli::config::{self, PhysioConfig};
use physio_cli::script::{self, ScriptRunner};
use physio_storage::entities::EntityStore;
use physio_storage::json_dir::JsonDirStore;

#[derive(Parser)]
#[command(name = "physio")]
#[command(about = "Physiotherapy screening: body-map pain editor and care-pathway triage")]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted screening session and submit it to the record store
    Screen {
        /// Script file (JSON)
        script: PathBuf,
    },
    /// Run a scripted session and print the classification without saving
    Classify {
        /// Script file (JSON)
        script: PathBuf,
    },
    /// List stored patients
    Patients,
    /// Show or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective config
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = config::config_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Screen { script } => {
            let config = config::load_config(&config_path)?;
            let script = script::load_script(&script)?;
            let mut runner = ScriptRunner::new(&config);
            runner.run(&script)?;

            let store = JsonDirStore::new(&config.data_dir);
            let receipt = runner.submit(&store).await?;
            println!("Patient: {} ({})", receipt.patient.display_name(), receipt.patient.id);
            println!("Assessment: {}", receipt.assessment.id);
            println!("{}", serde_json::to_string_pretty(&receipt.result)?);
        }
        Commands::Classify { script } => {
            let config = config::load_config(&config_path)?;
            let script = script::load_script(&script)?;
            let mut runner = ScriptRunner::new(&config);
            runner.run(&script)?;
            println!("{}", serde_json::to_string_pretty(&runner.classify())?);
        }
        Commands::Patients => {
            let config = config::load_config(&config_path)?;
            let store = JsonDirStore::new(&config.data_dir);
            let patients = store.list_patients().await?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    let pathway = patient
                        .care_pathway
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "ID: {}, Name: {}, Pathway: {}, Created: {}",
                        patient.id,
                        patient.display_name(),
                        pathway,
                        patient.created_at
                    );
                }
            }
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => {
                let config = config::load_config(&config_path)?;
                println!("# {}", config_path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigCommand::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                config::save_config(&PhysioConfig::default(), &config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}
