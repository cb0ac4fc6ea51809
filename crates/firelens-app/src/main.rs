//! Firelens - console for Firestore collections
//!
//! Starts logging, loads settings and saved profiles, and reports the session
//! the UI would open with. Given a profile name, connects with it and loads
//! the collections it remembers.

use clap::Parser;
use firelens_app::{AppState, ConnectionStatus, DEFAULT_DRIVER, logging};
use firelens_table::TableState;

#[derive(Parser, Debug)]
#[command(name = "firelens", version, about = "Browse Firestore collections")]
struct Cli {
    /// Saved profile to connect with
    profile: Option<String>,

    /// Store driver to connect through
    #[arg(long, default_value = DEFAULT_DRIVER)]
    driver: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _logging = match logging::init_default() {
        Ok(guard) => guard,
        Err(e) => {
            // Logging isn't up yet
            eprintln!("FATAL: Failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        build_mode = if cfg!(debug_assertions) { "debug" } else { "release" },
        "Starting Firelens"
    );

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Firelens exited with an error");
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = AppState::load().await?;
    let session = app.initial_session();
    tracing::info!(profiles = session.profiles.len(), "session ready");

    let Some(name) = cli.profile else {
        for profile in &session.profiles {
            println!(
                "{}\t{}\t{}",
                profile.name,
                profile.config.project_id,
                profile.collections.join(",")
            );
        }
        return Ok(());
    };

    let (mut session, service) = app.activate_profile(session, &name, &cli.driver).await;
    let service = match (service, &session.status) {
        (Some(service), _) => service,
        (None, ConnectionStatus::Failed(message)) => anyhow::bail!("{}", message),
        (None, _) => anyhow::bail!("No saved profile named '{}'", name),
    };

    let mut table = TableState::new();
    for collection in session.loaded_collections.clone() {
        let (next_session, next_table) = app
            .open_collection(&service, session, table, &collection)
            .await?;
        println!("{}\t{} documents", collection, next_table.snapshot.len());
        session = next_session;
        table = next_table;
    }
    Ok(())
}
