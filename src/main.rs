use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eventos_server::config::{AppConfig, CliConfig, FileConfig};
use eventos_server::console::{style::get_styles, ConsoleMenu, EditorPrompt};
use eventos_server::{run_server, EventService, RequestsLoggingLevel, SqliteEventStore};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(version, about = "Event catalog server with an interactive console", styles = get_styles())]
struct CliArgs {
    /// Path to the SQLite events database file.
    #[clap(long, value_parser = parse_path, default_value = "eventos.db")]
    pub db_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// How long a single storage call may take before the request fails.
    #[clap(long, default_value_t = 5000)]
    pub storage_timeout_ms: u64,

    /// Serve HTTP only, without the interactive menu.
    #[clap(long)]
    pub no_console: bool,

    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            storage_timeout_ms: self.storage_timeout_ms,
            console: !self.no_console,
        }
    }
}

/// Runs the menu on its own OS thread, so a pending read never holds up
/// runtime shutdown. The receiver fires once the menu returns.
fn spawn_console(service: Arc<EventService>) -> Result<oneshot::Receiver<()>> {
    let (done_tx, done_rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            match EditorPrompt::new() {
                Ok(prompt) => {
                    let mut menu = ConsoleMenu::new(&service, prompt, std::io::stdout());
                    if let Err(err) = menu.run() {
                        error!("Console stopped: {}", err);
                    }
                }
                Err(err) => error!("Failed to initialize console input: {}", err),
            }
            let _ = done_tx.send(());
        })
        .context("Failed to spawn console thread")?;
    Ok(done_rx)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    let store = SqliteEventStore::new(&app_config.db_path, app_config.storage_timeout)?;
    let event_service = Arc::new(EventService::new(Arc::new(store)));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(run_server(
        app_config.server_config(),
        event_service.clone(),
        async move {
            let _ = shutdown_rx.await;
        },
    ));

    if app_config.console {
        let console_done = spawn_console(event_service.clone())?;
        tokio::select! {
            result = &mut server => {
                // Server ended on its own, e.g. the port was taken.
                return result.context("HTTP server task panicked")?;
            }
            _ = console_done => {
                info!("Console closed, shutting down");
            }
        }
    } else {
        info!("Console disabled, press Ctrl-C to stop");
        tokio::select! {
            result = &mut server => {
                return result.context("HTTP server task panicked")?;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Received Ctrl-C, shutting down");
            }
        }
    }

    let _ = shutdown_tx.send(());
    server.await.context("HTTP server task panicked")?
}
