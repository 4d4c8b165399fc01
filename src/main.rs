//! Glimpse - summarization relay CLI.
//!
//! Wires the relay, the Gemini client, and a file-backed state store
//! together for local use: summarize a selection against a console panel
//! (or the fallback-tab flow), issue one-shot requests, and manage the
//! credential and prompt template.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glimpse_config::{ConfigLoader, GlimpseConfig};
use glimpse_core::{PanelHost, PanelTarget, Relay, RelayHandle, SelectionEvent, TabId, WindowId};
use glimpse_protocols::error::SurfaceError;
use glimpse_protocols::SurfaceRequest;
use glimpse_store::{FileStore, SessionStore};
use glimpse_summarizer_gemini::GeminiSummarizer;
use glimpse_surfaces::{OneShotSource, SessionView, StoreSource, ViewStatus};

/// Glimpse CLI.
#[derive(Parser)]
#[command(name = "glimpse")]
#[command(about = "Summarize selected text via a remote model")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize text as a selection event (panel first, tab fallback)
    Summarize {
        /// The selected text
        text: String,

        /// Originating tab id (-1 marks an unusable tab)
        #[arg(long)]
        tab: Option<i64>,

        /// Originating window id
        #[arg(long)]
        window: Option<i64>,

        /// Refuse the panel, forcing the fallback-tab route
        #[arg(long)]
        no_panel: bool,
    },

    /// Issue a direct one-shot summarization request
    Request {
        /// The text to summarize
        text: String,
    },

    /// Show the current session state
    Show,

    /// Store the API key
    SetKey {
        /// The API key
        key: String,
    },

    /// Store the prompt template
    SetPrompt {
        /// The template text
        template: Option<String>,

        /// Remove the stored template, returning to the default
        #[arg(long)]
        reset: bool,
    },

    /// Print the resolved configuration and storage paths
    ConfigPath,
}

/// Get the .glimpse directory path.
fn glimpse_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".glimpse"))
        .unwrap_or_else(|| PathBuf::from(".glimpse"))
}

fn default_config_path() -> PathBuf {
    glimpse_dir().join("config.toml")
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.glimpse/debug/ with daily rotation.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = glimpse_dir().join("debug");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("glimpse")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Panel host for the terminal: the console is always reachable.
struct ConsolePanel;

#[async_trait]
impl PanelHost for ConsolePanel {
    async fn open(&self, _target: PanelTarget) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Panel host that refuses every open, like a restricted document context.
struct NoPanel;

#[async_trait]
impl PanelHost for NoPanel {
    async fn open(&self, target: PanelTarget) -> Result<(), SurfaceError> {
        Err(SurfaceError::PanelUnavailable {
            target: target.to_string(),
        })
    }
}

/// The wired-up service pieces every command shares.
struct App {
    session: SessionStore,
    config: GlimpseConfig,
}

impl App {
    async fn open(config_path: &PathBuf) -> anyhow::Result<Self> {
        let config = ConfigLoader::load(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;
        let store = FileStore::open(config.storage.expanded_path())
            .await
            .context("failed to open state store")?;
        Ok(Self {
            session: SessionStore::new(Arc::new(store)),
            config,
        })
    }

    fn relay(&self, panels: Arc<dyn PanelHost>) -> Arc<Relay> {
        let summarizer = GeminiSummarizer::new(
            self.session.clone(),
            self.config.api.base_url.clone(),
            self.config.api.model.clone(),
        )
        .with_min_selection_chars(self.config.api.min_selection_chars);
        Arc::new(Relay::new(self.session.clone(), Arc::new(summarizer), panels))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Summarize {
            text,
            tab,
            window,
            no_panel,
        } => {
            let app = App::open(&config_path).await?;
            run_summarize(&app, text, tab, window, no_panel).await
        }
        Commands::Request { text } => {
            let app = App::open(&config_path).await?;
            let handle = RelayHandle::spawn(app.relay(Arc::new(ConsolePanel)));
            let reply = handle.request(SurfaceRequest::get_summary(text)).await;
            println!("{}", reply.text());
            Ok(())
        }
        Commands::Show => {
            let app = App::open(&config_path).await?;
            let state = app.session.session().await?;
            println!("{}", SessionView::from_state(&state).render_text());
            Ok(())
        }
        Commands::SetKey { key } => {
            let app = App::open(&config_path).await?;
            app.session.set_credential(&key).await?;
            println!("API Key saved.");
            Ok(())
        }
        Commands::SetPrompt { template, reset } => {
            let app = App::open(&config_path).await?;
            if reset {
                app.session.reset_prompt_template().await?;
                println!("Prompt reset to default.");
            } else {
                let template = template.context("provide a template or pass --reset")?;
                app.session
                    .set_prompt_template(&template)
                    .await
                    .context("Prompt cannot be empty.")?;
                println!("Prompt saved!");
            }
            Ok(())
        }
        Commands::ConfigPath => {
            let config = ConfigLoader::load(&config_path)?;
            println!("config:  {}", config_path.display());
            println!("storage: {}", config.storage.expanded_path().display());
            Ok(())
        }
    }
}

/// Drive one selection through the relay and render the session as it
/// progresses, exactly as a passive surface would.
async fn run_summarize(
    app: &App,
    text: String,
    tab: Option<i64>,
    window: Option<i64>,
    no_panel: bool,
) -> anyhow::Result<()> {
    let panels: Arc<dyn PanelHost> = if no_panel {
        Arc::new(NoPanel)
    } else {
        Arc::new(ConsolePanel)
    };
    let relay = app.relay(panels);

    let mut event = SelectionEvent::new(text);
    match (tab, window) {
        (None, None) => event = event.with_tab(TabId(1)),
        (tab, window) => {
            if let Some(tab) = tab {
                event = event.with_tab(TabId(tab));
            }
            if let Some(window) = window {
                event = event.with_window(WindowId(window));
            }
        }
    }

    // Subscribe before dispatch so the resolution is never missed.
    let mut source = StoreSource::new(app.session.clone());

    let route = relay.handle_selection(event).await?;
    match route {
        glimpse_core::SessionRoute::Panel { target } => {
            info!("panel session against {target}");
            let mut view = source.current().await?;
            println!("{}", view.render_text());
            while view.status == ViewStatus::Loading {
                let Some(next) = source.next().await else {
                    anyhow::bail!("state store closed before the summary resolved");
                };
                view = next;
                println!("{}", view.render_text());
            }
        }
        glimpse_core::SessionRoute::Fallback { location } => {
            info!("fallback tab session");
            println!("summary_display?{}", location.to_query());

            // What the fallback tab does on open and confirm.
            let handle = RelayHandle::spawn(relay);
            let tab = OneShotSource::open(&location.to_query(), app.session.clone(), handle)
                .context("fallback location was not usable")?;
            let prompt = tab.prompt_template().await?;
            let view = tab.confirm(&prompt).await?;
            println!("{}", view.render_text());
        }
    }

    Ok(())
}
