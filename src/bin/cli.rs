//! EventDash CLI
//!
//! Command-line front end for the events admin dashboard:
//! - Log in, register, log out
//! - List, inspect, create and delete events
//! - Add participants
//! - Show engagement analytics

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eventdash::api::{ApiClient, ApiClientConfig, Event, EventType};
use eventdash::config::{Config, LogFormat, LoggingConfig};
use eventdash::routes::Route;
use eventdash::session::{FileStorage, GateDecision, RestoreOutcome, SessionGate, SessionStore};
use eventdash::views::{
    Activation, AnalyticsView, DashboardSummary, EventCreate, EventDetail, EventsList,
    ViewContext,
};

#[derive(Parser)]
#[command(name = "eventdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin dashboard for events, participants and engagement analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Events API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        email: String,
        /// Password (default: EVENTDASH_PASSWORD, then stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Password (default: EVENTDASH_PASSWORD, then stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Dashboard summary
    Summary,

    /// Manage events
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },

    /// Manage event participants
    Participants {
        #[command(subcommand)]
        command: ParticipantsCommand,
    },

    /// Show engagement analytics (default: first event)
    Analytics {
        #[arg(short, long)]
        event: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List all events
    List,

    /// Show one event and its participants
    Show { id: String },

    /// Create an event
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Start, e.g. 2024-06-01T09:00
        #[arg(long)]
        start: String,
        /// End, e.g. 2024-06-01T17:00
        #[arg(long)]
        end: String,
        /// VIRTUAL, IN_PERSON or HYBRID
        #[arg(long = "type", default_value = "VIRTUAL")]
        event_type: EventType,
        #[arg(long)]
        capacity: String,
    },

    /// Delete an event
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ParticipantsCommand {
    /// Add a user to an event
    Add { event_id: String, user_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::discover();
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }
    config.validate().context("Invalid configuration")?;

    let client = Arc::new(
        ApiClient::new(ApiClientConfig::from(&config.api)).context("Failed to build HTTP client")?,
    );
    let storage = Arc::new(FileStorage::new(&config.session.data_dir));
    let store = Arc::new(SessionStore::new(client.clone(), storage));

    match store.restore() {
        RestoreOutcome::Expired => eprintln!("Stored session has expired; log in again."),
        RestoreOutcome::Invalid => eprintln!("Stored session was unreadable and has been cleared."),
        RestoreOutcome::Empty | RestoreOutcome::Restored => {}
    }

    let gate = SessionGate::new(Arc::clone(&store));
    let ctx = ViewContext::new(store.subscribe(), client);

    // Ctrl-C tears down every view; pending responses are dropped
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.shutdown();
        }
    });

    match cli.command {
        Commands::Login { email, password } => {
            let password = read_password(password)?;
            let next = store.login(&email, &password).await?;
            println!("Logged in as {}", email);
            tracing::debug!(route = %next, "Login complete");
        }

        Commands::Register {
            email,
            name,
            password,
        } => {
            let password = read_password(password)?;
            let next = store.register(&email, &password, &name).await?;
            println!("Registered and logged in as {}", email);
            tracing::debug!(route = %next, "Registration complete");
        }

        Commands::Logout => {
            gate.logout();
            println!("Logged out");
        }

        Commands::Whoami => {
            let session = require_session(&gate)?;
            let claims = session.claims().unwrap_or_default();

            if cli.format == OutputFormat::Json {
                let body = serde_json::json!({
                    "sub": claims.sub,
                    "email": claims.email,
                    "name": claims.name,
                    "exp": claims.exp,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Name:    {}", claims.name.as_deref().unwrap_or("-"));
                println!("Email:   {}", claims.email.as_deref().unwrap_or("-"));
                println!("Subject: {}", claims.sub.as_deref().unwrap_or("-"));
                let expires = claims
                    .expires_at()
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!("Expires: {}", expires);
            }
        }

        Commands::Summary => {
            require_session(&gate)?;
            let mut view = DashboardSummary::new(&ctx);
            let outcome = view.activate().await;
            ensure_loaded(outcome, view.last_error())?;

            if cli.format == OutputFormat::Json {
                let body = serde_json::json!({ "events": view.event_count() });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Dashboard");
                println!();
                println!("Events: {}", view.event_count());
                println!();
                for (route, label) in Route::navigation() {
                    println!("  {:<10} {}", label, route);
                }
            }
        }

        Commands::Events { command } => {
            require_session(&gate)?;
            run_events(command, &ctx, cli.format).await?;
        }

        Commands::Participants {
            command: ParticipantsCommand::Add { event_id, user_id },
        } => {
            require_session(&gate)?;
            let mut view = EventDetail::new(&ctx, event_id);
            view.set_new_participant(user_id.clone());
            view.add_participant().await?;
            println!("Added {} to event {}", user_id, view.event_id());
        }

        Commands::Analytics { event } => {
            require_session(&gate)?;
            let mut view = match &event {
                Some(id) => AnalyticsView::new(&ctx).with_selection(id.clone()),
                None => AnalyticsView::new(&ctx),
            };
            let outcome = view.activate().await;
            ensure_loaded(outcome, view.last_error())?;

            if let Some(id) = event {
                if view.selected() != Some(id.as_str()) {
                    bail!("Event {} not found", id);
                }
            }

            print_analytics(&view, cli.format)?;
        }

        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

async fn run_events(
    command: EventsCommand,
    ctx: &ViewContext,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        EventsCommand::List => {
            let mut view = EventsList::new(ctx);
            let outcome = view.activate().await;
            ensure_loaded(outcome, view.last_error())?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(view.events())?);
            } else if view.events().is_empty() {
                println!("No events yet.");
                println!();
                println!("Create your first event with:");
                println!("  eventdash events create --name ... ({})", EventsList::create_route());
            } else {
                print_events_table(view.events());
            }
        }

        EventsCommand::Show { id } => {
            let mut view = EventDetail::new(ctx, id);
            let outcome = view.activate().await;
            ensure_loaded(outcome, view.last_error())?;

            let Some(event) = view.event() else {
                bail!("Event {} not found", view.event_id());
            };

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(event)?);
            } else {
                println!("{}", event.name);
                println!();
                println!("{}", event.description);
                println!();
                println!("Start:    {}", format_date(&event.start_date));
                println!("End:      {}", format_date(&event.end_date));
                println!("Type:     {}", event.event_type.label());
                println!(
                    "Capacity: {}",
                    event.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
                );
                println!();
                println!("Participants ({}):", view.participants().len());
                for user_id in view.participants() {
                    println!("  {}", user_id);
                }
            }
        }

        EventsCommand::Create {
            name,
            description,
            start,
            end,
            event_type,
            capacity,
        } => {
            let mut view = EventCreate::new(ctx);
            view.form.name = name;
            view.form.description = description;
            view.form.start_date = start;
            view.form.end_date = end;
            view.form.event_type = event_type;
            view.form.capacity = capacity;

            let next = view.submit().await?;
            println!("Created event {}", view.form.name);
            tracing::debug!(route = %next, "Create complete");
        }

        EventsCommand::Delete { id } => {
            let mut view = EventDetail::new(ctx, id);
            let next = view.delete().await?;
            println!("Deleted event {}", view.event_id());
            tracing::debug!(route = %next, "Delete complete");
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("eventdash={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == LogFormat::Json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = Config::template();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

/// Protected commands go through the gate like protected screens do
fn require_session(gate: &SessionGate) -> anyhow::Result<eventdash::Session> {
    match gate.check() {
        GateDecision::Render(session) => Ok(session),
        GateDecision::Redirect(route) => {
            bail!("Not logged in ({}). Run `eventdash login <email>` first.", route)
        }
    }
}

fn ensure_loaded(outcome: Activation, last_error: Option<&str>) -> anyhow::Result<()> {
    match outcome {
        Activation::Loaded => Ok(()),
        Activation::NoSession => bail!("Not logged in"),
        Activation::Failed => bail!("{}", last_error.unwrap_or("Request failed")),
        Activation::TornDown => bail!("Interrupted"),
    }
}

fn read_password(arg: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = arg.or_else(|| std::env::var("EVENTDASH_PASSWORD").ok()) {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn format_date(raw: &str) -> String {
    eventdash::api::models::parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn print_events_table(events: &[Event]) {
    println!(
        "{:<26} {:<28} {:<10} {:<17} {:<17} {:>8}",
        "ID", "Name", "Type", "Start", "End", "Capacity"
    );
    println!("{}", "-".repeat(111));

    for event in events {
        println!(
            "{:<26} {:<28} {:<10} {:<17} {:<17} {:>8}",
            event.id,
            truncate(&event.name, 28),
            event.event_type.label(),
            format_date(&event.start_date),
            format_date(&event.end_date),
            event.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
        );
    }
}

fn print_analytics(view: &AnalyticsView, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "eventId": view.selected(),
            "analytics": view.analytics(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let Some(selected) = view.selected() else {
        println!("No events to analyse.");
        return Ok(());
    };

    let name = view
        .events()
        .iter()
        .find(|e| e.id == selected)
        .map(|e| e.name.as_str())
        .unwrap_or(selected);
    println!("Analytics: {}", name);
    println!();

    if let Some(summary) = view.summary() {
        println!("Total Participants:  {}", summary.total_participants);
        println!("Overall Engagement:  {}", summary.overall_engagement);
        println!("Sessions:            {}", summary.session_count);
    }

    if let Some(chart) = view.chart() {
        println!();
        println!("{}", chart);
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
