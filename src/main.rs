use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ticketdesk::app::AppContext;
use ticketdesk::commands;
use ticketdesk::config::Config;
use ticketdesk::logging;

#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(about = "Submit and triage security incidents from the terminal")]
#[command(version)]
struct Cli {
    /// Base address of the ticketing API
    #[arg(long, global = true, env = "TICKETDESK_API_URL")]
    api_url: Option<String>,

    /// Directory holding the local session storage
    #[arg(long, global = true, env = "TICKETDESK_HOME")]
    home: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session locally
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(short, long, env = "TICKETDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Account password
        #[arg(short, long, env = "TICKETDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Greeting and unread notification count
    Home,

    /// Show identity, role and available actions
    Profile,

    /// Update name, email or password
    EditProfile {
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New email
        #[arg(short, long)]
        email: Option<String>,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List tickets visible to your role
    List,

    /// Show a ticket with its comments
    Show {
        /// Ticket ID
        id: i64,
    },

    /// Report a new incident
    Create {
        /// Ticket title
        title: String,
        /// What happened
        #[arg(short, long)]
        description: String,
        /// Category ID or name
        #[arg(short, long)]
        category: String,
        /// Priority (low, medium, high, critical); defaults to medium
        #[arg(short, long)]
        priority: Option<String>,
        /// When the incident happened (YYYY-MM-DD)
        #[arg(short, long)]
        incident_date: Option<String>,
        /// File to attach (repeatable)
        #[arg(short, long = "attach")]
        attach: Vec<PathBuf>,
    },

    /// Change a ticket's status (operators and administrators)
    Status {
        /// Ticket ID
        id: i64,
        /// NEW, IN_PROGRESS, NEED_INFO, CLOSED or REJECTED
        status: String,
    },

    /// Assign a ticket to an operator (administrators)
    Assign {
        /// Ticket ID
        id: i64,
        /// Operator ID or name
        operator: String,
    },

    /// Delete a ticket
    Delete {
        /// Ticket ID
        id: i64,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Add a comment to a ticket
    Comment {
        /// Ticket ID
        id: i64,
        /// Comment text
        text: String,
    },

    /// List comments on a ticket, or on every ticket with --all
    Comments {
        /// Ticket ID
        #[arg(required_unless_present = "all")]
        id: Option<i64>,
        /// Show comments across all tickets
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },

    /// Show notifications; unread ones are marked read once shown
    Notifications,

    /// List ticket categories
    Categories,

    /// List assignable operators
    Operators,

    /// Session management
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Show who is logged in
    Status,
    /// Block until a login happens in another terminal
    Wait {
        /// Poll interval in milliseconds
        #[arg(long, env = "TICKETDESK_POLL_MS")]
        interval: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let poll_ms = match &cli.command {
        Commands::Session {
            action: SessionCommands::Wait { interval },
        } => *interval,
        _ => None,
    };
    let config = Config::resolve(cli.api_url, cli.home, poll_ms, cli.log_json, cli.verbose);
    logging::init(config.log_json, config.verbose);
    tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "starting");

    let ctx = AppContext::open(&config)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password),

        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&ctx, &name, &email, &password),

        Commands::Logout => commands::auth::logout(&ctx),

        Commands::Home => commands::home::run(&ctx),

        Commands::Profile => commands::profile::show(&ctx),

        Commands::EditProfile {
            name,
            email,
            password,
        } => commands::profile::edit(
            &ctx,
            name.as_deref(),
            email.as_deref(),
            password.as_deref(),
        ),

        Commands::List => commands::list::run(&ctx),

        Commands::Show { id } => commands::show::run(&ctx, id),

        Commands::Create {
            title,
            description,
            category,
            priority,
            incident_date,
            attach,
        } => commands::create::run(
            &ctx,
            &title,
            &description,
            &category,
            priority.as_deref(),
            incident_date.as_deref(),
            &attach,
        ),

        Commands::Status { id, status } => commands::status::run(&ctx, id, &status),

        Commands::Assign { id, operator } => commands::assign::run(&ctx, id, &operator),

        Commands::Delete { id, force } => commands::delete::run(&ctx, id, force),

        Commands::Comment { id, text } => commands::comment::add(&ctx, id, &text),

        Commands::Comments { id, .. } => match id {
            Some(id) => commands::comment::list(&ctx, id),
            None => commands::comment::list_all(&ctx),
        },

        Commands::Notifications => commands::notifications::run(&ctx),

        Commands::Categories => commands::lookup::categories(&ctx),

        Commands::Operators => commands::lookup::operators(&ctx),

        Commands::Session { action } => match action {
            SessionCommands::Status => commands::session::status(&ctx),
            SessionCommands::Wait { .. } => commands::session::wait(&ctx, config.poll_interval),
        },
    }
}
