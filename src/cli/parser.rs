use clap::{Parser, Subcommand};

/// Command-line interface definition for poppy
#[derive(Parser)]
#[command(
    name = "poppy",
    version = env!("CARGO_PKG_VERSION"),
    about = "poppy (POP): your Popeye-powered secretary",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, info)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add an event (action/decision/idea/paper/note/meeting)
    Add {
        /// Event text
        text: String,

        #[arg(
            long = "kind",
            help = "Available kinds: action, decision, idea, paper, note, meeting"
        )]
        kind: String,

        #[arg(long = "why", help = "Why this event matters")]
        why: Option<String>,

        #[arg(
            long = "tags",
            help = "Repeat --tags for multiple values (e.g. --tags foo --tags bar)"
        )]
        tags: Vec<String>,

        #[arg(long = "meta", help = "JSON object, e.g. '{\"url\": \"...\"}'")]
        meta: Option<String>,

        #[arg(
            long = "due-at",
            help = "Due date: RFC 3339, 'YYYY-MM-DD HH:MM' (UTC) or 'YYYY-MM-DD'"
        )]
        due_at: Option<String>,

        #[arg(long = "completed-at", help = "Mark the event completed at this time")]
        completed_at: Option<String>,
    },

    /// Show this week's events (UTC week)
    Week,

    /// Show action items
    Todo {
        #[arg(long = "all", help = "Include actions without a due date and completed ones")]
        all: bool,

        #[arg(
            long = "split",
            conflicts_with = "all",
            help = "Group pending todos by creation week"
        )]
        split: bool,
    },

    /// Mark an event as completed
    Done {
        /// Event id
        id: i64,

        #[arg(long = "at", help = "Completion time (default: now)")]
        at: Option<String>,
    },

    /// Run the HTTP API
    Serve {
        #[arg(long = "bind", help = "Address to listen on, e.g. 127.0.0.1:8000")]
        bind: Option<String>,
    },
}
