use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rPunchClock
/// Punch-clock time tracking backed by SQLite
#[derive(Parser)]
#[command(
    name = "rpunchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Punch-clock time tracking: record activity switches, see who is working and report hours",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or one store per tenant)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared `--at` option: the instant used instead of the wall clock.
#[derive(Args, Debug, Clone, Default)]
pub struct AsOf {
    #[arg(
        long = "at",
        value_name = "TIMESTAMP",
        help = "Use this instant instead of now (YYYY-MM-DD HH:MM[:SS])"
    )]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "edit", help = "Edit the configuration file")]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Manage departments
    Department {
        #[command(subcommand)]
        action: DepartmentAction,
    },

    /// Manage activity types (work, break, end of work, ...)
    Activity {
        #[command(subcommand)]
        action: ActivityAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record a clock action for one user
    Punch {
        #[arg(long = "user", conflicts_with = "stamp_key", required_unless_present = "stamp_key")]
        user: Option<i64>,

        #[arg(long = "stamp-key", help = "Badge code instead of the user id")]
        stamp_key: Option<String>,

        #[arg(long = "activity")]
        activity: i64,

        #[arg(long = "comment")]
        comment: Option<String>,

        #[command(flatten)]
        as_of: AsOf,
    },

    /// Record the same clock action for many users at once
    Bulk {
        #[arg(long = "activity")]
        activity: i64,

        #[arg(long = "users", value_delimiter = ',', required = true)]
        users: Vec<i64>,

        #[command(flatten)]
        as_of: AsOf,
    },

    /// Delete a punch event by id
    Del { entry: i64 },

    /// Show the current status of one or all users
    Status {
        #[arg(long = "user")]
        user: Option<i64>,

        #[arg(long = "json")]
        json: bool,

        #[command(flatten)]
        as_of: AsOf,
    },

    /// List the reconstructed intervals of a user
    Intervals {
        #[arg(long = "user")]
        user: i64,

        #[arg(long = "from", help = "First day (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long = "json")]
        json: bool,

        #[command(flatten)]
        as_of: AsOf,
    },

    /// Work hour reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum DepartmentAction {
    Add { name: String },
    List,
    Rename { id: i64, name: String },
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ActivityAction {
    Add {
        status: String,

        #[arg(long = "work", conflicts_with = "no_work", help = "Time in this activity counts as work")]
        work: bool,

        #[arg(long = "no-work")]
        no_work: bool,

        #[arg(long = "comment", default_value = "")]
        comment: String,
    },
    List,
    Edit {
        id: i64,

        #[arg(long = "status")]
        status: Option<String>,

        #[arg(long = "work", value_name = "BOOL")]
        work: Option<bool>,

        #[arg(long = "comment")]
        comment: Option<String>,
    },
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum UserAction {
    Add {
        name: String,

        #[arg(long = "stamp-key")]
        stamp_key: Option<String>,

        #[arg(long = "email", default_value = "")]
        email: String,

        #[arg(long = "position", default_value = "")]
        position: String,

        #[arg(long = "dept")]
        dept: Option<i64>,

        #[arg(long = "auto-checkout", help = "Close forgotten work intervals at midnight")]
        auto_checkout: bool,
    },
    List,
    Edit {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "stamp-key")]
        stamp_key: Option<String>,

        #[arg(long = "email")]
        email: Option<String>,

        #[arg(long = "position")]
        position: Option<String>,

        #[arg(long = "dept", conflicts_with = "no_dept", help = "Move the user to this department")]
        dept: Option<i64>,

        #[arg(long = "no-dept", help = "Detach the user from its department")]
        no_dept: bool,
    },
    AutoCheckout {
        id: i64,

        #[arg(long = "on", conflicts_with = "off", required_unless_present = "off")]
        on: bool,

        #[arg(long = "off")]
        off: bool,
    },
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ReportKind {
    /// Work hours per user and day
    Daily {
        #[arg(long = "user")]
        user: Option<i64>,

        #[arg(long = "from")]
        from: Option<String>,

        #[arg(long = "to")]
        to: Option<String>,

        #[arg(long = "json")]
        json: bool,

        #[command(flatten)]
        as_of: AsOf,
    },
    /// Totals and averages per department
    Departments {
        #[arg(long = "day")]
        day: Option<String>,

        #[arg(long = "json")]
        json: bool,

        #[command(flatten)]
        as_of: AsOf,
    },
    /// Daily totals over the last N days
    Trend {
        #[arg(long = "days")]
        days: Option<u32>,

        #[arg(long = "today", help = "Last day of the series (defaults to the --at day)")]
        today: Option<String>,

        #[arg(long = "json")]
        json: bool,

        #[command(flatten)]
        as_of: AsOf,
    },
    /// Work, non-work and status per user
    Users {
        #[arg(long = "dept", help = "Department name")]
        dept: Option<String>,

        #[arg(long = "day")]
        day: Option<String>,

        #[arg(long = "json")]
        json: bool,

        #[command(flatten)]
        as_of: AsOf,
    },
}
