use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};

use fleet_maint::model::{JobPriority, JobStatus, JobType, ShipStatus};
use fleet_maint::views::Filter;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "fleet-maint")]
#[command(about = "Ship fleet maintenance tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with one of the known accounts
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user and what they may do
    Whoami,
    /// Manage ships
    #[command(subcommand)]
    Ships(ShipCommand),
    /// Manage components installed on ships
    #[command(subcommand)]
    Components(ComponentCommand),
    /// Manage maintenance jobs
    #[command(subcommand)]
    Jobs(JobCommand),
    /// Month view of scheduled jobs
    Calendar {
        /// Month to show as YYYY-MM; defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Fleet KPIs and distributions
    Kpi,
    /// Notification feed
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Print configuration values
    PrintConfig,
    /// Wipe the store and reload the seed fleet
    ResetStore,
}

#[derive(Debug, Subcommand)]
pub enum ShipCommand {
    /// List ships, optionally filtered
    List {
        /// Matches name, IMO number or flag
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: Filter<ShipStatus>,
    },
    /// Ship details, components, jobs and history
    Show { id: String },
    /// Add a ship
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        imo: String,
        #[arg(long)]
        flag: String,
        #[arg(long, default_value = "Active")]
        status: ShipStatus,
    },
    /// Edit a ship
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        imo: Option<String>,
        #[arg(long)]
        flag: Option<String>,
        #[arg(long)]
        status: Option<ShipStatus>,
    },
    /// Delete a ship with its components and jobs
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ComponentCommand {
    /// Install a component on a ship
    Add {
        #[arg(long)]
        ship: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        serial: String,
        /// YYYY-MM-DD
        #[arg(long)]
        installed: Option<NaiveDate>,
        /// YYYY-MM-DD
        #[arg(long)]
        last_maintained: Option<NaiveDate>,
    },
    /// Edit a component
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        serial: Option<String>,
        #[arg(long)]
        installed: Option<NaiveDate>,
        #[arg(long)]
        last_maintained: Option<NaiveDate>,
    },
    /// Delete a component and its jobs
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct JobFields {
    #[arg(long = "type")]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub priority: Option<JobPriority>,
    #[arg(long)]
    pub status: Option<JobStatus>,
    #[arg(long)]
    pub engineer: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub scheduled: Option<NaiveDate>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// List jobs, optionally filtered
    List {
        /// Matches ship name, component name, job type or description
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: Filter<JobStatus>,
        #[arg(long, default_value = "all")]
        priority: Filter<JobPriority>,
    },
    /// Create a job for a component
    Add {
        #[arg(long)]
        ship: String,
        #[arg(long)]
        component: String,
        #[command(flatten)]
        fields: JobFields,
    },
    /// Edit a job
    Update {
        id: String,
        #[arg(long)]
        ship: Option<String>,
        #[arg(long)]
        component: Option<String>,
        #[command(flatten)]
        fields: JobFields,
    },
    /// Change only the status of a job
    Status { id: String, status: JobStatus },
    /// Delete a job
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Recent undismissed notifications
    List {
        /// Include dismissed notifications
        #[arg(long)]
        all: bool,
    },
    /// Dismiss one notification
    Dismiss { id: String },
    /// Dismiss every active notification
    DismissAll,
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(input: &str) -> Option<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d").ok()?;
    Some((date.year(), date.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-06"), Some((2025, 6)));
        assert_eq!(parse_month("2025-13"), None);
        assert_eq!(parse_month("June"), None);
    }

    #[test]
    fn test_job_list_defaults_to_all() {
        let cli =
            Cli::try_parse_from(["fleet-maint", "jobs", "list", "--status", "completed"]).unwrap();
        match cli.command {
            Some(Commands::Jobs(JobCommand::List {
                status, priority, ..
            })) => {
                assert_eq!(status, Filter::Only(JobStatus::Completed));
                assert_eq!(priority, Filter::All);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }
}
