mod cli;
mod logging;
mod prompt;
mod render;

use std::process;

use anyhow::{bail, Context};
use chrono::Datelike;
use clap::{CommandFactory, Parser};
use colored::*;
use dotenv::dotenv;
use tracing::{error, warn};

use cli::{Cli, Commands, ComponentCommand, JobCommand, JobFields, NotificationCommand, ShipCommand};
use fleet_maint::config::load_configuration;
use fleet_maint::model::job::DEFAULT_ENGINEER_ID;
use fleet_maint::model::{
    ComponentPatch, JobPatch, JobPriority, JobStatus, JobType, NewComponent, NewJob, NewShip,
    ShipPatch, User,
};
use fleet_maint::policy::{self, Action};
use fleet_maint::storage::RocksStore;
use fleet_maint::views::{calendar, feed, kpi, ship, JobQuery, ShipQuery, ViewOptions};
use fleet_maint::{AppConfig, Error, FleetStore, Session};
use prompt::prompt_confirm;

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        Some(command) => {
            if let Err(err) = run(command, &config) {
                report(&err);
                process::exit(1);
            }
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::Validation(errors)) => {
            eprintln!("{}", "Please correct the following:".red().bold());
            render::field_errors(errors);
        }
        _ => error!("Error: {:#}", err),
    }
}

struct App {
    store: FleetStore<RocksStore>,
    session: Session,
    options: ViewOptions,
}

fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let backend = RocksStore::open(&config.store_path)
        .with_context(|| format!("Error opening store at {}", config.store_path))?;
    let store = FleetStore::open(backend)?;
    let session = Session::restore(store.backend())?;

    let mut app = App {
        store,
        session,
        options: config.view_options(),
    };
    app.dispatch(command, config)
}

impl App {
    fn dispatch(&mut self, command: Commands, config: &AppConfig) -> anyhow::Result<()> {
        match command {
            Commands::Login { email, password } => {
                if !self
                    .session
                    .login(self.store.backend_mut(), &email, &password)?
                {
                    bail!("Invalid email or password");
                }
                if let Some(user) = self.session.current_user() {
                    render::user(user);
                }
            }
            Commands::Logout => {
                self.session.logout(self.store.backend_mut())?;
                println!("Logged out");
            }
            Commands::Whoami => match self.session.current_user() {
                Some(user) => render::user(user),
                None => println!("Not logged in"),
            },
            Commands::Ships(command) => self.ships(command)?,
            Commands::Components(command) => self.components(command)?,
            Commands::Jobs(command) => self.jobs(command)?,
            Commands::Calendar { month } => self.calendar(month)?,
            Commands::Kpi => {
                self.viewer()?;
                let today = self.store.clock().today();
                let kpis = kpi::fleet_kpis(
                    self.store.snapshot(),
                    today,
                    self.options.overdue_after_days,
                );
                render::kpis(&kpis, self.store.snapshot());
            }
            Commands::Notifications(command) => self.notifications(command)?,
            Commands::PrintConfig => println!("Configuration: {:?}", config),
            Commands::ResetStore => {
                let user = self.viewer()?;
                if !policy::can_modify(user.role) {
                    bail!("role {} may not reset the store", user.role);
                }
                match prompt_confirm(
                    "Are you SURE you want to replace ALL fleet data with the seed data?",
                    Some(false),
                )? {
                    true => {
                        self.store.reset()?;
                        println!("Store reset to seed data");
                    }
                    false => println!("Reset cancelled"),
                }
            }
        }
        Ok(())
    }

    /// The signed-in user. Every data command needs one.
    fn viewer(&self) -> anyhow::Result<User> {
        match self.session.current_user() {
            Some(user) => Ok(user.clone()),
            None => bail!("Not logged in. Run `fleet-maint login` first."),
        }
    }

    fn authorize(&self, action: Action) -> anyhow::Result<()> {
        if let Err(denied) = policy::authorize(self.session.current_user(), action) {
            warn!("Refused to {}: {}", action, denied);
            bail!(denied);
        }
        Ok(())
    }

    fn ships(&mut self, command: ShipCommand) -> anyhow::Result<()> {
        match command {
            ShipCommand::List { search, status } => {
                self.viewer()?;
                let today = self.store.clock().today();
                let query = ShipQuery { search, status };
                let snapshot = self.store.snapshot();
                let rows: Vec<_> = query
                    .apply(&snapshot.ships)
                    .into_iter()
                    .map(|s| {
                        let stats =
                            kpi::ship_stats(snapshot, &s.id, today, self.options.overdue_after_days);
                        (s, stats)
                    })
                    .collect();
                render::ships(&rows);
            }
            ShipCommand::Show { id } => {
                self.viewer()?;
                let today = self.store.clock().today();
                let detail = ship::ship_detail(
                    self.store.snapshot(),
                    &id,
                    today,
                    self.options.overdue_after_days,
                )
                .ok_or_else(|| Error::not_found("Ship", &id))?;
                render::ship_detail(&detail, self.store.snapshot());
            }
            ShipCommand::Add {
                name,
                imo,
                flag,
                status,
            } => {
                self.authorize(Action::CreateShip)?;
                let ship = self.store.add_ship(NewShip {
                    name,
                    imo,
                    flag,
                    status,
                })?;
                println!("{} {} ({})", "Added ship".green(), ship.name, ship.id);
            }
            ShipCommand::Update {
                id,
                name,
                imo,
                flag,
                status,
            } => {
                self.authorize(Action::EditShip)?;
                let patch = ShipPatch {
                    name,
                    imo,
                    flag,
                    status,
                };
                if patch.is_empty() {
                    bail!("Nothing to update");
                }
                let ship = self.store.update_ship(&id, &patch)?;
                println!("{} {} ({})", "Updated ship".green(), ship.name, ship.id);
            }
            ShipCommand::Delete { id, yes } => {
                self.authorize(Action::DeleteShip)?;
                let name = match self.store.snapshot().ship(&id) {
                    Some(ship) => ship.name.clone(),
                    None => return Err(Error::not_found("Ship", &id).into()),
                };
                let question = format!(
                    "Delete ship \"{}\" together with its components and jobs?",
                    name
                );
                if !yes && !prompt_confirm(&question, Some(false))? {
                    println!("Nothing deleted");
                    return Ok(());
                }
                let removed = self.store.delete_ship(&id)?;
                println!(
                    "{} {} ({} component(s), {} job(s))",
                    "Deleted ship".yellow(),
                    name,
                    removed.components,
                    removed.jobs
                );
            }
        }
        Ok(())
    }

    fn components(&mut self, command: ComponentCommand) -> anyhow::Result<()> {
        match command {
            ComponentCommand::Add {
                ship,
                name,
                serial,
                installed,
                last_maintained,
            } => {
                self.authorize(Action::CreateComponent)?;
                let component = self.store.add_component(NewComponent {
                    ship_id: ship,
                    name,
                    serial_number: serial,
                    install_date: installed,
                    last_maintenance_date: last_maintained,
                })?;
                println!(
                    "{} {} ({}) on ship {}",
                    "Added component".green(),
                    component.name,
                    component.id,
                    component.ship_id
                );
            }
            ComponentCommand::Update {
                id,
                name,
                serial,
                installed,
                last_maintained,
            } => {
                self.authorize(Action::EditComponent)?;
                let component = self.store.update_component(
                    &id,
                    &ComponentPatch {
                        name,
                        serial_number: serial,
                        install_date: installed,
                        last_maintenance_date: last_maintained,
                    },
                )?;
                println!(
                    "{} {} ({})",
                    "Updated component".green(),
                    component.name,
                    component.id
                );
            }
            ComponentCommand::Delete { id, yes } => {
                self.authorize(Action::DeleteComponent)?;
                let name = match self.store.snapshot().component(&id) {
                    Some(component) => component.name.clone(),
                    None => return Err(Error::not_found("Component", &id).into()),
                };
                let question = format!("Delete component \"{}\" and its jobs?", name);
                if !yes && !prompt_confirm(&question, Some(false))? {
                    println!("Nothing deleted");
                    return Ok(());
                }
                let removed = self.store.delete_component(&id)?;
                println!(
                    "{} {} ({} job(s))",
                    "Deleted component".yellow(),
                    name,
                    removed.jobs
                );
            }
        }
        Ok(())
    }

    fn jobs(&mut self, command: JobCommand) -> anyhow::Result<()> {
        match command {
            JobCommand::List {
                search,
                status,
                priority,
            } => {
                self.viewer()?;
                let today = self.store.clock().today();
                let query = JobQuery {
                    search,
                    status,
                    priority,
                };
                let snapshot = self.store.snapshot();
                let rows = query.apply(&snapshot.jobs, &snapshot.ships, &snapshot.components);
                render::jobs(&rows, snapshot, today);
            }
            JobCommand::Add {
                ship,
                component,
                fields,
            } => {
                self.authorize(Action::CreateJob)?;
                let job = self.store.add_job(new_job(ship, component, fields))?;
                println!(
                    "{} {} {} scheduled {}",
                    "Created job".green(),
                    job.id,
                    job.job_type,
                    job.scheduled_date
                );
            }
            JobCommand::Update {
                id,
                ship,
                component,
                fields,
            } => {
                let patch = JobPatch {
                    ship_id: ship,
                    component_id: component,
                    job_type: fields.job_type,
                    priority: fields.priority,
                    status: fields.status,
                    assigned_engineer_id: fields.engineer,
                    scheduled_date: fields.scheduled,
                    description: fields.description,
                };
                self.authorize(policy::action_for_job_patch(&patch))?;
                let job = self.store.update_job(&id, &patch)?;
                println!(
                    "{} {} [{}]",
                    "Updated job".green(),
                    job.id,
                    render::job_status(job.status)
                );
            }
            JobCommand::Status { id, status } => {
                self.authorize(Action::UpdateJobStatus)?;
                let job = self.store.set_job_status(&id, status)?;
                println!("Job {} is now [{}]", job.id, render::job_status(job.status));
            }
            JobCommand::Delete { id, yes } => {
                self.authorize(Action::DeleteJob)?;
                if self.store.snapshot().job(&id).is_none() {
                    return Err(Error::not_found("Job", &id).into());
                }
                if !yes && !prompt_confirm(&format!("Delete job {}?", id), Some(false))? {
                    println!("Nothing deleted");
                    return Ok(());
                }
                self.store.delete_job(&id)?;
                println!("{} {}", "Deleted job".yellow(), id);
            }
        }
        Ok(())
    }

    fn calendar(&mut self, month: Option<String>) -> anyhow::Result<()> {
        self.viewer()?;
        let today = self.store.clock().today();
        let (year, month) = match month {
            Some(input) => cli::parse_month(&input)
                .with_context(|| format!("Invalid month '{}', expected YYYY-MM", input))?,
            None => (today.year(), today.month()),
        };
        let grid = calendar::build_month(
            self.store.jobs(),
            year,
            month,
            today,
            self.options.calendar_preview_per_day,
            self.options.upcoming_limit,
        )
        .with_context(|| format!("Invalid month {}-{:02}", year, month))?;
        render::calendar(&grid, self.store.snapshot());
        Ok(())
    }

    fn notifications(&mut self, command: NotificationCommand) -> anyhow::Result<()> {
        self.viewer()?;
        match command {
            NotificationCommand::List { all } => {
                let now = self.store.clock().now();
                if all {
                    for n in self.store.notifications() {
                        render::notification(n, now);
                    }
                } else {
                    let recent = feed::notification_feed(
                        self.store.notifications(),
                        self.options.notification_preview,
                    );
                    render::feed(&recent, now);
                }
            }
            NotificationCommand::Dismiss { id } => {
                self.store.dismiss_notification(&id)?;
                println!("Dismissed {}", id);
            }
            NotificationCommand::DismissAll => {
                let count = self.store.dismiss_all_notifications()?;
                println!("Dismissed {} notification(s)", count);
            }
        }
        Ok(())
    }
}

/// Unset fields take the defaults of the new-job form.
fn new_job(ship_id: String, component_id: String, fields: JobFields) -> NewJob {
    NewJob {
        ship_id,
        component_id,
        job_type: fields.job_type.unwrap_or(JobType::Inspection),
        priority: fields.priority.unwrap_or(JobPriority::Medium),
        status: fields.status.unwrap_or(JobStatus::Open),
        assigned_engineer_id: fields
            .engineer
            .unwrap_or_else(|| DEFAULT_ENGINEER_ID.to_string()),
        scheduled_date: fields.scheduled,
        description: fields.description.unwrap_or_default(),
    }
}
