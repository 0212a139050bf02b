use chrono::{DateTime, Datelike, NaiveDate, Utc};
use colored::*;

use fleet_maint::model::{
    FieldErrors, Job, JobPriority, JobStatus, Notification, NotificationKind, Ship, ShipStatus, User,
};
use fleet_maint::policy;
use fleet_maint::views::feed::relative_time;
use fleet_maint::views::kpi::{self, ShipStats};
use fleet_maint::views::overdue::job_is_overdue;
use fleet_maint::views::{CalendarMonth, FleetKpis, NotificationFeed, ShipDetail};
use fleet_maint::Snapshot;

pub fn ship_status(status: ShipStatus) -> ColoredString {
    match status {
        ShipStatus::Active => status.label().green(),
        ShipStatus::UnderMaintenance => status.label().yellow(),
        ShipStatus::Inactive => status.label().red(),
    }
}

pub fn job_status(status: JobStatus) -> ColoredString {
    match status {
        JobStatus::Open => status.label().blue(),
        JobStatus::InProgress => status.label().yellow(),
        JobStatus::Completed => status.label().green(),
        JobStatus::Cancelled => status.label().red(),
    }
}

pub fn priority(priority: JobPriority) -> ColoredString {
    match priority {
        JobPriority::Low => priority.label().green(),
        JobPriority::Medium => priority.label().yellow(),
        JobPriority::High => priority.label().bright_red(),
        JobPriority::Critical => priority.label().red().bold(),
    }
}

fn notification_kind(kind: NotificationKind) -> ColoredString {
    let label = kind.to_string();
    match kind {
        NotificationKind::Success => label.green(),
        NotificationKind::Warning => label.yellow(),
        NotificationKind::Error => label.red(),
        NotificationKind::Info => label.blue(),
    }
}

fn ship_name<'a>(snapshot: &'a Snapshot, id: &str) -> &'a str {
    snapshot.ship(id).map(|s| s.name.as_str()).unwrap_or("?")
}

fn component_name<'a>(snapshot: &'a Snapshot, id: &str) -> &'a str {
    snapshot.component(id).map(|c| c.name.as_str()).unwrap_or("?")
}

pub fn user(user: &User) {
    println!("{} <{}> ({})", user.name.bold(), user.email, user.role.to_string().cyan());
    let actions: Vec<String> = policy::allowed_actions(user.role)
        .iter()
        .map(|a| a.to_string())
        .collect();
    println!("  may: {}", actions.join(", "));
}

pub fn ships(rows: &[(&Ship, ShipStats)]) {
    if rows.is_empty() {
        println!("{}", "No ships found.".dimmed());
        return;
    }
    for (ship, stats) in rows {
        println!(
            "{}  {}  IMO {}  {}  [{}]",
            ship.id.dimmed(),
            ship.name.bold(),
            ship.imo,
            ship.flag,
            ship_status(ship.status)
        );
        println!(
            "    {} components, {} active / {} total jobs",
            stats.components, stats.active_jobs, stats.total_jobs
        );
    }
}

pub fn ship_detail(detail: &ShipDetail<'_>, snapshot: &Snapshot) {
    let ship = detail.ship;
    println!(
        "{}  IMO {}  {}  [{}]",
        ship.name.bold(),
        ship.imo,
        ship.flag,
        ship_status(ship.status)
    );
    println!(
        "  {} components ({} overdue), {} active jobs, {} critical",
        detail.stats.components,
        format!("{}", detail.stats.overdue_components).red(),
        detail.stats.active_jobs,
        detail.stats.critical_jobs
    );

    println!("\n{}", "Components".underline());
    if detail.components.is_empty() {
        println!("  {}", "No components installed.".dimmed());
    }
    for (component, overdue) in &detail.components {
        let flag = if *overdue { " OVERDUE".red().bold() } else { "".normal() };
        println!(
            "  {}  {}  SN {}  installed {}  last maintained {}{}",
            component.id.dimmed(),
            component.name,
            component.serial_number,
            component.install_date,
            component.last_maintenance_date,
            flag
        );
    }

    println!("\n{}", "Jobs".underline());
    if detail.jobs.is_empty() {
        println!("  {}", "No jobs.".dimmed());
    }
    for job in &detail.jobs {
        println!(
            "  {}  {} on {}  {}  [{}] [{}]",
            job.id.dimmed(),
            job.job_type,
            component_name(snapshot, &job.component_id),
            job.scheduled_date,
            priority(job.priority),
            job_status(job.status)
        );
    }

    println!("\n{}", "Maintenance history".underline());
    if detail.history.is_empty() {
        println!("  {}", "No completed maintenance yet.".dimmed());
    }
    for job in &detail.history {
        println!(
            "  {}  {} on {}",
            job.scheduled_date,
            job.job_type,
            component_name(snapshot, &job.component_id)
        );
    }
}

pub fn jobs(rows: &[&Job], snapshot: &Snapshot, today: NaiveDate) {
    if rows.is_empty() {
        println!("{}", "No jobs found.".dimmed());
        return;
    }
    for job in rows {
        let overdue = if job_is_overdue(job, today) {
            " OVERDUE".red().bold()
        } else {
            "".normal()
        };
        println!(
            "{}  {} - {}  {}{}",
            job.id.dimmed(),
            ship_name(snapshot, &job.ship_id).bold(),
            component_name(snapshot, &job.component_id),
            job.job_type,
            overdue
        );
        println!(
            "    scheduled {}  engineer {}  [{}] [{}]",
            job.scheduled_date,
            job.assigned_engineer_id,
            priority(job.priority),
            job_status(job.status)
        );
        if !job.description.is_empty() {
            println!("    {}", job.description.dimmed());
        }
    }
}

pub fn calendar(month: &CalendarMonth<'_>, snapshot: &Snapshot) {
    println!("{}", month.title().bold());
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");

    let mut line = String::new();
    for _ in 0..month.leading_blanks {
        line.push_str("     ");
    }
    let mut column = month.leading_blanks;
    for day in &month.days {
        let count = day.total_jobs();
        let cell = if count > 0 {
            format!("{:>3}*{}", day.date.day(), count.min(9))
        } else {
            format!("{:>3}  ", day.date.day())
        };
        if day.is_today {
            line.push_str(&cell.reversed().to_string());
        } else {
            line.push_str(&cell);
        }
        column += 1;
        if column % 7 == 0 {
            println!("{}", line);
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line);
    }

    let busy: Vec<_> = month.days.iter().filter(|d| d.total_jobs() > 0).collect();
    if !busy.is_empty() {
        println!();
    }
    for day in busy {
        for job in &day.preview {
            println!(
                "  {}  {} - {}  [{}]",
                day.date,
                ship_name(snapshot, &job.ship_id),
                component_name(snapshot, &job.component_id),
                priority(job.priority)
            );
        }
        if day.overflow > 0 {
            println!("  {}  +{} more", day.date, day.overflow);
        }
    }

    println!("\n{}", "Upcoming".underline());
    if month.upcoming.is_empty() {
        println!("  {}", "No upcoming jobs scheduled for this month.".dimmed());
    }
    for job in &month.upcoming {
        println!(
            "  {}  {} - {}  [{}] [{}]",
            job.scheduled_date,
            ship_name(snapshot, &job.ship_id),
            component_name(snapshot, &job.component_id),
            priority(job.priority),
            job_status(job.status)
        );
    }
}

pub fn kpis(kpis: &FleetKpis, snapshot: &Snapshot) {
    println!(
        "{:<22}{}  ({} active, {} under maintenance)",
        "Total ships",
        format!("{}", kpis.total_ships).cyan(),
        kpis.active_ships,
        kpis.ships_under_maintenance
    );
    println!(
        "{:<22}{}  ({} open, {} in progress)",
        "Active jobs",
        format!("{}", kpis.active_jobs()).cyan(),
        kpis.open_jobs,
        kpis.in_progress_jobs
    );
    println!(
        "{:<22}{}  components requiring attention",
        "Overdue maintenance",
        format!("{}", kpis.overdue_components).red()
    );
    println!(
        "{:<22}{}",
        "Completed jobs",
        format!("{}", kpis.completed_jobs).green()
    );
    if kpis.critical_jobs > 0 {
        println!(
            "\n{} {} critical job(s) need immediate attention",
            "!".red().bold(),
            kpis.critical_jobs
        );
    }

    println!("\n{}", "Ship status".underline());
    for (status, count) in kpi::ship_status_distribution(snapshot) {
        println!("  {:<20}{}", status.label(), count);
    }
    println!("\n{}", "Job priority".underline());
    for (level, count) in kpi::job_priority_distribution(snapshot) {
        println!("  {:<20}{}", level.label(), count);
    }
    println!("\n{}", "Job status".underline());
    for (status, count) in kpi::job_status_distribution(snapshot) {
        println!("  {:<20}{}", status.label(), count);
    }
}

pub fn feed(feed: &NotificationFeed<'_>, now: DateTime<Utc>) {
    if feed.recent.is_empty() {
        println!("{}", "No new notifications.".dimmed());
        return;
    }
    for n in &feed.recent {
        notification(n, now);
    }
    if feed.has_more() {
        println!("  ... {} active in total", feed.active_count);
    }
}

pub fn notification(n: &Notification, now: DateTime<Utc>) {
    let dismissed = if n.dismissed { " (dismissed)".dimmed() } else { "".normal() };
    println!(
        "{}  [{}] {}  {}{}",
        n.id.dimmed(),
        notification_kind(n.kind),
        n.message,
        relative_time(n.timestamp, now).dimmed(),
        dismissed
    );
}

pub fn field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {}: {}", field.yellow(), message);
    }
}
