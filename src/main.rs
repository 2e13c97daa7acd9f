//src/main.rs
mod cli;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use std::io::{self, stdout, BufRead, Write};
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use fitness_tracker_lib::{
    add_days, parse_lift_type, view, Activity, EditMode, HistoryGroup, Tracker, WorkoutId,
    WINDOW_DAYS,
};

const PROGRESS_BAR_WIDTH: usize = 28;

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli_args = cli::parse_args();

    if let Some(cli::Commands::GenerateCompletion { shell }) = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();
        eprintln!("Generating completion script for {shell}...");
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        return Ok(());
    }

    let mut tracker = Tracker::initialize().context("Failed to initialize tracker")?;
    debug!(path = %tracker.config_path.display(), "loaded config");
    if let Some(goal) = cli_args.goal.as_deref() {
        tracker.set_goal(goal);
    }

    print_overview(&tracker);
    run_shell(&mut tracker)
}

fn run_shell(tracker: &mut Tracker) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout().flush().context("Failed to flush prompt")?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        match cli::parse_line(&line) {
            Ok(parsed) => {
                if matches!(parsed.command, cli::ShellCommand::Quit) {
                    return Ok(());
                }
                if let Err(e) = execute(tracker, parsed.command) {
                    println!("Error: {e:#}");
                }
            }
            // Covers --help and parse failures alike; clap formats both.
            Err(e) => e.print().context("Failed to print command usage")?,
        }
    }
}

fn execute(tracker: &mut Tracker, command: cli::ShellCommand) -> Result<()> {
    debug!(?command, "executing");
    match command {
        cli::ShellCommand::Toggle { activity } => {
            tracker.toggle(activity.into());
            print_overview(tracker);
        }
        cli::ShellCommand::Lift { subtype } => {
            let lift_type = parse_lift_type(&subtype)
                .with_context(|| format!("Unknown lift type '{subtype}'"))?;
            tracker.set_lift_type(lift_type);
            print_overview(tracker);
        }
        cli::ShellCommand::Edit { day } => {
            let target = resolve_day(tracker, &day)?;
            tracker.begin_edit(target);
            print_overview(tracker);
        }
        cli::ShellCommand::Commit => {
            if tracker.commit() {
                println!("Workouts updated.");
            } else {
                println!("Not editing another day; changes to today are already saved.");
            }
            print_overview(tracker);
        }
        cli::ShellCommand::Today => {
            tracker.jump_to_today();
            print_overview(tracker);
        }
        cli::ShellCommand::Step { direction } => {
            tracker.step(direction.into());
            print_window(tracker);
        }
        cli::ShellCommand::Set { id, field, value } => {
            let text = value.join(" ");
            if !tracker.set_field(WorkoutId::new(id), field.into(), &text) {
                warn!(id, "workout vanished before edit");
                println!("Workout {id} no longer exists.");
            }
        }
        cli::ShellCommand::Goal { value } => {
            let goal = tracker.set_goal(&value);
            println!("Goal: {goal} days/week");
            print_progress(tracker);
        }
        cli::ShellCommand::Show => print_overview(tracker),
        cli::ShellCommand::History => print_history_table(tracker),
        cli::ShellCommand::Export => print_history_csv(&tracker.history())?,
        cli::ShellCommand::Quit => {}
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD`, `today`, `yesterday` or a 1-based slot of the window.
/// The picked day keeps the current time of day.
fn resolve_day(tracker: &Tracker, input: &str) -> Result<NaiveDateTime> {
    let now = tracker.now();
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(now);
    }
    if trimmed.eq_ignore_ascii_case("yesterday") {
        return Ok(add_days(now, -1));
    }
    if let Ok(slot) = trimmed.parse::<usize>() {
        if (1..=WINDOW_DAYS).contains(&slot) {
            return Ok(add_days(tracker.anchor(), slot as i64 - 1));
        }
        bail!("Window slot must be between 1 and {WINDOW_DAYS}, got {slot}");
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .with_context(|| format!("Invalid day '{trimmed}'. Use YYYY-MM-DD, today, yesterday or 1-{WINDOW_DAYS}"))?;
    Ok(date.and_time(now.time()))
}

fn print_overview(tracker: &Tracker) {
    print_selection(tracker);
    print_progress(tracker);
    print_window(tracker);
}

fn print_selection(tracker: &Tracker) {
    match tracker.edit_mode() {
        EditMode::Live => println!("Logging for today"),
        EditMode::Staged(day) => println!(
            "Editing {} (run 'commit' to save, 'today' to cancel)",
            day.format("%a %b %-d %Y")
        ),
    }
    let buttons: Vec<String> = Activity::iter()
        .map(|activity| {
            let mark = if tracker.is_selected(activity) { "x" } else { " " };
            format!("[{mark}] {} {activity}", view::activity_icon(activity))
        })
        .collect();
    println!("{}", buttons.join("  "));
    if tracker.is_selected(Activity::Lift) {
        match tracker.selected_lift_type() {
            Some(lift_type) => println!(
                "Lift type: {} {lift_type}",
                view::lift_type_icon(lift_type)
            ),
            None => println!("Lift type: (select with 'lift <type>')"),
        }
    }
}

fn print_progress(tracker: &Tracker) {
    let progress = tracker.weekly_progress();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (progress.ratio * PROGRESS_BAR_WIDTH as f64).round() as usize;
    println!(
        "{} / {} days worked out  [{}{}]",
        progress.count,
        progress.goal,
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    );
}

fn print_window(tracker: &Tracker) {
    let header_color = tracker.config.theme.header();
    let active_color = tracker.config.theme.active_day();
    let days = tracker.visible_days();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(days.iter().enumerate().map(|(slot, cell)| {
            let header = Cell::new(format!("{} {}\n{}", slot + 1, cell.day_label, cell.date_label));
            if cell.is_active {
                header.fg(active_color).add_attribute(Attribute::Bold)
            } else {
                header.fg(header_color)
            }
        }));

    table.add_row(days.iter().map(|cell| {
        let mut content = if cell.is_empty() {
            view::EMPTY_DAY_ICON.to_string()
        } else {
            cell.icons.join(" ")
        };
        if tracker.config.show_overflow && cell.overflow_count > 0 {
            content.push_str(&format!(" +{}", cell.overflow_count));
        }
        let body = Cell::new(content);
        if cell.is_active {
            body.fg(active_color)
        } else {
            body
        }
    }));
    println!("{table}");
}

fn print_history_table(tracker: &Tracker) {
    let groups = tracker.history();
    if groups.is_empty() {
        println!("No workouts logged yet.");
        return;
    }
    let header_color = tracker.config.theme.header();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Day").fg(header_color),
            Cell::new("ID").fg(header_color),
            Cell::new("Workout").fg(header_color),
            Cell::new("Duration").fg(header_color),
            Cell::new("Notes").fg(header_color),
        ]);

    for group in groups {
        for (i, workout) in group.workouts.iter().enumerate() {
            let day_cell = if i == 0 {
                Cell::new(&group.label).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                day_cell,
                Cell::new(workout.id.to_string()),
                Cell::new(format!(
                    "{} {}",
                    view::workout_icon(workout),
                    view::workout_title(workout)
                )),
                Cell::new(or_dash(&workout.duration)),
                Cell::new(or_dash(&workout.notes)).fg(Color::Grey),
            ]);
        }
    }
    println!("{table}");
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn print_history_csv(groups: &[HistoryGroup]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["ID", "Date", "Activity", "Lift_Type", "Duration", "Notes"])?;
    for group in groups {
        for workout in &group.workouts {
            writer.write_record([
                workout.id.to_string(),
                workout.date.format("%Y-%m-%d").to_string(),
                workout.activity.to_string(),
                workout
                    .lift_type
                    .map_or_else(String::new, |t| t.to_string()),
                workout.duration.clone(),
                workout.notes.clone(),
            ])?;
        }
    }
    writer.flush().context("Failed to write CSV")?;
    Ok(())
}
