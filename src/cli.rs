// src/cli.rs
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use fitness_tracker_lib::{Activity, Direction, WorkoutField};

#[derive(Parser, Debug)]
#[command(author, version, about = "Track daily workouts against a weekly goal", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Start the session with this weekly goal instead of the configured one
    #[arg(short, long, allow_hyphen_values = true)]
    pub goal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a shell completion script for the launcher arguments
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// One line typed into the interactive session.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Check or uncheck an activity for the day being edited
    #[command(alias = "t")]
    Toggle {
        #[arg(value_enum)]
        activity: ActivityCli,
    },
    /// Pick the lift subtype (push, pull, legs, full-body, none)
    Lift { subtype: String },
    /// Edit another day: YYYY-MM-DD, today, yesterday, or a window slot 1-5
    Edit { day: String },
    /// Save the selection as the full set of workouts for the edited day
    #[command(alias = "save")]
    Commit,
    /// Re-centre the window on today and leave edit mode
    Today,
    /// Slide the visible window by one day
    Step {
        #[arg(value_enum)]
        direction: DirectionCli,
    },
    /// Set a workout's duration or notes
    Set {
        id: u64,
        #[arg(value_enum)]
        field: FieldCli,
        /// New text; omit to clear
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Set the weekly goal (1-7 days)
    Goal {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show selection, progress and the visible days
    #[command(alias = "s")]
    Show,
    /// List past workouts grouped by day
    History,
    /// Write the history as CSV to stdout
    Export,
    #[command(alias = "exit", alias = "q")]
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityCli {
    Stretch,
    Cycle,
    Swim,
    Lift,
    Walk,
    Ball,
}

impl From<ActivityCli> for Activity {
    fn from(value: ActivityCli) -> Self {
        match value {
            ActivityCli::Stretch => Self::Stretch,
            ActivityCli::Cycle => Self::Cycle,
            ActivityCli::Swim => Self::Swim,
            ActivityCli::Lift => Self::Lift,
            ActivityCli::Walk => Self::Walk,
            ActivityCli::Ball => Self::Ball,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionCli {
    #[value(alias = "back", alias = "left")]
    Backward,
    #[value(alias = "right")]
    Forward,
}

impl From<DirectionCli> for Direction {
    fn from(value: DirectionCli) -> Self {
        match value {
            DirectionCli::Backward => Self::Backward,
            DirectionCli::Forward => Self::Forward,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCli {
    Duration,
    Notes,
}

impl From<FieldCli> for WorkoutField {
    fn from(value: FieldCli) -> Self {
        match value {
            FieldCli::Duration => Self::Duration,
            FieldCli::Notes => Self::Notes,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

/// Parses one whitespace-separated input line.
pub fn parse_line(line: &str) -> Result<ShellLine, clap::Error> {
    ShellLine::try_parse_from(line.split_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shell_lines() {
        let line = parse_line("toggle lift").unwrap();
        assert!(matches!(
            line.command,
            ShellCommand::Toggle {
                activity: ActivityCli::Lift
            }
        ));

        let line = parse_line("step back").unwrap();
        assert!(matches!(
            line.command,
            ShellCommand::Step {
                direction: DirectionCli::Backward
            }
        ));

        let line = parse_line("set 4 notes felt strong today").unwrap();
        match line.command {
            ShellCommand::Set { id, field, value } => {
                assert_eq!(id, 4);
                assert_eq!(field, FieldCli::Notes);
                assert_eq!(value.join(" "), "felt strong today");
            }
            other => panic!("unexpected {other:?}"),
        }

        let line = parse_line("goal -3").unwrap();
        assert!(matches!(line.command, ShellCommand::Goal { ref value } if value == "-3"));
    }

    #[test]
    fn rejects_unknown_activity() {
        assert!(parse_line("toggle yoga").is_err());
    }

    #[test]
    fn launcher_command_is_well_formed() {
        build_cli_command().debug_assert();
    }
}
