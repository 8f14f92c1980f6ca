pub mod algorithm;
pub mod capture;
pub mod error;
pub mod models;
pub mod runtime;
pub mod surface;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

pub use error::{HandpointerError, Result};
pub use runtime::interaction_loop::{FrameReport, InteractionContext, InteractionLoop};

#[derive(Parser, Debug)]
#[command(name = "handpointer", about = "Replay a recorded hand-tracking session")]
struct Cli {
    /// Recorded detector session (recording.json, schemaVersion 1)
    recording: PathBuf,

    /// Interaction settings (default: <config dir>/handpointer/settings.json)
    settings: Option<PathBuf>,
}

/// Replays a recording and prints the summary as JSON.
pub fn run() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let summary = match runtime::replay::replay_file(&cli.recording, cli.settings.as_deref()) {
        Ok(summary) => summary,
        Err(err) => {
            log::error!("run: {err}");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("run: failed to serialize summary: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_takes_recording_and_optional_settings() {
        let cli = Cli::try_parse_from(["handpointer", "session.json"]).expect("parse");
        assert_eq!(cli.recording, PathBuf::from("session.json"));
        assert!(cli.settings.is_none());

        let cli = Cli::try_parse_from(["handpointer", "session.json", "settings.json"])
            .expect("parse");
        assert_eq!(cli.settings, Some(PathBuf::from("settings.json")));
    }

    #[test]
    fn cli_rejects_help_as_a_path_and_extra_arguments() {
        let err = Cli::try_parse_from(["handpointer", "--help"]).expect_err("help");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Cli::try_parse_from(["handpointer", "a.json", "b.json", "c.json"]).is_err());
        assert!(Cli::try_parse_from(["handpointer"]).is_err());
    }
}
