use std::process::ExitCode;

use chat_bubble::chat::{Collaborators, LinkifyRenderer, StandardNotices, render_message};
use chat_bubble::common::{StoreEvent, ViewerContext};
use chat_bubble::config::{self, AppConfig};
use chat_bubble::room::{LocalIdentity, RoomClient, TranscriptEntry, load_transcript};
use chat_bubble::store::ChatStore;
use chat_bubble::ui::{AppState, ChatApp};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "chat_bubble",
    version,
    about = "Conference chat message bubbles"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Participant id to view the chat as (overrides config)
    #[arg(long, value_name = "ID")]
    viewer: Option<String>,
    /// Start knocking in the lobby (overrides config)
    #[arg(long, conflicts_with = "no_knocking")]
    knocking: bool,
    /// Start already admitted (overrides config)
    #[arg(long)]
    no_knocking: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
}

impl Cli {
    /// Knocking state forced from the command line, if any.
    fn knocking_override(&self) -> Option<bool> {
        match (self.knocking, self.no_knocking) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Replay the transcript without UI and print every message's view tree
    Dump {
        /// Print JSON instead of the outline
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(knocking) = cli.knocking_override() {
        app_config.knocking = knocking;
    }
    if let Some(viewer) = cli.viewer {
        app_config.viewer_id = viewer;
    }

    let transcript = match &app_config.transcript {
        Some(path) => match load_transcript(path) {
            Ok(entries) => entries,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::warn!("No transcript configured; the chat starts empty");
            Vec::new()
        }
    };

    if let Some(Mode::Dump { json }) = cli.mode {
        return dump(&app_config, transcript, json);
    }

    match run_full_client(app_config, transcript).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("UI terminated: {err}");
            ExitCode::FAILURE
        }
    }
}

fn collaborators(app_config: &AppConfig) -> Collaborators {
    Collaborators::new(
        LinkifyRenderer::default(),
        app_config.clock(),
        StandardNotices,
    )
}

fn viewer(app_config: &AppConfig) -> ViewerContext {
    ViewerContext::new(app_config.viewer_id.clone()).knocking(app_config.knocking)
}

fn dump(app_config: &AppConfig, transcript: Vec<TranscriptEntry>, json: bool) -> ExitCode {
    let mut store = ChatStore::new(viewer(app_config));
    for entry in transcript {
        store.apply(StoreEvent::from(entry));
    }

    let collaborators = collaborators(app_config);
    let viewer = store.viewer_context();
    let nodes: Vec<_> = store
        .messages()
        .iter()
        .map(|message| {
            render_message(
                message,
                &viewer,
                store.room(),
                app_config.display_preferences(),
                &collaborators,
            )
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&nodes) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                log::error!("Failed to serialize view trees: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for node in &nodes {
            print!("{node}");
        }
    }
    ExitCode::SUCCESS
}

async fn run_full_client(
    app_config: AppConfig,
    transcript: Vec<TranscriptEntry>,
) -> Result<(), eframe::Error> {
    // UI -> Room
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Room -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let identity = LocalIdentity {
        participant_id: app_config.viewer_id.clone(),
        display_name: app_config.display_name.clone(),
    };
    let client = RoomClient::new(
        event_tx,
        cmd_rx,
        identity,
        transcript,
        app_config.replay_interval(),
    );
    tokio::spawn(client.run());

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Chat UI started as {}", app_config.viewer_id);

            let state = AppState::new(viewer(&app_config), app_config.display_preferences());
            Ok(Box::new(ChatApp::new(
                cc,
                state,
                collaborators(&app_config),
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knocking_flags_override_config_both_ways() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().knocking_override();

        assert_eq!(parse(&["chat_bubble"]), None);
        assert_eq!(parse(&["chat_bubble", "--knocking"]), Some(true));
        assert_eq!(parse(&["chat_bubble", "--no-knocking"]), Some(false));
    }

    #[test]
    fn knocking_flags_conflict() {
        assert!(Cli::try_parse_from(["chat_bubble", "--knocking", "--no-knocking"]).is_err());
    }
}
