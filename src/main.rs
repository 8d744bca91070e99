use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use positioning::events::Event;
use positioning::item::PositionableItem;
use positioning::scene::{Replay, Scene, SceneError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "positioning", about = "Replay a positioning scene and print the emitted events")]
struct Cli {
    /// Scene file: constraints, items, and the steps to replay.
    scene: PathBuf,

    /// Undo history capacity; overrides the scene's `history_size`.
    #[arg(long, env = "POSITIONING_HISTORY_SIZE")]
    history_size: Option<usize>,

    /// Pretty-print each JSON record instead of one record per line.
    #[arg(long)]
    pretty: bool,
}

/// One line of output.
#[derive(Serialize)]
#[serde(tag = "record", rename_all = "camelCase")]
enum Record<'a> {
    Event(&'a Event),
    Rejected { step: usize },
    Item(&'a PositionableItem),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let scene = Scene::load(&cli.scene)?;
    tracing::info!(path = %cli.scene.display(), steps = scene.steps.len(), "loaded scene");

    let replay = scene.replay(cli.history_size)?;
    print_replay(&replay, cli.pretty)
}

fn print_replay(replay: &Replay, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let records = replay
        .events
        .iter()
        .map(Record::Event)
        .chain(replay.rejected_steps.iter().map(|&step| Record::Rejected { step }))
        .chain(replay.items.iter().map(Record::Item));
    for record in records {
        let rendered = if pretty { serde_json::to_string_pretty(&record)? } else { serde_json::to_string(&record)? };
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}
