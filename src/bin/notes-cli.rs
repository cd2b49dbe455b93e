// SPDX-License-Identifier: MPL-2.0

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use notes_store::{Config, NoteColor, NoteStore, SessionRegistry};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
struct Args {
    /// Notes directory (defaults to the per-user data dir)
    #[arg(short, long, value_name = "DIR", global = true)]
    dir: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List saved notes, newest first
    List,

    /// Print a saved note's full text
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: Uuid,
    },

    /// Create and save a new note
    New {
        /// Note text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Color tag (light yellow when omitted)
        #[arg(short, long, value_enum)]
        color: Option<ColorArg>,
    },

    /// Update a saved note's text and/or color tag
    Edit {
        #[arg(value_name = "NOTE_ID")]
        note_id: Uuid,

        /// Replacement text
        #[arg(short, long)]
        text: Option<String>,

        /// Replacement color tag
        #[arg(short, long, value_enum)]
        color: Option<ColorArg>,
    },

    /// Remove a saved note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: Uuid,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ColorArg {
    LightGreen,
    LightYellow,
    LightRed,
}

impl From<ColorArg> for NoteColor {
    fn from(value: ColorArg) -> Self {
        match value {
            ColorArg::LightGreen => NoteColor::LightGreen,
            ColorArg::LightYellow => NoteColor::LightYellow,
            ColorArg::LightRed => NoteColor::LightRed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("notes_store={filter}").parse()?),
        )
        .init();

    let notes_dir = args.dir.unwrap_or_else(|| Config::default().notes_dir);
    let store = NoteStore::try_open(notes_dir)
        .await
        .context("opening notes directory")?;
    let registry = SessionRegistry::new();

    match args.command {
        Command::List => {
            let notes = store.try_list().await?;
            if notes.is_empty() {
                println!("No saved notes in {}", store.get_root().display());
            }
            for (id, stored) in notes {
                let note = stored.get_note();
                println!(
                    "{id}  {}  {:<12}  {}",
                    stored.get_modified().format("%Y-%m-%d %H:%M"),
                    note.get_color().as_str(),
                    note.get_title()
                );
            }
        }

        Command::Show { note_id } => {
            let note = store.handle(note_id).try_load().await?;
            println!("{}", note.get_text());
        }

        Command::New { text, color } => {
            let (id, handle) = store.new_handle();
            let mut session = registry.open_session(handle);
            session.set_text(text);
            if let Some(color) = color {
                session.set_color(color.into());
            }
            session.try_save().await.context("saving new note")?;
            println!("{id}");
        }

        Command::Edit {
            note_id,
            text,
            color,
        } => {
            let handle = store.handle(note_id);
            let note = handle.try_load().await?;
            let mut session = registry.open_session_with(handle, note);
            if let Some(text) = text {
                session.set_text(text);
            }
            if let Some(color) = color {
                session.set_color(color.into());
            }
            if session.is_changed() {
                session.try_close().await.context("saving edited note")?;
                println!("Updated {note_id}");
            } else {
                println!("Nothing to change for {note_id}");
            }
        }

        Command::Delete { note_id } => {
            store.handle(note_id).try_delete().await?;
            println!("Deleted {note_id}");
        }
    }

    Ok(())
}
