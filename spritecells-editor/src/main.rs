use anyhow::Context;
use clap::{Parser, Subcommand};
use kurbo::Size;
use log::info;
use spritecells_core::export;
use spritecells_core::file_io::JsonFileStore;
use spritecells_core::renderer::FrameLog;
use spritecells_core::session::EditorSession;
use std::path::{Path, PathBuf};

mod config;
use config::AppConfig;

mod script;

/// SpriteCells - sprite sheet cell editor (headless frontend)
#[derive(Parser, Debug)]
#[command(name = "spritecells")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the undo history capacity
    #[arg(long, global = true)]
    history_capacity: Option<usize>,

    /// Override the minimum on-screen size of a new cell, in pixels
    #[arg(long, global = true)]
    min_cell_size: Option<f64>,

    /// Override the zoom step used by the +/- keys
    #[arg(long, global = true)]
    zoom_step: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a session file
    Info {
        session: PathBuf,
    },
    /// Print the cell rectangles of a session as JSON
    Export {
        session: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: f64,

        /// Image height in pixels
        #[arg(long)]
        height: f64,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Apply a scripted list of input events to a session and save it
    Replay {
        session: PathBuf,

        script: PathBuf,

        #[arg(long, default_value_t = 1024.0)]
        width: f64,

        #[arg(long, default_value_t = 1024.0)]
        height: f64,

        /// Print the draw calls of the final frame
        #[arg(long)]
        dry_run: bool,
    },
    /// List recently used session files
    Recent,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut app_config = AppConfig::load(args.config.as_deref());
    if let Some(capacity) = args.history_capacity {
        app_config.editor.history_capacity = capacity;
    }
    if let Some(size) = args.min_cell_size {
        app_config.editor.min_cell_size = size;
    }
    if let Some(step) = args.zoom_step {
        app_config.editor.zoom_step = step;
    }
    app_config.editor.validate().context("invalid command-line override")?;

    match &args.command {
        Command::Info { session } => {
            let session = open_session(session, Size::ZERO, &app_config);
            let t = session.transform();
            match session.mode() {
                Some(mode) => println!("mode:      {} ({})", mode.display_name(), mode),
                None => println!("mode:      none"),
            }
            println!("cells:     {}", session.document().len());
            println!("offset:    ({}, {})", t.offset_x, t.offset_y);
            println!("scale:     {}", t.scale);
            for cell in &session.document().cells {
                println!(
                    "  {:<10} top={} left={} right={} bottom={}",
                    cell.label, cell.top, cell.left, cell.right, cell.bottom
                );
            }
        }
        Command::Export {
            session,
            width,
            height,
            output,
        } => {
            let session = open_session(session, Size::new(*width, *height), &app_config);
            let json = export::to_json(&session.export())?;
            match output {
                Some(path) => {
                    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!("exported {} cell(s) to {}", session.document().len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Replay {
            session: path,
            script: script_path,
            width,
            height,
            dry_run,
        } => {
            let events = script::load(script_path)?;
            let mut session = open_session(path, Size::new(*width, *height), &app_config);
            script::replay(&mut session, &events);
            info!("replayed {} event(s)", events.len());

            if *dry_run {
                let mut frame = FrameLog::new();
                session.render(&mut frame);
                for command in &frame.commands {
                    println!("{:?}", command);
                }
            } else {
                let mut store = JsonFileStore::new(path);
                session
                    .save_to(&mut store)
                    .with_context(|| format!("saving {}", path.display()))?;
                app_config.add_recent_session(path);
                app_config.save(args.config.as_deref());
            }
        }
        Command::Recent => {
            for path in app_config.recent_sessions() {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// Load a session file; missing or unreadable files give an empty session
fn open_session(path: &Path, image_size: Size, app_config: &AppConfig) -> EditorSession {
    let mut session = EditorSession::new(image_size, app_config.editor.clone());
    session.load_from(&mut JsonFileStore::new(path));
    session
}
