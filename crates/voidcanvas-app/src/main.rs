//! Command-line entry point: replay a script and export the canvas.

use clap::Parser;
use std::path::PathBuf;
use voidcanvas_app::{App, AppConfig, AppError, DEFAULT_EXPORT_NAME, Script, ShortcutRegistry};

#[derive(Debug, Parser)]
#[command(name = "voidcanvas", version, about = "Freehand drawing and text annotation canvas")]
struct Cli {
    /// JSON event script to replay.
    script: Option<PathBuf>,

    /// Canvas settings (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// TrueType/OpenType font for text.
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Where to write the exported PNG.
    #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
    output: PathBuf,

    /// Print the text editing keys and exit.
    #[arg(long)]
    list_keys: bool,
}

fn run(cli: Cli) -> Result<(), AppError> {
    let canvas = match &cli.config {
        Some(path) => AppConfig::load_canvas_config(path)?,
        None => Default::default(),
    };

    if cli.list_keys {
        ShortcutRegistry::print_all(canvas.text.enter_behavior);
        return Ok(());
    }

    let mut app = App::new(AppConfig {
        width: cli.width,
        height: cli.height,
        canvas,
        font_path: cli.font,
    })?;

    if let Some(path) = &cli.script {
        let json = std::fs::read_to_string(path)?;
        let script = Script::from_json(&json)?;
        app.run_script(&script)?;
    }

    app.save_png(&cli.output)
}

fn main() {
    env_logger::init();
    log::info!("Starting VoidCanvas");

    if let Err(e) = run(Cli::parse()) {
        log::error!("{}", e);
        eprintln!("voidcanvas: {}", e);
        std::process::exit(1);
    }
}
