use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mosaic_wm::common::config::{Config, Settings, config_file, parse_layout_id};
use mosaic_wm::common::log;
use mosaic_wm::layout_engine::{Engine, LayoutEvent, LayoutId, WindowsLayout, WindowsLayoutKind};
use mosaic_wm::model::WindowState;
use mosaic_wm::sys::geometry::Rect;
use mosaic_wm::sys::headless::{HeadlessController, HeadlessWindow};
use mosaic_wm::sys::screen::{Surface, SurfaceId};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Parser)]
struct Cli {
    /// Path to configuration file to use (overrides default).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Check the configuration and exit.
    #[arg(long)]
    validate: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available layouts.
    Layouts,
    /// Arrange a number of windows on an empty screen and print the result.
    Preview {
        #[arg(long, value_parser = parse_layout_id)]
        layout: Option<LayoutId>,
        #[arg(long, default_value_t = 3)]
        windows: u64,
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
    },
}

#[derive(Serialize)]
struct PreviewWindow {
    id: u64,
    state: WindowState,
    geometry: Rect,
}

fn main() {
    let opt = Cli::parse();
    log::init_logging();

    if let Err(e) = run(opt) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn run(opt: Cli) -> anyhow::Result<()> {
    let config_path = opt.config.clone().unwrap_or_else(config_file);
    let config = if config_path.exists() {
        Config::read(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?
    } else {
        info!("no config at {}, using defaults", config_path.display());
        Config::default()
    };

    if opt.validate {
        let issues = config.validate();
        if issues.is_empty() {
            println!("Config validation passed");
            return Ok(());
        }
        for issue in issues {
            eprintln!("{issue}");
        }
        process::exit(1);
    }

    match opt.command {
        Some(Commands::Layouts) => {
            for id in LayoutId::iter() {
                let layout = WindowsLayoutKind::new(id, &config.settings);
                println!("{id:<14} {}", layout.name());
            }
        }
        Some(Commands::Preview { layout, windows, width, height }) => {
            let mut settings = config.settings;
            if let Some(layout) = layout {
                settings.layout.order = vec![layout];
            }
            let preview = preview(settings, windows, Rect::new(0.0, 0.0, width, height));
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        None => {
            let preview = preview(config.settings, 3, Rect::new(0.0, 0.0, 1920.0, 1080.0));
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
    }
    Ok(())
}

fn preview(settings: Settings, count: u64, area: Rect) -> Vec<PreviewWindow> {
    let surface = Surface::new(SurfaceId::default(), area);
    let mut engine = Engine::new(HeadlessController::new(vec![surface.clone()]), settings);

    // Where windows open before the first arrange; floating ones stay there.
    let start = Rect::new(
        area.x + area.width / 4.0,
        area.y + area.height / 4.0,
        area.width / 2.0,
        area.height / 2.0,
    );
    let handles: Vec<HeadlessWindow> = (1..=count)
        .map(|id| {
            let handle = HeadlessWindow::new(id, &surface, start);
            engine.handle_event(LayoutEvent::WindowAdded(handle.boxed()));
            handle
        })
        .collect();
    engine.arrange();

    handles
        .iter()
        .map(|handle| {
            let id = handle.snapshot().id;
            PreviewWindow {
                id: id.get(),
                state: engine.windows().get(id).map_or(WindowState::Unmanaged, |w| w.state()),
                geometry: handle.geometry(),
            }
        })
        .collect()
}
