use axisview_common::ViewerConfig;
use axisview_input::PointerEvent;
use axisview_render::{DebugTextRenderer, Renderer};
use axisview_viewer::Viewer;
use clap::{Parser, Subcommand};
use glam::Vec2;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Frames to run before giving up on the camera settling.
const MAX_SETTLE_FRAMES: u64 = 10_000;

#[derive(Parser)]
#[command(name = "axisview-cli", about = "Headless tools for the axis viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON viewer config; defaults apply to anything it leaves out
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective config
    Info,
    /// Run one pointer gesture against a fresh viewer and print the result
    Simulate {
        /// Pointer-down position, `X,Y` in pixels
        #[arg(long, value_parser = parse_point)]
        down: Vec2,
        /// Intermediate pointer positions, in order
        #[arg(long = "move", value_parser = parse_point)]
        moves: Vec<Vec2>,
        /// Pointer-up position
        #[arg(long, value_parser = parse_point)]
        up: Vec2,
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
    },
    /// Print the toolbar grid for a viewport size
    Layout {
        #[arg(long, default_value = "1280")]
        width: u32,
        #[arg(long, default_value = "720")]
        height: u32,
    },
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

/// Replay a gesture, settle the camera, and dump the viewer state.
fn simulate(config: &ViewerConfig, width: u32, height: u32, gesture: &[PointerEvent]) -> String {
    let mut viewer = Viewer::new(config, width, height);
    for &event in gesture {
        let action = viewer.handle(event);
        tracing::debug!(?event, ?action, "pointer event");
    }
    let frames = viewer.settle(MAX_SETTLE_FRAMES);
    tracing::info!(frames, "camera settled");
    DebugTextRenderer::new().render(&viewer)
}

fn layout_report(config: &ViewerConfig, width: u32, height: u32) -> String {
    let mut viewer = Viewer::new(config, width, height);
    viewer.resize(width, height);
    let aspect = viewer.camera().aspect;
    let Some(toolbar) = viewer.toolbar() else {
        return format!("viewport {width}x{height}: no toolbar\n");
    };
    let l = &toolbar.layout;
    format!(
        "viewport {width}x{height} (aspect {aspect:.3})\n\
         grid: {} cols x {} rows, cell {:.3} x {:.3}\n\
         panel: {:.3} x {:.3} at ({:.3}, {:.3}, {:.3}) in camera space\n",
        l.cols,
        l.rows,
        l.cell_width,
        l.cell_height,
        l.panel_width,
        l.panel_height,
        l.position.x,
        l.position.y,
        l.position.z
    )
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ViewerConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("axisview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Simulate {
            down,
            moves,
            up,
            width,
            height,
        } => {
            let mut gesture = vec![PointerEvent::Down(down)];
            gesture.extend(moves.into_iter().map(PointerEvent::Move));
            gesture.push(PointerEvent::Up(up));
            print!("{}", simulate(&config, width, height, &gesture));
        }
        Commands::Layout { width, height } => {
            print!("{}", layout_report(&config, width, height));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("12,34.5").unwrap(), Vec2::new(12.0, 34.5));
        assert_eq!(parse_point(" 1 , 2 ").unwrap(), Vec2::new(1.0, 2.0));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn click_in_empty_space_stays_idle() {
        let out = simulate(
            &ViewerConfig::default(),
            800,
            600,
            &[
                PointerEvent::Down(Vec2::new(5.0, 5.0)),
                PointerEvent::Up(Vec2::new(5.0, 5.0)),
            ],
        );
        assert!(out.contains("state=Idle"));
        assert!(out.contains("moving=false"));
    }

    #[test]
    fn drag_gesture_is_not_a_click() {
        let out = simulate(
            &ViewerConfig::default(),
            800,
            600,
            &[
                PointerEvent::Down(Vec2::new(100.0, 100.0)),
                PointerEvent::Move(Vec2::new(200.0, 120.0)),
                PointerEvent::Up(Vec2::new(200.0, 120.0)),
            ],
        );
        assert!(out.contains("state=Idle"));
        assert!(out.contains("[Y] visible=true"));
    }

    #[test]
    fn layout_for_wide_window() {
        let out = layout_report(&ViewerConfig::default(), 1600, 900);
        assert!(out.contains("17 cols x 2 rows"));
        assert!(out.contains("cell 0.375 x 0.375"));
    }

    #[test]
    fn cli_accepts_repeated_moves() {
        let cli = Cli::try_parse_from([
            "axisview-cli",
            "simulate",
            "--down",
            "1,1",
            "--move",
            "2,2",
            "--move",
            "3,3",
            "--up",
            "3,3",
        ])
        .unwrap();
        let Commands::Simulate { moves, width, .. } = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(moves.len(), 2);
        assert_eq!(width, 800);
    }
}
