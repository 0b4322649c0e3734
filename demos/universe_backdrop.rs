//! Universe backdrop
//!
//! Opens a transparent, full-screen window beneath all other windows and
//! fills it with a slowly rotating cloud of neon green stars that tilts
//! toward the mouse pointer.
//!
//! Set `RUST_LOG=debug` for resize and upload logging.

use anyhow::Result;
use clap::Parser;
use starfield_core::BackdropConfig;
use starfield_gpu::RenderConfig;
use starfield_visualization::{BackdropViewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "universe_backdrop", about = "Animated particle backdrop", version)]
struct Args {
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Run in a normal decorated window instead of a fullscreen backdrop
    #[arg(long)]
    windowed: bool,

    /// Window width in logical pixels when windowed
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Window height in logical pixels when windowed
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Seed for a reproducible star layout
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let viewer = ViewerConfig {
        title: "Universe".to_string(),
        fullscreen: !args.windowed,
        width: args.width,
        height: args.height,
        always_on_bottom: !args.windowed,
        frame_limit: args.frames,
        ..Default::default()
    };
    let backdrop = BackdropConfig {
        seed: args.seed,
        ..Default::default()
    };

    BackdropViewer::with_configs(viewer, backdrop, RenderConfig::default()).run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["universe_backdrop", "--frames", "120", "--windowed", "--seed", "7"]);
        assert_eq!(args.frames, Some(120));
        assert!(args.windowed);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.width, 1280.0);
    }

    #[test]
    fn test_args_default_to_backdrop() {
        let args = Args::parse_from(["universe_backdrop"]);
        assert!(!args.windowed);
        assert_eq!(args.frames, None);
    }
}
