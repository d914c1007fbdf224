use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use marker_hover::config::load_config;
use marker_hover::replay::{Replay, Scene, parse_script};

/// Replay hover notifications against a scene and print the tooltip state
#[derive(Parser, Debug)]
#[command(name = "marker-hover")]
#[command(version)]
#[command(about = "Replay map marker hover scripts and report the tooltip after each step")]
struct Args {
    /// Scene file (JSON) with viewport, markers and journal entries
    scene: PathBuf,

    /// Script of host notifications, one per line
    script: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the rendered overlay HTML after each step where it is visible
    #[arg(long)]
    html: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let scene = Scene::from_path(&args.scene)?;
    let script = std::fs::read_to_string(&args.script)?;
    let steps = parse_script(&script)?;
    log::debug!("Replaying {} steps from {}", steps.len(), args.script.display());

    let mut replay = Replay::new(scene, config.tooltip);
    for step in &steps {
        replay.apply(step).await?;
        let report = replay.report(step);
        println!("{}", report);
        if args.html && report.title.is_some() {
            println!("{}", report.html);
        }
    }

    Ok(())
}
