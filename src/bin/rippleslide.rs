use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rippleslide::{FsLoader, Slideshow, SlideshowConfig, SlideshowEvent};

#[derive(Parser, Debug)]
#[command(name = "rippleslide", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a slideshow config and print a summary.
    Inspect(InspectArgs),
    /// Run the engine headless and log every transition.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input slideshow config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input slideshow config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of slide_next transitions to run.
    #[arg(long, default_value_t = 4)]
    transitions: u32,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Decode the slide images from disk instead of running image-less.
    #[arg(long)]
    load_images: bool,

    /// Write the final scene snapshot as JSON.
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<SlideshowConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: SlideshowConfig =
        serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(config)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let config = read_config(&args.in_path)?;
    config.validate()?;
    println!(
        "{} slides, stage {}x{}, autoplay {} ({} x {} u/s), wacky {}",
        config.slides.len(),
        config.stage_width,
        config.stage_height,
        if config.auto_play { "on" } else { "off" },
        config.auto_play_speed.x,
        config.auto_play_speed.y,
        if config.wacky { "on" } else { "off" },
    );
    println!(
        "displacement '{}': peak ({}, {}), settle ({}, {})",
        config.displacement_image,
        config.displace_scale.x,
        config.displace_scale.y,
        config.displace_scale_to.x,
        config.displace_scale_to.y,
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = read_config(&args.in_path)?;
    let mut show = Slideshow::new(config)?;

    if args.load_images {
        show.load_slides(&mut FsLoader);
        let ready = show.deck().iter().filter(|s| s.is_ready()).count();
        println!("decoded {}/{} slides", ready, show.len());
    }

    let dt = 1.0 / f64::from(args.fps.max(1));
    for _ in 0..args.transitions {
        if !show.slide_next() {
            anyhow::bail!("slide_next rejected while idle");
        }
        // Drive frames until the transition commits.
        loop {
            let events = show.tick(dt);
            let mut committed = false;
            for event in events {
                match event {
                    SlideshowEvent::TransitionStarted { from, to } => {
                        println!("transition {from} -> {to}");
                    }
                    SlideshowEvent::SlideChanged { index } => {
                        println!("now showing slide {index}");
                        committed = true;
                    }
                }
            }
            if committed {
                break;
            }
        }
    }

    println!(
        "finished at slide {} after {} transitions",
        show.current_index(),
        args.transitions
    );

    if let Some(out) = args.dump_scene {
        let json = serde_json::to_string_pretty(&show.scene())?;
        std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
        println!("scene snapshot written to {}", out.display());
    }

    Ok(())
}
