//! Headless weather effect runner
//!
//! Steps an effect for a fixed number of frames on an in-memory grid and prints
//! the result as plain text. Useful for checking a seed or condition without a
//! terminal, and for diffing frames between runs.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weather_fx_core::{
    compose, Effect, GridBuffer, Scene, Surface, WeatherCondition, WeatherData,
};

/// Run a weather effect without a terminal and print its frames
#[derive(Parser, Debug)]
#[command(name = "weather-fx-headless")]
#[command(about = "Render weather effects to plain text", long_about = None)]
struct Args {
    /// Weather condition (clear, partly-cloudy, cloudy, fog, drizzle, rain,
    /// heavy-rain, freezing-rain, snow, heavy-snow, thunderstorm)
    #[arg(short, long, default_value = "rain")]
    condition: String,

    /// Stand-alone scene instead of a condition (rain, snow, storm)
    #[arg(short, long)]
    scene: Option<String>,

    /// Grid width in cells
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 100)]
    frames: u32,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Wind speed in mph
    #[arg(long)]
    wind_speed: Option<f32>,

    /// Wind direction in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 180.0)]
    wind_direction: f32,

    /// Render the night variant
    #[arg(long)]
    night: bool,

    /// Also print every Nth frame along the way (0 = final frame only)
    #[arg(short, long, default_value_t = 0)]
    print_every: u32,
}

fn build_effect(args: &Args, rng: &mut StdRng) -> Result<Box<dyn Effect>, String> {
    if let Some(name) = &args.scene {
        let scene = Scene::from_name(name).ok_or_else(|| format!("unknown scene '{name}'"))?;
        info!(scene = scene.name(), "Running scene");
        return Ok(scene.build(args.width, args.height));
    }

    let condition = WeatherCondition::from_name(&args.condition)
        .ok_or_else(|| format!("unknown condition '{}'", args.condition))?;
    let mut weather = WeatherData::preset(condition)
        .with_daylight(!args.night)
        .with_location("Headless");
    if let Some(speed) = args.wind_speed {
        weather = weather.with_wind(speed, args.wind_direction);
    }
    info!(summary = %weather.summary(), "Running condition");
    Ok(compose(&weather, args.width, args.height, rng))
}

fn print_frame(frame: u32, effect: &dyn Effect, screen: &GridBuffer) {
    println!("--- frame {frame} │ {} ---", effect.status());
    println!("{}", screen.to_text());
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    info!(seed = args.seed, width = args.width, height = args.height, "Starting");

    let mut effect = match build_effect(&args, &mut rng) {
        Ok(effect) => effect,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mut screen = GridBuffer::new(args.width, args.height);
    if screen.width() == 0 || screen.height() == 0 {
        warn!("Empty grid, nothing will be drawn");
    }

    let mut until_print = args.print_every;
    for frame in 1..=args.frames {
        effect.update(args.width, args.height, &mut rng);
        effect.draw(&mut screen, &mut rng);

        if args.print_every > 0 && frame < args.frames {
            until_print -= 1;
            if until_print == 0 {
                print_frame(frame, effect.as_ref(), &screen);
                until_print = args.print_every;
            }
        }
    }

    print_frame(args.frames, effect.as_ref(), &screen);
    info!(
        effect = effect.name(),
        frames = args.frames,
        particles = effect.particle_count(),
        "Finished"
    );
    ExitCode::SUCCESS
}
