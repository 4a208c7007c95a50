//! Terminal weather animation
//!
//! Animates the current weather full-screen: a synthetic condition, a JSON weather
//! file that is re-read periodically, or one of the stand-alone scenes.
//!
//! Keys: `+`/`-` intensity, `←`/`→` wind, `l` lightning, `r` reset snow and
//! refetch, `q` or `Esc` quit.

mod render;
mod weather_file;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::{DefaultTerminal, Frame};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use weather_fx_core::{
    compose, CachedProvider, Control, Effect, GridBuffer, Scene, StaticProvider, Surface,
    WeatherCondition, WeatherData, WeatherProvider,
};
use weather_file::JsonFileProvider;

#[derive(Parser, Debug)]
#[command(name = "weather-fx")]
#[command(about = "Weather particle effects for the terminal", long_about = None)]
struct Args {
    /// Weather condition to animate (clear, partly-cloudy, cloudy, fog, drizzle,
    /// rain, heavy-rain, freezing-rain, snow, heavy-snow, thunderstorm)
    #[arg(short, long, conflicts_with_all = ["scene", "weather_file"])]
    condition: Option<String>,

    /// Stand-alone scene with adjustable controls (rain, snow, storm)
    #[arg(short, long, conflicts_with = "weather_file")]
    scene: Option<String>,

    /// JSON weather record, re-read every refresh interval
    #[arg(short, long)]
    weather_file: Option<PathBuf>,

    /// Wind speed in mph for a synthetic condition
    #[arg(long)]
    wind_speed: Option<f32>,

    /// Wind direction in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 180.0)]
    wind_direction: f32,

    /// Render the night variant of a synthetic condition
    #[arg(long)]
    night: bool,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Random seed (random when omitted, always logged)
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds between weather refreshes
    #[arg(long, default_value_t = 300)]
    refresh_secs: u64,

    /// Write logs to this file (the terminal is owned by the animation)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Where the animation comes from
enum Source {
    Scene(Scene),
    Weather(CachedProvider<Box<dyn WeatherProvider>>),
}

impl Source {
    fn from_args(args: &Args) -> Result<Self, String> {
        if let Some(name) = &args.scene {
            return Scene::from_name(name)
                .map(Source::Scene)
                .ok_or_else(|| format!("unknown scene '{name}'"));
        }

        let provider: Box<dyn WeatherProvider> = if let Some(path) = &args.weather_file {
            let provider = JsonFileProvider::new(path);
            info!(path = %provider.path().display(), "Reading weather file");
            Box::new(provider)
        } else {
            let name = args.condition.as_deref().unwrap_or("rain");
            let condition = WeatherCondition::from_name(name)
                .ok_or_else(|| format!("unknown condition '{name}'"))?;
            let mut weather = WeatherData::preset(condition).with_daylight(!args.night);
            if let Some(speed) = args.wind_speed {
                weather = weather.with_wind(speed, args.wind_direction);
            }
            Box::new(StaticProvider::new(weather))
        };
        Ok(Source::Weather(CachedProvider::with_ttl(
            provider,
            Duration::from_secs(args.refresh_secs),
        )))
    }
}

struct App {
    source: Source,
    weather: Option<WeatherData>,
    effect: Box<dyn Effect>,
    screen: GridBuffer,
    rng: StdRng,
    refresh_every: Duration,
    next_refresh: Instant,
}

impl App {
    fn new(
        mut source: Source,
        width: u16,
        height: u16,
        mut rng: StdRng,
        refresh_every: Duration,
    ) -> Result<Self, String> {
        let (weather, effect) = match &mut source {
            Source::Scene(scene) => (None, scene.build(width, height)),
            Source::Weather(provider) => {
                let weather = provider
                    .fetch()
                    .ok_or_else(|| "could not fetch weather data".to_string())?;
                let effect = compose(&weather, width, height, &mut rng);
                (Some(weather), effect)
            }
        };
        Ok(Self {
            source,
            weather,
            effect,
            screen: GridBuffer::new(width, height),
            rng,
            refresh_every,
            next_refresh: Instant::now() + refresh_every,
        })
    }

    /// Handle a key press, returning `false` when the user asked to quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char('r' | 'R') => {
                self.effect.apply(Control::ClearAccumulation);
                self.refresh_now(Instant::now());
            }
            code => {
                if let Some(control) = control_for(code) {
                    let applied = self.effect.apply(control);
                    debug!(?control, applied, effect = self.effect.name(), "Control");
                }
            }
        }
        true
    }

    fn refresh_now(&mut self, now: Instant) {
        self.next_refresh = now + self.refresh_every;
        if let Source::Weather(provider) = &mut self.source {
            if let Some(weather) = provider.refresh_at(now) {
                self.recompose(weather);
            }
        }
    }

    fn refresh_if_due(&mut self, now: Instant) {
        if now < self.next_refresh {
            return;
        }
        self.next_refresh = now + self.refresh_every;
        if let Source::Weather(provider) = &mut self.source {
            if let Some(weather) = provider.fetch_at(now) {
                self.adopt(weather);
            }
        }
    }

    /// Take a new record, rebuilding the effect only when the condition changed
    fn adopt(&mut self, weather: WeatherData) {
        if matches!(&self.weather, Some(current) if current.condition == weather.condition) {
            self.weather = Some(weather);
        } else {
            info!(condition = %weather.condition, "Weather changed, recomposing");
            self.recompose(weather);
        }
    }

    /// Rebuild the effect from `weather` unconditionally
    fn recompose(&mut self, weather: WeatherData) {
        self.effect = compose(
            &weather,
            self.screen.width(),
            self.screen.height(),
            &mut self.rng,
        );
        self.weather = Some(weather);
    }

    fn tick(&mut self, width: u16, height: u16) {
        if (self.screen.width(), self.screen.height()) != (width, height) {
            debug!(width, height, "Terminal resized");
            self.screen.resize(width, height);
        }
        self.effect.update(width, height, &mut self.rng);
        self.effect.draw(&mut self.screen, &mut self.rng);
    }

    fn status_text(&self) -> String {
        match &self.weather {
            Some(weather) => weather.summary(),
            None => format!(" {} ", self.effect.status()),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(render::GridView::new(&self.screen), area);
        let bar = Rect {
            height: area.height.min(1),
            ..area
        };
        frame.render_widget(
            render::status_bar(&self.status_text(), hints(self.effect.name())),
            bar,
        );
    }
}

fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Char('+' | '=') => Some(Control::MoreIntensity),
        KeyCode::Char('-' | '_') => Some(Control::LessIntensity),
        KeyCode::Left => Some(Control::WindLeft),
        KeyCode::Right => Some(Control::WindRight),
        KeyCode::Char('l' | 'L') => Some(Control::Strike),
        _ => None,
    }
}

fn hints(effect: &str) -> &'static str {
    match effect {
        "rain" => "[+/-] intensity  [Q] quit ",
        "snow" => "[+/-] intensity  [←/→] wind  [R] reset  [Q] quit ",
        "storm" => "[+/-] intensity  [L] lightning  [Q] quit ",
        _ => "[R] refresh  [Q] quit ",
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(terminal: &mut DefaultTerminal, app: &mut App, frame_time: Duration) -> io::Result<()> {
    loop {
        let started = Instant::now();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        app.refresh_if_due(started);
        let size = terminal.size()?;
        app.tick(size.width, size.height);
        terminal.draw(|frame| app.render(frame))?;

        if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("error: cannot open log file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, fps = args.fps, "Starting weather-fx");

    let (width, height) = match ratatui::crossterm::terminal::size() {
        Ok(size) => size,
        Err(e) => {
            eprintln!("error: cannot query terminal size: {e}");
            return ExitCode::FAILURE;
        }
    };
    let app = Source::from_args(&args).and_then(|source| {
        App::new(
            source,
            width,
            height,
            StdRng::seed_from_u64(seed),
            Duration::from_secs(args.refresh_secs),
        )
    });
    let mut app = match app {
        Ok(app) => app,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let frame_time = Duration::from_secs(1) / args.fps.max(1);
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app, frame_time);
    ratatui::restore();

    match result {
        Ok(()) => {
            info!("Exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Terminal error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
