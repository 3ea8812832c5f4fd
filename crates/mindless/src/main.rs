mod cli;
mod logging;
mod logo;
mod render;
mod splash;

use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mindless_config::Config;
use mindless_core::{CellMetrics, Presence};
use mindless_effects::{FrameScheduler, PixelBuffer};
use ratatui::{DefaultTerminal, Frame};

use crate::cli::Cli;
use crate::splash::Splash;

/// How long to wait for input before drawing the next frame (~60 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.load_config()?;
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    logging::init(config.log_file.as_deref())?;
    let logo = logo::load_logo(config.logo.as_deref());

    let terminal = ratatui::init();
    let result = App::new(config, logo).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    metrics: CellMetrics,
    /// Logo handed to the splash when it mounts.
    logo: PixelBuffer,
    scheduler: FrameScheduler,
    /// The mounted splash, `None` once it has been unmounted.
    splash: Option<Splash>,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, logo: PixelBuffer) -> Self {
        Self {
            running: false,
            metrics: config.cell_metrics(),
            config,
            logo,
            scheduler: FrameScheduler::new(),
            splash: None,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let viewport = self.metrics.viewport(size.width, size.height);
        self.splash = Some(Splash::mount(
            &self.scheduler,
            viewport,
            &self.config,
            std::mem::take(&mut self.logo),
            self.elapsed(),
        ));

        self.running = true;
        while self.running {
            let now = self.elapsed();
            self.scheduler.dispatch_frame(now);
            self.update(now);
            terminal.draw(|frame| self.render(frame, now))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Apply the auto-dismiss timer and unmount the splash once its exit has
    /// played.
    fn update(&mut self, now: Duration) {
        let Some(splash) = self.splash.as_mut() else {
            self.running = false;
            return;
        };
        if let Some(after) = self.config.dismiss_after() {
            if now >= after {
                splash.set_loading(false, now);
            }
        }
        if splash.presence(now) == Presence::Gone {
            self.splash = None;
            self.running = false;
        }
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame, now: Duration) {
        if let Some(splash) = &self.splash {
            let canvas = splash.compose();
            render::render_canvas(frame, &canvas, splash.opacity(now), splash.offset_y(now));
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a frame-length timeout so animations keep running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.dismiss(),
            _ => {}
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        let viewport = self.metrics.viewport(cols, rows);
        tracing::debug!(cols, rows, "terminal resized");
        self.scheduler.dispatch_resize(viewport);
    }

    /// First press plays the exit transition, a second one quits at once.
    fn dismiss(&mut self) {
        let now = self.elapsed();
        if let Some(splash) = self.splash.as_mut().filter(|s| s.is_loading()) {
            splash.set_loading(false, now);
        } else {
            self.quit();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
