// SPDX-License-Identifier: MPL-2.0
//! Demo application hosting one infinite grid.
//!
//! The `App` owns the [`ViewTransform`] and the line sets drawn from it.
//! Gestures from the overlay are applied in `update`, which is also the only
//! place the major grid (and its spacing correction) is regenerated; `view`
//! just borrows the cached segments.

mod message;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::grid::{GridSettings, LineSegment, ViewTransform};
use crate::paths;
use crate::ui::grid_overlay::{self, Gesture};
use iced::{window, Element, Task};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 320;
pub const MIN_WINDOW_HEIGHT: u32 = 240;

/// Root iced application state.
pub struct App {
    transform: ViewTransform,
    major: Vec<LineSegment>,
    minor: Vec<LineSegment>,
    show_minor_grid: bool,
    wheel_zoom_factor: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("transform", &self.transform)
            .field("major_lines", &self.major.len())
            .field("minor_lines", &self.minor.len())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir);

        let (config, warning) = config::load();
        if let Some(key) = warning {
            log::warn!("using default configuration ({key})");
        }

        (Self::from_config(&config), Task::none())
    }

    /// Builds the application state from a loaded configuration.
    ///
    /// Invalid grid settings are logged and replaced by the defaults.
    pub fn from_config(config: &Config) -> Self {
        let settings = config.grid.to_settings().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to default grid settings");
            GridSettings::default()
        });

        let mut app = Self {
            transform: ViewTransform::new(settings),
            major: Vec::new(),
            minor: Vec::new(),
            show_minor_grid: config.display.show_minor_grid(),
            wheel_zoom_factor: config.display.wheel_zoom_factor(),
        };
        app.refresh_lines();
        app
    }

    #[must_use]
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    #[must_use]
    pub fn major_lines(&self) -> &[LineSegment] {
        &self.major
    }

    #[must_use]
    pub fn minor_lines(&self) -> &[LineSegment] {
        &self.minor
    }

    pub fn title(&self) -> String {
        format!("Infinite Grid - {:.0}%", self.transform.scale() * 100.0)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Grid(gesture) => self.apply(gesture),
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        grid_overlay::view(
            &self.major,
            &self.minor,
            self.transform.viewport(),
            self.wheel_zoom_factor,
        )
        .map(Message::Grid)
    }

    fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Pan(delta) => self.transform.pan(delta),
            Gesture::Zoom { multiplier, anchor } => self.transform.zoom_at(multiplier, anchor),
            Gesture::Resize(size) => self.transform.resize(size),
        }
        self.refresh_lines();
    }

    /// Regenerates both line sets. The major grid goes first because its
    /// spacing correction can change the scale the minor grid derives from.
    fn refresh_lines(&mut self) {
        self.major = self.transform.major_grid_lines().collect();
        self.minor = if self.show_minor_grid {
            self.transform.minor_grid_lines().collect()
        } else {
            Vec::new()
        };
    }
}
