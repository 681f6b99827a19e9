use crate::error::ConfigError;
use crate::palette::{Palette, Rgb, PRESETS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use world_grid::{EdgePolicy, GridSize};

pub const DEFAULT_FADE_TICKS: u32 = 1;
pub const DEFAULT_INITIAL_DENSITY: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

impl Appearance {
    pub fn background(self) -> Rgb {
        match self {
            Appearance::Dark => [0x00, 0x00, 0x00],
            Appearance::Light => [0xff, 0xff, 0xff],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquareSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl SquareSize {
    pub fn pixels(self) -> u32 {
        match self {
            SquareSize::Small => 10,
            SquareSize::Medium => 20,
            SquareSize::Large => 40,
            SquareSize::Huge => 80,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    Hyper,
}

impl AnimationSpeed {
    pub fn tick_interval(self) -> Duration {
        match self {
            AnimationSpeed::Slow => Duration::from_millis(1000),
            AnimationSpeed::Normal => Duration::from_millis(500),
            AnimationSpeed::Fast => Duration::from_millis(250),
            AnimationSpeed::Hyper => Duration::from_millis(100),
        }
    }
}

/// Everything the engine reads from configuration. Fixed for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigSnapshot {
    pub square_size: u32,
    pub tick_interval: Duration,
    pub palette: Palette,
    pub background: Rgb,
    pub death_fade: bool,
    pub shifting_colors: bool,
    pub random_color_preset: bool,
    /// Ticks a dying cell takes to fade fully into the background.
    pub fade_ticks: u32,
    pub edge_policy: EdgePolicy,
    /// Chance that each cell starts alive when seeding randomly.
    pub initial_density: f64,
}

impl ConfigSnapshot {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.square_size == 0 {
            return Err(ConfigError::ZeroSquareSize);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.fade_ticks == 0 {
            return Err(ConfigError::ZeroFadeTicks);
        }
        if !(0.0..=1.0).contains(&self.initial_density) {
            return Err(ConfigError::InvalidDensity(self.initial_density));
        }
        Ok(())
    }

    /// Grid dimensions for a display area in pixels.
    pub fn grid_size(&self, area_width: u32, area_height: u32) -> Result<GridSize, ConfigError> {
        if self.square_size == 0 {
            return Err(ConfigError::ZeroSquareSize);
        }
        GridSize::from_area(area_width, area_height, self.square_size).ok_or(
            ConfigError::DisplayTooSmall {
                width: area_width,
                height: area_height,
                square_size: self.square_size,
            },
        )
    }
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            square_size: SquareSize::default().pixels(),
            tick_interval: AnimationSpeed::default().tick_interval(),
            palette: PRESETS[0].palette(),
            background: Appearance::default().background(),
            death_fade: true,
            shifting_colors: false,
            random_color_preset: false,
            fade_ticks: DEFAULT_FADE_TICKS,
            edge_policy: EdgePolicy::default(),
            initial_density: DEFAULT_INITIAL_DENSITY,
        }
    }
}
