#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Game of Life idle display: grid stepping on a fixed tick, with per-cell color and fade
//! state that the renderer reads between ticks.

mod config;
mod engine;
mod error;
mod life;
mod palette;
mod render;
mod scheduler;
mod settings;
mod visual;

pub use config::{AnimationSpeed, Appearance, ConfigSnapshot, SquareSize};
pub use engine::LifeEngine;
pub use error::{ConfigError, SettingsError};
pub use life::{next_alive, step_generation, CellChange, InitialPattern, LifeCell};
pub use palette::{preset_named, Palette, PaletteSlot, Preset, Rgb, PRESETS};
pub use render::{blend_rgb, cell_rgba};
pub use scheduler::{SchedulerState, TickScheduler};
pub use settings::Settings;
pub use visual::{CellVisual, DisplayColor, VisualPolicy, VisualStateTracker};
pub use world_grid::{EdgePolicy, GridSize, Loc, Random};
