use crate::config::{
    AnimationSpeed, Appearance, ConfigSnapshot, SquareSize, DEFAULT_FADE_TICKS,
    DEFAULT_INITIAL_DENSITY,
};
use crate::error::{ConfigError, SettingsError};
use crate::palette::{Palette, Preset, Rgb, PRESETS};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use world_grid::{EdgePolicy, Random};

/// User-editable settings as stored on disk. Keys missing from the file take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub appearance_mode: Appearance,
    pub square_size: SquareSize,
    pub animation_speed: AnimationSpeed,
    pub color1: Rgb,
    pub color2: Rgb,
    pub color3: Rgb,
    pub random_color_preset: bool,
    pub death_fade: bool,
    pub shifting_colors: bool,
    pub selected_preset_title: String,
    pub fade_ticks: u32,
    pub edge_policy: EdgePolicy,
    pub initial_density: f64,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        let preset = &PRESETS[0];
        Self {
            appearance_mode: Appearance::default(),
            square_size: SquareSize::default(),
            animation_speed: AnimationSpeed::default(),
            color1: preset.colors[0],
            color2: preset.colors[1],
            color3: preset.colors[2],
            random_color_preset: false,
            death_fade: true,
            shifting_colors: false,
            selected_preset_title: preset.title.to_string(),
            fade_ticks: DEFAULT_FADE_TICKS,
            edge_policy: EdgePolicy::default(),
            initial_density: DEFAULT_INITIAL_DENSITY,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `load`, but a file that does not exist yet means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                warn!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            result => result,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        [self.color1, self.color2, self.color3] = preset.colors;
        self.selected_preset_title = preset.title.to_string();
    }

    pub fn palette(&self) -> Palette {
        Palette::from([self.color1, self.color2, self.color3])
    }

    pub fn random(&self) -> Random {
        self.seed.map_or_else(Random::new, Random::from_seed)
    }

    pub fn snapshot(&self) -> Result<ConfigSnapshot, ConfigError> {
        let snapshot = ConfigSnapshot {
            square_size: self.square_size.pixels(),
            tick_interval: self.animation_speed.tick_interval(),
            palette: self.palette(),
            background: self.appearance_mode.background(),
            death_fade: self.death_fade,
            shifting_colors: self.shifting_colors,
            random_color_preset: self.random_color_preset,
            fade_ticks: self.fade_ticks,
            edge_policy: self.edge_policy,
            initial_density: self.initial_density,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::preset_named;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn missing_keys_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "animationSpeed": "fast", "shiftingColors": true }"#)
                .unwrap();
        assert_eq!(settings.animation_speed, AnimationSpeed::Fast);
        assert!(settings.shifting_colors);
        assert!(settings.death_fade);
        assert_eq!(settings.square_size, SquareSize::Medium);
        assert_eq!(settings.selected_preset_title, "Santa Fe");
    }

    #[test]
    fn snapshot_maps_enumerations() {
        let settings = Settings {
            appearance_mode: Appearance::Light,
            square_size: SquareSize::Large,
            animation_speed: AnimationSpeed::Slow,
            ..Settings::default()
        };
        let snapshot = settings.snapshot().unwrap();
        assert_eq!(snapshot.square_size, 40);
        assert_eq!(snapshot.tick_interval, Duration::from_secs(1));
        assert_eq!(snapshot.background, [0xff, 0xff, 0xff]);
        assert_eq!(snapshot.palette.len(), 3);
    }

    #[test]
    fn snapshot_rejects_invalid_tunables() {
        let settings = Settings {
            fade_ticks: 0,
            ..Settings::default()
        };
        assert_eq!(settings.snapshot(), Err(ConfigError::ZeroFadeTicks));
    }

    #[test]
    fn apply_preset_replaces_colors_and_title() {
        let mut settings = Settings::default();
        let preset = preset_named("Deep Sea").unwrap();
        settings.apply_preset(preset);
        assert_eq!([settings.color1, settings.color2, settings.color3], preset.colors);
        assert_eq!(settings.selected_preset_title, "Deep Sea");
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            shifting_colors: true,
            seed: Some(7),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let result = Settings::load_or_default(&path);
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }
}
