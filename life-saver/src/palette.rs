use crate::error::ConfigError;
use arrayvec::ArrayVec;

pub type Rgb = [u8; 3];

pub const MAX_PALETTE_COLORS: usize = 3;

/// Which configured color a living or fading cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteSlot {
    Color1,
    Color2,
    Color3,
}

impl PaletteSlot {
    pub const ALL: [PaletteSlot; MAX_PALETTE_COLORS] =
        [PaletteSlot::Color1, PaletteSlot::Color2, PaletteSlot::Color3];

    pub fn index(self) -> usize {
        match self {
            PaletteSlot::Color1 => 0,
            PaletteSlot::Color2 => 1,
            PaletteSlot::Color3 => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// One to three colors for living cells, in slot order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: ArrayVec<Rgb, MAX_PALETTE_COLORS>,
}

impl Palette {
    pub fn new(colors: &[Rgb]) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let colors = ArrayVec::try_from(colors).map_err(|_| ConfigError::TooManyColors {
            max: MAX_PALETTE_COLORS,
            actual: colors.len(),
        })?;
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, slot: PaletteSlot) -> Option<Rgb> {
        self.colors.get(slot.index()).copied()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn slots(&self) -> impl Iterator<Item = PaletteSlot> + '_ {
        PaletteSlot::ALL.into_iter().take(self.len())
    }
}

impl From<[Rgb; MAX_PALETTE_COLORS]> for Palette {
    fn from(colors: [Rgb; MAX_PALETTE_COLORS]) -> Self {
        Self {
            colors: ArrayVec::from(colors),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub title: &'static str,
    pub colors: [Rgb; MAX_PALETTE_COLORS],
}

impl Preset {
    pub fn palette(&self) -> Palette {
        Palette::from(self.colors)
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        title: "Santa Fe",
        colors: [[173, 98, 22], [172, 48, 17], [174, 129, 0]],
    },
    Preset {
        title: "Deep Sea",
        colors: [[2, 30, 50], [3, 49, 82], [6, 66, 110]],
    },
    Preset {
        title: "Embers",
        colors: [[80, 22, 0], [129, 35, 0], [172, 48, 17]],
    },
    Preset {
        title: "Harvest",
        colors: [[80, 58, 7], [128, 95, 17], [174, 129, 0]],
    },
    Preset {
        title: "Copper",
        colors: [[79, 45, 6], [128, 73, 14], [173, 98, 22]],
    },
];

pub fn preset_named(title: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.title == title)
}
