use crate::palette::{Palette, Rgb};
use crate::visual::{CellVisual, DisplayColor};

/// RGBA for one cell: living cells show their palette color, fading cells blend from it
/// toward the background, empty cells show the background.
pub fn cell_rgba(visual: &CellVisual, palette: &Palette, background: Rgb) -> [u8; 4] {
    let rgb = match visual.color {
        DisplayColor::None => background,
        DisplayColor::Alive(slot) => palette.color(slot).unwrap_or(background),
        DisplayColor::Fading(slot) => palette.color(slot).map_or(background, |color| {
            blend_rgb(color, background, visual.fade_progress)
        }),
    };
    [rgb[0], rgb[1], rgb[2], 0xff]
}

/// Linear blend: `amount` 0.0 gives `from`, 1.0 gives `to`.
pub fn blend_rgb(from: Rgb, to: Rgb, amount: f32) -> Rgb {
    let amount = amount.clamp(0.0, 1.0);
    std::array::from_fn(|i| {
        let (from, to) = (from[i] as f32, to[i] as f32);
        (from + (to - from) * amount).round() as u8
    })
}
