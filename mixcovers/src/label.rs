//! Libellé du mois dessiné en bas à droite de la couverture

use crate::error::{CoverError, Result};
use ab_glyph::{FontVec, PxScale};
use chrono::Month;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Police de secours (DejaVu Sans Bold, embarquée dans le binaire)
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Couleur de l'ombre portée
pub const SHADOW_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Couleur du texte principal
pub const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Nom anglais complet d'un mois (1 = January)
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Police embarquée
pub fn bundled_font() -> Result<FontVec> {
    FontVec::try_from_vec(BUNDLED_FONT.to_vec())
        .map_err(|e| CoverError::Font(format!("bundled font: {}", e)))
}

/// Charge la première police lisible parmi les chemins donnés
///
/// Sans police système utilisable, la police embarquée est retournée.
pub fn load_font(paths: &[PathBuf]) -> Result<FontVec> {
    for path in paths {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Font {} not available: {}", path.display(), e);
                continue;
            }
        };
        match FontVec::try_from_vec(data) {
            Ok(font) => {
                info!("Using font {}", path.display());
                return Ok(font);
            }
            Err(e) => warn!("Cannot parse font {}: {}", path.display(), e),
        }
    }
    info!("No system font found, using the bundled font");
    bundled_font()
}

/// Placement du libellé
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub font_size: f32,
    pub padding: u32,
    pub shadow_offset: i32,
}

/// Dessine `text` dans le coin inférieur droit, ombre portée comprise
///
/// Retourne la position (x, y) du texte principal.
pub fn draw_label(img: &mut RgbImage, text: &str, font: &FontVec, style: LabelStyle) -> (i32, i32) {
    let scale = PxScale::from(style.font_size);
    let (text_width, text_height) = text_size(scale, font, text);

    let x = img.width() as i32 - text_width as i32 - style.padding as i32;
    let y = img.height() as i32 - text_height as i32 - style.padding as i32;

    draw_text_mut(
        img,
        SHADOW_COLOR,
        x + style.shadow_offset,
        y + style.shadow_offset,
        scale,
        font,
        text,
    );
    draw_text_mut(img, TEXT_COLOR, x, y, scale, font, text);

    (x, y)
}
