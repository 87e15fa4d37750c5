//! Fabrication complète d'une couverture à partir d'octets bruts

use crate::error::{CoverError, Result};
use crate::jpeg::{compress_to_budget, JpegBudget};
use crate::label::{draw_label, load_font, LabelStyle};
use crate::transform::{center_crop_square, downscale_to_fit};
use ab_glyph::FontVec;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbImage;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Section `cover` de la configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CoverSettings {
    /// Communauté d'où provient l'image
    #[serde(default = "default_community")]
    pub community: String,
    #[serde(default = "default_max_edge")]
    pub max_edge: u32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_padding")]
    pub padding: u32,
    #[serde(default = "default_shadow_offset")]
    pub shadow_offset: i32,
    #[serde(default = "default_initial_quality")]
    pub initial_quality: u8,
    #[serde(default = "default_fallback_quality")]
    pub fallback_quality: u8,
    #[serde(default = "default_shrink_factor")]
    pub shrink_factor: f32,
    /// Taille visée
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Limite du service de playlists : au-delà, un avertissement est émis
    #[serde(default = "default_hard_max_bytes")]
    pub hard_max_bytes: usize,
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<PathBuf>,
}

fn default_community() -> String {
    "earthporn".to_string()
}
fn default_max_edge() -> u32 {
    500
}
fn default_font_size() -> f32 {
    40.0
}
fn default_padding() -> u32 {
    20
}
fn default_shadow_offset() -> i32 {
    2
}
fn default_initial_quality() -> u8 {
    85
}
fn default_fallback_quality() -> u8 {
    70
}
fn default_shrink_factor() -> f32 {
    0.75
}
fn default_max_bytes() -> usize {
    200 * 1024
}
fn default_hard_max_bytes() -> usize {
    256 * 1024
}
fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            community: default_community(),
            max_edge: default_max_edge(),
            font_size: default_font_size(),
            padding: default_padding(),
            shadow_offset: default_shadow_offset(),
            initial_quality: default_initial_quality(),
            fallback_quality: default_fallback_quality(),
            shrink_factor: default_shrink_factor(),
            max_bytes: default_max_bytes(),
            hard_max_bytes: default_hard_max_bytes(),
            font_paths: default_font_paths(),
        }
    }
}

impl CoverSettings {
    fn budget(&self) -> JpegBudget {
        JpegBudget {
            initial_quality: self.initial_quality,
            fallback_quality: self.fallback_quality,
            shrink_factor: self.shrink_factor,
            max_bytes: self.max_bytes,
        }
    }

    fn label_style(&self) -> LabelStyle {
        LabelStyle {
            font_size: self.font_size,
            padding: self.padding,
            shadow_offset: self.shadow_offset,
        }
    }
}

/// Couverture prête à être envoyée
#[derive(Debug, Clone)]
pub struct CoverImage {
    /// Octets JPEG
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Qualité JPEG du dernier encodage
    pub quality: u8,
    /// Nombre de ré-encodages effectués
    pub passes: u8,
}

impl CoverImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Encodage base64 standard attendu par l'envoi de couverture
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Pipeline de couverture : réduction, recadrage, libellé, JPEG
#[derive(Clone)]
pub struct CoverPipeline {
    settings: CoverSettings,
    font: Arc<FontVec>,
}

impl std::fmt::Debug for CoverPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverPipeline")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CoverPipeline {
    /// Crée le pipeline avec la première police de `settings.font_paths`,
    /// ou à défaut la police embarquée
    pub fn new(settings: CoverSettings) -> Result<Self> {
        let font = load_font(&settings.font_paths)?;
        Ok(Self::with_font(settings, font))
    }

    /// Crée le pipeline avec une police explicite
    pub fn with_font(settings: CoverSettings, font: FontVec) -> Self {
        Self {
            settings,
            font: Arc::new(font),
        }
    }

    pub fn settings(&self) -> &CoverSettings {
        &self.settings
    }

    /// Réduit (côté max `max_edge`), recadre en carré au centre et dessine
    /// `label`, sans encoder
    pub fn compose(&self, data: &[u8], label: &str) -> Result<RgbImage> {
        let img = image::load_from_memory(data).map_err(CoverError::Decode)?;
        debug!("Source image {}x{}", img.width(), img.height());

        let img = downscale_to_fit(img, self.settings.max_edge);
        let mut square = center_crop_square(&img).to_rgb8();
        draw_label(&mut square, label, &self.font, self.settings.label_style());

        Ok(square)
    }

    /// Fabrique la couverture de façon synchrone
    ///
    /// [`compose`](Self::compose) puis encodage JPEG sous le budget configuré.
    pub fn build(&self, data: &[u8], label: &str) -> Result<CoverImage> {
        let square = self.compose(data, label)?;

        let encoded = compress_to_budget(square, &self.settings.budget())?;
        if encoded.bytes.len() > self.settings.hard_max_bytes {
            warn!(
                "Cover is {:.2} KB, above the {} KB upload limit",
                encoded.bytes.len() as f64 / 1024.0,
                self.settings.hard_max_bytes / 1024
            );
        }

        Ok(CoverImage {
            bytes: encoded.bytes,
            width: encoded.width,
            height: encoded.height,
            quality: encoded.quality,
            passes: encoded.passes,
        })
    }

    /// Version asynchrone de [`build`](Self::build), exécutée hors du runtime
    pub async fn render(&self, data: Vec<u8>, label: String) -> Result<CoverImage> {
        let pipeline = self.clone();
        tokio::task::spawn_blocking(move || pipeline.build(&data, &label))
            .await
            .map_err(|e| CoverError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CoverSettings::default();
        assert_eq!(settings.max_edge, 500);
        assert_eq!(settings.max_bytes, 204_800);
        assert_eq!(settings.hard_max_bytes, 262_144);
        assert_eq!(settings.initial_quality, 85);
        assert_eq!(settings.fallback_quality, 70);
        assert!(!settings.font_paths.is_empty());
    }

    #[test]
    fn test_cover_base64() {
        let cover = CoverImage {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            width: 1,
            height: 1,
            quality: 85,
            passes: 0,
        };
        assert_eq!(cover.to_base64(), "/9j/4A==");
        assert!(cover.is_square());
        assert_eq!(cover.len(), 4);
    }

    #[test]
    fn test_build_rejects_garbage() {
        let pipeline = CoverPipeline::new(CoverSettings::default()).unwrap();
        let result = pipeline.build(b"not an image", "March");
        assert!(matches!(result, Err(CoverError::Decode(_))));
    }

    #[test]
    fn test_new_without_system_font() {
        let settings = CoverSettings {
            font_paths: vec![PathBuf::from("/nonexistent/DejaVuSans-Bold.ttf")],
            ..CoverSettings::default()
        };
        assert!(CoverPipeline::new(settings).is_ok());
    }
}
