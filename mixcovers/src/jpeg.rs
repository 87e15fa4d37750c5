//! Encodage JPEG sous contrainte de taille

use crate::error::{CoverError, Result};
use crate::transform::shrink;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::info;

/// Paliers de compression
#[derive(Debug, Clone, Copy)]
pub struct JpegBudget {
    /// Qualité du premier encodage
    pub initial_quality: u8,
    /// Qualité des encodages suivants
    pub fallback_quality: u8,
    /// Facteur de réduction appliqué au dernier palier
    pub shrink_factor: f32,
    /// Taille visée en octets
    pub max_bytes: usize,
}

/// Résultat de l'encodage
#[derive(Debug, Clone)]
pub struct EncodedJpeg {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    /// Nombre de ré-encodages après le premier (0, 1 ou 2)
    pub passes: u8,
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.encode_image(img).map_err(CoverError::Encode)?;
    Ok(buffer)
}

fn kib(len: usize) -> f64 {
    len as f64 / 1024.0
}

/// Encode en JPEG en restant si possible sous `budget.max_bytes`
///
/// 1. qualité initiale ;
/// 2. si trop gros, qualité de repli ;
/// 3. si encore trop gros, réduction des dimensions puis qualité de repli.
///
/// Aucun palier supplémentaire : le dernier résultat est retourné tel quel.
pub fn compress_to_budget(img: RgbImage, budget: &JpegBudget) -> Result<EncodedJpeg> {
    let bytes = encode_jpeg(&img, budget.initial_quality)?;
    info!("Image size: {:.2} KB", kib(bytes.len()));

    if bytes.len() <= budget.max_bytes {
        return Ok(EncodedJpeg {
            bytes,
            width: img.width(),
            height: img.height(),
            quality: budget.initial_quality,
            passes: 0,
        });
    }

    let mut img = img;
    let mut bytes = encode_jpeg(&img, budget.fallback_quality)?;
    let mut passes = 1;

    if bytes.len() > budget.max_bytes {
        img = shrink(&img, budget.shrink_factor);
        bytes = encode_jpeg(&img, budget.fallback_quality)?;
        passes = 2;
    }

    info!("Compressed image size: {:.2} KB", kib(bytes.len()));

    Ok(EncodedJpeg {
        bytes,
        width: img.width(),
        height: img.height(),
        quality: budget.fallback_quality,
        passes,
    })
}
