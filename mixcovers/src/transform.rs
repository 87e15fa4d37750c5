//! Redimensionnement et recadrage des images sources

use image::{imageops::FilterType, DynamicImage, RgbImage};

/// Réduit l'image pour que son plus grand côté tienne dans `max_edge`
///
/// Le ratio est conservé. Une image déjà assez petite est rendue telle quelle
/// (jamais d'agrandissement).
pub fn downscale_to_fit(img: DynamicImage, max_edge: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let longest = width.max(height);

    if longest <= max_edge || max_edge == 0 {
        return img;
    }

    let ratio = max_edge as f64 / longest as f64;
    let new_width = ((width as f64 * ratio) as u32).max(1);
    let new_height = ((height as f64 * ratio) as u32).max(1);

    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Recadre au centre sur un carré de côté `min(largeur, hauteur)`
pub fn center_crop_square(img: &DynamicImage) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let edge = width.min(height);

    let x = (width - edge) / 2;
    let y = (height - edge) / 2;

    img.crop_imm(x, y, edge, edge)
}

/// Réduit les deux dimensions d'un facteur fixe (ex: 0.75)
pub fn shrink(img: &RgbImage, factor: f32) -> RgbImage {
    let new_width = ((img.width() as f32 * factor) as u32).max(1);
    let new_height = ((img.height() as f32 * factor) as u32).max(1);

    image::imageops::resize(img, new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_downscale_landscape() {
        let img = downscale_to_fit(create_test_image(2000, 1000), 500);
        assert_eq!((img.width(), img.height()), (500, 250));
    }

    #[test]
    fn test_downscale_portrait() {
        let img = downscale_to_fit(create_test_image(600, 1200), 500);
        assert_eq!((img.width(), img.height()), (250, 500));
    }

    #[test]
    fn test_downscale_never_upscales() {
        let img = downscale_to_fit(create_test_image(320, 200), 500);
        assert_eq!((img.width(), img.height()), (320, 200));

        let img = downscale_to_fit(create_test_image(500, 500), 500);
        assert_eq!((img.width(), img.height()), (500, 500));
    }

    #[test]
    fn test_center_crop_landscape() {
        let img = create_test_image(500, 300);
        let square = center_crop_square(&img);
        assert_eq!((square.width(), square.height()), (300, 300));

        // Le pixel (0, 0) du carré vient de la colonne 100 de l'original
        let rgb = square.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0)[0], 100);
        assert_eq!(rgb.get_pixel(0, 0)[1], 0);
    }

    #[test]
    fn test_center_crop_portrait() {
        let img = create_test_image(100, 301);
        let square = center_crop_square(&img);
        assert_eq!((square.width(), square.height()), (100, 100));

        let rgb = square.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0)[1], 100);
    }

    #[test]
    fn test_shrink() {
        let img = create_test_image(400, 400).to_rgb8();
        let smaller = shrink(&img, 0.75);
        assert_eq!((smaller.width(), smaller.height()), (300, 300));
    }
}
