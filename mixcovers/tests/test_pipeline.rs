//! Integration tests for the cover pipeline

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use mixcovers::{bundled_font, CoverError, CoverPipeline, CoverSettings, ImageFetcher};
use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x / 12 % 256) as u8, (y / 8 % 256) as u8, 140])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn pipeline(settings: CoverSettings) -> CoverPipeline {
    CoverPipeline::with_font(settings, bundled_font().unwrap())
}

fn solid_png(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, color))
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

#[test]
fn test_large_landscape_source() {
    let cover = pipeline(CoverSettings::default())
        .build(&png_bytes(3000, 2000), "March")
        .unwrap();

    assert!(cover.is_square());
    assert_eq!((cover.width, cover.height), (333, 333));
    assert!(cover.len() <= 200 * 1024);
    assert_eq!(cover.passes, 0);
    assert_eq!(cover.quality, 85);

    let decoded = image::load_from_memory(&cover.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (333, 333));
}

#[test]
fn test_small_source_is_not_upscaled() {
    let cover = pipeline(CoverSettings::default())
        .build(&png_bytes(120, 300), "March")
        .unwrap();
    assert_eq!((cover.width, cover.height), (120, 120));
}

#[test]
fn test_budget_escalation_is_bounded() {
    let settings = CoverSettings {
        max_bytes: 1,
        ..CoverSettings::default()
    };
    let cover = pipeline(settings)
        .build(&png_bytes(3000, 2000), "March")
        .unwrap();

    assert_eq!(cover.passes, 2);
    assert_eq!(cover.quality, 70);
    assert_eq!((cover.width, cover.height), (249, 249));
}

#[test]
fn test_month_label_is_drawn_bottom_right() {
    let background = Rgb([60, 110, 170]);
    let square = pipeline(CoverSettings::default())
        .compose(&solid_png(800, 800, background), "October")
        .unwrap();
    assert_eq!((square.width(), square.height()), (500, 500));

    let white: Vec<(u32, u32)> = square
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == Rgb([255, 255, 255]))
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!white.is_empty());
    for &(x, y) in &white {
        assert!(x >= 250 && y >= 400, "text pixel at ({x}, {y})");
        assert!(x < 484 && y < 484, "text pixel at ({x}, {y})");
    }

    // Ombre (+2, +2) sous le texte : noire, ou recouverte par le texte
    for &(x, y) in &white {
        let below = square.get_pixel(x + 2, y + 2);
        assert!(below[0] == below[1] && below[1] == below[2]);
    }
    assert!(square.pixels().any(|p| *p == Rgb([0, 0, 0])));

    // Le reste de l'image est intact
    assert_eq!(*square.get_pixel(10, 10), background);
    assert_eq!(*square.get_pixel(499, 0), background);
}

#[test]
fn test_month_label_survives_encoding() {
    let background = Rgb([128, 128, 128]);
    let settings = CoverSettings {
        font_paths: vec![PathBuf::from("/nonexistent/DejaVuSans-Bold.ttf")],
        ..CoverSettings::default()
    };
    let cover = CoverPipeline::new(settings)
        .unwrap()
        .build(&solid_png(800, 800, background), "October")
        .unwrap();

    let decoded = image::load_from_memory(&cover.bytes).unwrap().to_rgb8();
    let is_light = |p: &Rgb<u8>| p.0.iter().all(|c| *c > 220);
    let is_dark = |p: &Rgb<u8>| p.0.iter().all(|c| *c < 40);

    let (w, h) = (decoded.width(), decoded.height());
    let corner = |x: u32, y: u32| x >= w / 2 && y >= h - h / 5;

    assert!(decoded
        .enumerate_pixels()
        .any(|(x, y, p)| corner(x, y) && is_light(p)));
    assert!(decoded
        .enumerate_pixels()
        .any(|(x, y, p)| corner(x, y) && is_dark(p)));
    assert!(!decoded
        .enumerate_pixels()
        .any(|(x, y, p)| !corner(x, y) && (is_light(p) || is_dark(p))));
}

#[tokio::test]
async fn test_fetch_and_render() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(900, 600)))
        .mount(&mock_server)
        .await;

    let fetcher = ImageFetcher::new("test-agent", Duration::from_secs(5)).unwrap();
    let data = fetcher
        .fetch(&format!("{}/photo.png", mock_server.uri()))
        .await
        .unwrap();

    let cover = pipeline(CoverSettings::default())
        .render(data, "June".to_string())
        .await
        .unwrap();
    assert_eq!((cover.width, cover.height), (333, 333));
    assert_eq!(&cover.bytes[0..2], &[0xFF, 0xD8]);
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = ImageFetcher::new("test-agent", Duration::from_secs(5)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/gone.jpg", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        CoverError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/gone.jpg"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
