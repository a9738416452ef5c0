//! Source asset decoding.
//!
//! SVG frames are rasterized with `resvg` directly at the target width, so
//! vector glyphs stay sharp. Raster frames go through the `image` crate and
//! are resampled with Lanczos3. Both paths produce premultiplied bitmaps.

use std::path::Path;

use glyphclock_engine::raster::Bitmap;
use image::imageops::FilterType;
use resvg::{tiny_skia, usvg};

use crate::GlyphError;

/// Upper bound on either side of a decoded frame, in pixels.
pub const MAX_BITMAP_SIDE: u32 = 8192;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum AssetKind {
    Svg,
    Raster,
}

impl AssetKind {
    fn of(path: &Path) -> AssetKind {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if ext.eq_ignore_ascii_case("svg") || ext.eq_ignore_ascii_case("svgz") {
            AssetKind::Svg
        } else {
            AssetKind::Raster
        }
    }
}

/// Reads `path` and decodes it into a bitmap exactly `target_width` pixels
/// wide, preserving the aspect ratio.
pub fn decode_asset(path: &Path, target_width: u32) -> Result<Bitmap, GlyphError> {
    if target_width == 0 {
        return Err(GlyphError::InvalidConfig("target width must be at least 1 pixel"));
    }

    let data = std::fs::read(path).map_err(|source| GlyphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if data.is_empty() {
        return Err(GlyphError::Empty { path: path.to_path_buf() });
    }

    match AssetKind::of(path) {
        AssetKind::Svg => decode_svg(path, &data, target_width),
        AssetKind::Raster => decode_raster(path, &data, target_width),
    }
}

fn decode_svg(path: &Path, data: &[u8], target_width: u32) -> Result<Bitmap, GlyphError> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|source| {
        GlyphError::Svg { path: path.to_path_buf(), source }
    })?;

    let src = tree.size();
    let (width, height) = scaled_size(path, src.width(), src.height(), target_width)?;

    let scale = target_width as f32 / src.width();
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| GlyphError::InvalidSize {
        path: path.to_path_buf(),
        width: src.width(),
        height: src.height(),
        target_width,
    })?;

    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(Bitmap::from_premul_rgba(width, height, pixmap.take())?)
}

fn decode_raster(path: &Path, data: &[u8], target_width: u32) -> Result<Bitmap, GlyphError> {
    let img = image::load_from_memory(data).map_err(|source| GlyphError::Raster {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = scaled_size(path, img.width() as f32, img.height() as f32, target_width)?;

    let img = if (img.width(), img.height()) == (width, height) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    Ok(Bitmap::from_straight_rgba(width, height, img.into_rgba8().into_raw())?)
}

/// Output size for a source of `src_w` x `src_h` scaled to `target_width`.
fn scaled_size(path: &Path, src_w: f32, src_h: f32, target_width: u32) -> Result<(u32, u32), GlyphError> {
    let invalid = || GlyphError::InvalidSize {
        path: path.to_path_buf(),
        width: src_w,
        height: src_h,
        target_width,
    };

    if !(src_w.is_finite() && src_h.is_finite()) || src_w <= 0.0 || src_h <= 0.0 {
        return Err(invalid());
    }

    let height = (src_h * target_width as f32 / src_w).round().max(1.0);
    if target_width > MAX_BITMAP_SIDE || height > MAX_BITMAP_SIDE as f32 {
        return Err(invalid());
    }

    Ok((target_width, height as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TALL_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="200">
        <rect width="100" height="200" fill="black"/>
    </svg>"#;

    // ── svg ───────────────────────────────────────────────────────────────

    #[test]
    fn svg_is_scaled_to_target_width_keeping_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.svg");
        fs::write(&path, TALL_SVG).unwrap();

        let bmp = decode_asset(&path, 50).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (50, 100));
        // Opaque black fill, premultiplied.
        assert_eq!(&bmp.pixels()[..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn corrupt_svg_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.svg");
        fs::write(&path, "<svg").unwrap();

        assert!(matches!(decode_asset(&path, 50), Err(GlyphError::Svg { .. })));
    }

    // ── raster ────────────────────────────────────────────────────────────

    #[test]
    fn png_is_resized_to_target_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.png");
        image::RgbaImage::from_pixel(40, 20, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let bmp = decode_asset(&path, 80).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (80, 40));
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn empty_file_is_reported_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.svg");
        fs::write(&path, b"").unwrap();

        assert!(matches!(decode_asset(&path, 50), Err(GlyphError::Empty { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_asset(&dir.path().join("9.svg"), 50).unwrap_err();
        assert!(matches!(err, GlyphError::Io { .. }));
        assert!(err.to_string().contains("9.svg"));
    }

    #[test]
    fn zero_target_width_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.svg");
        fs::write(&path, TALL_SVG).unwrap();

        assert!(matches!(decode_asset(&path, 0), Err(GlyphError::InvalidConfig(_))));
    }
}
