//! On-disk glyph folders for tests.

use std::fs;
use std::path::Path;

use crate::Symbol;

/// A solid `w` x `h` SVG.
pub fn svg(w: u32, h: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><rect width="{w}" height="{h}" fill="white"/></svg>"#
    )
}

/// Writes frames `1..=frames` of every symbol under `root` as 20x40 SVGs.
pub fn write_glyph_root(root: &Path, frames: u32) {
    for symbol in Symbol::ALL {
        let folder = root.join(symbol.folder_name());
        fs::create_dir_all(&folder).unwrap();
        for n in 1..=frames {
            fs::write(folder.join(format!("{n}.svg")), svg(20, 40)).unwrap();
        }
    }
}
