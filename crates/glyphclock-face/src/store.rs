use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::frame::FrameIndex;
use crate::Symbol;

/// File extensions tried for each frame, most preferred first.
pub const ASSET_EXTENSIONS: [&str; 7] = ["svg", "svgz", "png", "webp", "jpg", "jpeg", "bmp"];

/// Catalog of per-symbol frame folders.
///
/// Frame `n` of a symbol lives at `<folder>/<n>.<ext>`. The store only
/// records folders; it never reads frame files itself.
#[derive(Debug, Clone, Default)]
pub struct GlyphStore {
    folders: BTreeMap<Symbol, PathBuf>,
}

impl GlyphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every symbol whose folder (see [`Symbol::folder_name`])
    /// exists under `root`. Missing folders are logged and left out.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let mut store = Self::new();

        for symbol in Symbol::ALL {
            let folder = root.join(symbol.folder_name());
            if folder.is_dir() {
                store.insert(symbol, folder);
            } else {
                log::warn!("no glyph folder for {symbol} at {}", folder.display());
            }
        }

        log::debug!("glyph store: {} of {} symbols under {}", store.len(), Symbol::ALL.len(), root.display());
        store
    }

    /// Registers (or replaces) the folder for `symbol`.
    pub fn insert(&mut self, symbol: Symbol, folder: impl Into<PathBuf>) -> Option<PathBuf> {
        self.folders.insert(symbol, folder.into())
    }

    pub fn folder(&self, symbol: Symbol) -> Option<&Path> {
        self.folders.get(&symbol).map(PathBuf::as_path)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.folders.contains_key(&symbol)
    }

    /// Registered symbols in a stable order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.folders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Path of the source asset for `(symbol, frame)`.
    ///
    /// Returns the first existing file in [`ASSET_EXTENSIONS`] order; when no
    /// candidate exists, the `.svg` path is returned so the caller's read
    /// error names the canonical file. `None` if the symbol has no folder.
    pub fn asset_path(&self, symbol: Symbol, frame: FrameIndex) -> Option<PathBuf> {
        let folder = self.folder(symbol)?;
        let stem = frame.get().to_string();

        let found = ASSET_EXTENSIONS
            .iter()
            .map(|ext| folder.join(&stem).with_extension(ext))
            .find(|p| p.is_file());

        Some(found.unwrap_or_else(|| folder.join(&stem).with_extension(ASSET_EXTENSIONS[0])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn frame(n: u32) -> FrameIndex {
        FrameIndex::new(n).unwrap()
    }

    #[test]
    fn from_root_registers_existing_folders_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("0")).unwrap();
        fs::create_dir(dir.path().join("colon")).unwrap();

        let store = GlyphStore::from_root(dir.path());
        assert_eq!(store.symbols().collect::<Vec<_>>(), vec![Symbol::Zero, Symbol::Colon]);
        assert!(!store.contains(Symbol::Space));
    }

    #[test]
    fn asset_path_prefers_svg_over_png() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.png"), b"png").unwrap();
        fs::write(dir.path().join("1.svg"), b"svg").unwrap();
        fs::write(dir.path().join("2.png"), b"png").unwrap();

        let mut store = GlyphStore::new();
        store.insert(Symbol::Seven, dir.path());

        assert_eq!(store.asset_path(Symbol::Seven, frame(1)), Some(dir.path().join("1.svg")));
        assert_eq!(store.asset_path(Symbol::Seven, frame(2)), Some(dir.path().join("2.png")));
    }

    #[test]
    fn asset_path_defaults_to_svg_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = GlyphStore::new();
        store.insert(Symbol::Am, dir.path());

        assert_eq!(store.asset_path(Symbol::Am, frame(3)), Some(dir.path().join("3.svg")));
        assert_eq!(store.asset_path(Symbol::Pm, frame(3)), None);
    }
}
