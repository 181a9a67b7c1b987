// Copyright 2025 the Seachart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon lookup with memoization.
//!
//! [`ImageCache`] maps icon names to decoded images, asking its
//! [`AssetStore`] at most once per name. Failed loads are remembered too, so
//! a missing icon costs one store lookup per cache, not one per frame.

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

/// A decoded icon: tightly packed, straight-alpha RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct IconImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl IconImage {
    /// Wraps RGBA8 pixels, or returns `None` when the buffer length does not
    /// match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Option<Self> {
        let pixels = pixels.into();
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data, row-major RGBA8 with straight alpha.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for IconImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish_non_exhaustive()
    }
}

/// Source of icon images by name.
pub trait AssetStore: Send + Sync {
    /// Loads the icon called `name`, or `None` if the store has none.
    fn load(&self, name: &str) -> Option<IconImage>;
}

/// An [`AssetStore`] backed by an in-memory map.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetStore {
    images: HashMap<String, IconImage>,
}

impl MemoryAssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an icon.
    pub fn insert(&mut self, name: impl Into<String>, image: IconImage) {
        self.images.insert(name.into(), image);
    }

    /// Builder-style [`MemoryAssetStore::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, image: IconImage) -> Self {
        self.insert(name, image);
        self
    }
}

impl AssetStore for MemoryAssetStore {
    fn load(&self, name: &str) -> Option<IconImage> {
        self.images.get(name).cloned()
    }
}

#[cfg(feature = "png")]
pub use png_store::PngDirectoryStore;

#[cfg(feature = "png")]
mod png_store {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use png::{BitDepth, ColorType, Transformations};

    use super::{AssetStore, IconImage};

    /// An [`AssetStore`] reading `<dir>/<name>.png` files.
    #[derive(Clone, Debug)]
    pub struct PngDirectoryStore {
        dir: PathBuf,
    }

    impl PngDirectoryStore {
        /// Creates a store rooted at `dir`.
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.join(format!("{name}.png"))
        }
    }

    /// Decodes a PNG into RGBA8, or `Ok(None)` for layouts without an RGBA8
    /// expansion.
    fn decode(path: &Path) -> Result<Option<IconImage>, png::DecodingError> {
        let file = File::open(path)?;
        let mut decoder = png::Decoder::new(BufReader::new(file));
        decoder.set_transformations(
            Transformations::EXPAND | Transformations::ALPHA | Transformations::STRIP_16,
        );
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0_u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let rgba = match reader.output_color_type() {
            (ColorType::Rgba, BitDepth::Eight) => buf,
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
            _ => return Ok(None),
        };
        Ok(IconImage::from_rgba8(info.width, info.height, rgba))
    }

    impl AssetStore for PngDirectoryStore {
        fn load(&self, name: &str) -> Option<IconImage> {
            let path = self.path(name);
            match decode(&path) {
                Ok(Some(image)) => Some(image),
                Ok(None) => {
                    tracing::debug!("PngDirectoryStore: unsupported layout in {}", path.display());
                    None
                }
                Err(err) => {
                    tracing::debug!("PngDirectoryStore: {}: {err}", path.display());
                    None
                }
            }
        }
    }
}

/// Memoized icon-name to image lookup.
///
/// Lookups take a shared lock; a miss takes the exclusive lock, checks again
/// and asks the store. Entries are never evicted.
pub struct ImageCache {
    store: Box<dyn AssetStore>,
    entries: RwLock<HashMap<String, Option<Arc<IconImage>>>>,
}

impl ImageCache {
    /// Creates an empty cache over `store`.
    pub fn new(store: impl AssetStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the image named `name`, loading it on first request.
    pub fn resolve(&self, name: &str) -> Option<Arc<IconImage>> {
        if let Some(entry) = self.entries.read().get(name) {
            return entry.clone();
        }

        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(name) {
            return entry.clone();
        }
        let loaded = self.store.load(name).map(Arc::new);
        if loaded.is_none() {
            tracing::debug!("ImageCache: no asset named {name:?}");
        }
        entries.insert(name.to_owned(), loaded.clone());
        loaded
    }

    /// Number of names looked up so far, found or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing has been looked up yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dot() -> IconImage {
        IconImage::from_rgba8(1, 1, vec![255_u8, 0, 0, 255]).expect("1x1 RGBA")
    }

    #[derive(Default)]
    struct CountingStore {
        inner: MemoryAssetStore,
        loads: Arc<AtomicUsize>,
    }

    impl AssetStore for CountingStore {
        fn load(&self, name: &str) -> Option<IconImage> {
            self.loads.fetch_add(1, Ordering::Relaxed);
            self.inner.load(name)
        }
    }

    #[test]
    fn icon_image_checks_buffer_length() {
        assert!(IconImage::from_rgba8(2, 2, vec![0_u8; 16]).is_some());
        assert!(IconImage::from_rgba8(2, 2, vec![0_u8; 15]).is_none());
        assert!(IconImage::from_rgba8(0, 0, Vec::<u8>::new()).is_some());
    }

    #[test]
    fn hits_and_misses_are_memoized() {
        let loads = Arc::new(AtomicUsize::new(0));
        let cache = ImageCache::new(CountingStore {
            inner: MemoryAssetStore::new().with("LIGHTS11_1", dot()),
            loads: Arc::clone(&loads),
        });

        let first = cache.resolve("LIGHTS11_1").expect("present");
        let second = cache.resolve("LIGHTS11_1").expect("present");
        assert!(Arc::ptr_eq(&first, &second));

        assert!(cache.resolve("NOPE").is_none());
        assert!(cache.resolve("NOPE").is_none());

        assert_eq!(loads.load(Ordering::Relaxed), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_is_shareable_across_threads() {
        let cache = Arc::new(ImageCache::new(MemoryAssetStore::new().with("X", dot())));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.resolve("X").is_some())
            })
            .collect();
        for h in handles {
            assert!(h.join().expect("thread"));
        }
        assert_eq!(cache.len(), 1);
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_directory_reports_missing_files() {
        let store = PngDirectoryStore::new(std::env::temp_dir().join("seachart-no-such-dir"));
        assert!(store.load("BOYCAR01").is_none());
    }
}
