//! Environment map loading.
//!
//! Decodes a Radiance HDR image into a linear RGBA float
//! [`EnvironmentMap`] tagged for equirectangular reflection mapping. Decoding
//! runs on a worker thread; the render thread polls for the result and
//! installs it into the scene itself.

mod loader;

pub use loader::{EnvironmentLoader, LoadStatus};

use glasslab_scene::{EnvironmentMap, TextureMapping};
use std::path::{Path, PathBuf};

/// Relative path of the environment map shipped with the demo.
pub const DEFAULT_ENVIRONMENT_PATH: &str = "textures/environmentMap/2k.hdr";

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {0} has no pixels")]
    Empty(PathBuf),
    #[error("loader thread exited without a result")]
    Disconnected,
}

/// Decode an HDR file into an equirectangular environment map.
pub fn load_equirect_hdr(path: impl AsRef<Path>) -> Result<EnvironmentMap, AssetError> {
    let path = path.as_ref();
    let _span = tracing::info_span!("load_equirect_hdr", path = %path.display()).entered();

    let image = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(e) => AssetError::Io(e),
        source => AssetError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let rgba = image.into_rgba32f();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty(path.to_path_buf()));
    }

    let mut map = EnvironmentMap::new(width, height, rgba.into_raw());
    map.mapping = TextureMapping::EquirectangularReflection;
    tracing::debug!(
        width,
        height,
        mib = map.size_bytes() as f32 / (1024.0 * 1024.0),
        "decoded environment map"
    );
    Ok(map)
}

pub fn crate_info() -> &'static str {
    "glasslab-assets v0.1.0"
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::codecs::hdr::HdrEncoder;
    use image::Rgb;
    use std::path::Path;

    /// Write a small gradient HDR image: red grows left to right, green top to bottom.
    pub fn write_hdr(path: &Path, width: usize, height: usize) {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(Rgb([x as f32, y as f32, 2.0]));
            }
        }
        let file = std::fs::File::create(path).unwrap();
        HdrEncoder::new(std::io::BufWriter::new(file))
            .encode(&pixels, width, height)
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_hdr;

    #[test]
    fn decodes_hdr_into_equirect_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.hdr");
        write_hdr(&path, 8, 4);

        let map = load_equirect_hdr(&path).unwrap();
        assert_eq!((map.width, map.height), (8, 4));
        assert_eq!(map.pixels.len(), 8 * 4 * 4);
        assert_eq!(map.mapping, TextureMapping::EquirectangularReflection);
        // Blue channel is constant and alpha is opaque.
        assert!(map.pixels.chunks_exact(4).all(|p| (p[2] - 2.0).abs() < 0.05 && p[3] == 1.0));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_equirect_hdr(dir.path().join("nope.hdr")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.hdr");
        std::fs::write(&path, b"definitely not a radiance file").unwrap();
        let err = load_equirect_hdr(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn default_path_is_relative() {
        assert!(Path::new(DEFAULT_ENVIRONMENT_PATH).is_relative());
        assert!(DEFAULT_ENVIRONMENT_PATH.ends_with(".hdr"));
    }
}
