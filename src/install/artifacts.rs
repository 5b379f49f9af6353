use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use image::{DynamicImage, RgbaImage, codecs::bmp::BmpEncoder, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{ReleaseError, ReleaseResult};

/// JPEG quality of the desktop background.
pub const JPEG_QUALITY: u8 = 92;

/// Locations of the installed artifacts, relative to a root filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub splash_bmp: PathBuf,
    pub background_jpg: PathBuf,
    pub build_file: PathBuf,
}

impl ArtifactPaths {
    pub fn under(root_fs: &Path) -> Self {
        Self {
            splash_bmp: root_fs.join("boot").join("splash.bmp"),
            background_jpg: root_fs
                .join("usr")
                .join("share")
                .join("backgrounds")
                .join("tssh")
                .join("background.jpg"),
            build_file: root_fs.join("etc").join("tssh.build"),
        }
    }
}

/// Write the boot splash, desktop background and build stamp into `root_fs`.
///
/// Missing directories are created and existing artifacts are overwritten. An empty
/// `build_id` is accepted and produces a build file holding only a newline.
#[tracing::instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn install(root_fs: &Path, image: &RgbaImage, build_id: &str) -> ReleaseResult<ArtifactPaths> {
    if root_fs.as_os_str().is_empty() {
        return Err(ReleaseError::install("install: rootfs path is empty"));
    }
    match std::fs::metadata(root_fs) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ReleaseError::install(format!(
                "install: rootfs {:?} is not a directory",
                root_fs.display().to_string()
            )));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReleaseError::install(format!(
                "install: rootfs {:?} does not exist",
                root_fs.display().to_string()
            )));
        }
        Err(e) => {
            return Err(ReleaseError::install(format!("install: stat rootfs: {e}")));
        }
    }

    let paths = ArtifactPaths::under(root_fs);
    for file in [&paths.splash_bmp, &paths.background_jpg, &paths.build_file] {
        ensure_parent_dir(file)?;
    }

    // Both encodings drop alpha; the composed canvas is opaque.
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let rgb = DynamicImage::ImageRgb8(rgb);

    write_bmp(&paths.splash_bmp, &rgb)?;
    write_jpeg(&paths.background_jpg, &rgb)?;
    write_text(&paths.build_file, &format!("{build_id}\n"))?;

    tracing::info!(root = %root_fs.display(), "installed release artifacts");
    Ok(paths)
}

fn ensure_parent_dir(path: &Path) -> ReleaseResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReleaseError::install(format!("install: create dir {:?}: {e}", parent.display().to_string()))
        })?;
    }
    Ok(())
}

fn create(path: &Path, what: &str) -> ReleaseResult<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(|e| {
        ReleaseError::install(format!("install: open {what} {:?}: {e}", path.display().to_string()))
    })
}

fn write_bmp(path: &Path, image: &DynamicImage) -> ReleaseResult<()> {
    let mut out = create(path, "bmp")?;
    image
        .write_with_encoder(BmpEncoder::new(&mut out))
        .and_then(|()| out.flush().map_err(image::ImageError::IoError))
        .map_err(|e| {
            ReleaseError::install(format!("install: encode bmp {:?}: {e}", path.display().to_string()))
        })
}

fn write_jpeg(path: &Path, image: &DynamicImage) -> ReleaseResult<()> {
    let mut out = create(path, "jpeg")?;
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))
        .and_then(|()| out.flush().map_err(image::ImageError::IoError))
        .map_err(|e| {
            ReleaseError::install(format!("install: encode jpeg {:?}: {e}", path.display().to_string()))
        })
}

fn write_text(path: &Path, content: &str) -> ReleaseResult<()> {
    let mut out = create(path, "metadata")?;
    out.write_all(content.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| {
            ReleaseError::install(format!("install: write metadata {:?}: {e}", path.display().to_string()))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/install/artifacts.rs"]
mod tests;
