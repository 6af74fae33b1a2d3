//! Copying skin textures next to the exported model.
//!
//! Copy failures never abort an export: the model stays valid without its
//! textures, so each failure is logged and reported instead.

use crate::md2::skins::basename;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of copying one skin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCopy {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Why the copy failed, if it did.
    pub error: Option<String>,
}

impl TextureCopy {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Path written to the skin table for this texture.
    pub fn referenced_path(&self) -> String {
        self.destination.to_string_lossy().into_owned()
    }
}

/// Where skin `index` is copied for a model written to `output`.
///
/// Textures land beside the model under their own file name. With
/// `rename_first`, the first one takes the model's name and keeps its own
/// extension (`hero.md2` + `skin.png` -> `hero.png`).
pub fn copy_destination(skin: &str, index: usize, output: &Path, rename_first: bool) -> PathBuf {
    if index == 0 && rename_first {
        let extension = Path::new(basename(skin)).extension().unwrap_or_default();
        return output.with_extension(extension);
    }
    let dir = output.parent().unwrap_or_else(|| Path::new(""));
    dir.join(basename(skin))
}

/// Copy every skin beside `output`.
pub fn copy_skins_beside(skins: &[String], output: &Path, rename_first: bool) -> Vec<TextureCopy> {
    skins
        .iter()
        .enumerate()
        .map(|(index, skin)| {
            let source = PathBuf::from(skin);
            let destination = copy_destination(skin, index, output, rename_first);
            tracing::info!("Copying texture {:?} to {:?}", source, destination);

            let error = copy_file(&source, &destination).err().map(|e| {
                tracing::warn!("Copying texture {:?} to {:?} failed: {}", source, destination, e);
                e.to_string()
            });

            TextureCopy {
                source,
                destination,
                error,
            }
        })
        .collect()
}

fn copy_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    // Copying a file onto itself would truncate it.
    if destination.exists() && fs::canonicalize(source)? == fs::canonicalize(destination)? {
        return Ok(());
    }
    fs::copy(source, destination).map(|_| ())
}
