//! Skin package access.
//!
//! A skin arrives either as a zip archive (`.deltaskin`) or expanded on disk
//! as a directory holding `info.json` next to its artwork. Both are exposed
//! through [`SkinPackage`], which parses the manifest up front and reads
//! asset entries on demand.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::constants::MANIFEST_ENTRY;
use crate::models::SkinManifest;

enum PackageSource {
    Directory(PathBuf),
    Archive(ZipArchive<File>),
}

/// An opened skin package.
pub struct SkinPackage {
    path: PathBuf,
    manifest: SkinManifest,
    source: PackageSource,
}

impl std::fmt::Debug for SkinPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkinPackage")
            .field("path", &self.path)
            .field("kind", &self.kind())
            .field("name", &self.manifest.display_name())
            .finish()
    }
}

/// How the package is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Expanded skin directory
    Directory,
    /// Zip archive
    Archive,
}

impl SkinPackage {
    /// Opens a skin package.
    ///
    /// - A directory is read as an expanded skin.
    /// - A file whose directory contains `info.json` is treated as that
    ///   expanded directory.
    /// - Any other file is opened as a zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Package not found: {}", path.display());
        }

        if path.is_dir() {
            return Self::open_directory(path, path);
        }

        if let Some(parent) = path.parent().filter(|p| p.join(MANIFEST_ENTRY).is_file()) {
            return Self::open_directory(path, parent);
        }

        Self::open_archive(path)
    }

    fn open_directory(path: &Path, dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_ENTRY);
        let bytes = fs::read(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let manifest = SkinManifest::from_slice(&bytes)
            .with_context(|| format!("Invalid manifest: {}", manifest_path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            manifest,
            source: PackageSource::Directory(dir.to_path_buf()),
        })
    }

    fn open_archive(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut archive = ZipArchive::new(file)
            .with_context(|| format!("Not a valid skin archive: {}", path.display()))?;

        let bytes = read_archive_entry(&mut archive, MANIFEST_ENTRY)?
            .with_context(|| format!("{MANIFEST_ENTRY} missing from {}", path.display()))?;
        let manifest = SkinManifest::from_slice(&bytes)
            .with_context(|| format!("Invalid manifest in {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            manifest,
            source: PackageSource::Archive(archive),
        })
    }

    /// Path the package was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed skin manifest.
    pub fn manifest(&self) -> &SkinManifest {
        &self.manifest
    }

    /// Storage kind of the package.
    pub fn kind(&self) -> PackageKind {
        match self.source {
            PackageSource::Directory(_) => PackageKind::Directory,
            PackageSource::Archive(_) => PackageKind::Archive,
        }
    }

    /// Reads a named entry, returning `None` if the package has no such entry.
    pub fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        match &mut self.source {
            PackageSource::Archive(archive) => read_archive_entry(archive, name),
            PackageSource::Directory(dir) => {
                let relative = Path::new(name);
                if !relative
                    .components()
                    .all(|c| matches!(c, Component::Normal(_)))
                {
                    bail!("Refusing to read entry outside the skin directory: {name}");
                }

                let path = dir.join(relative);
                if !path.is_file() {
                    return Ok(None);
                }
                fs::read(&path)
                    .map(Some)
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }
}

fn read_archive_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read archive entry {name}")),
    };

    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to extract archive entry {name}"))?;
    Ok(Some(bytes))
}
