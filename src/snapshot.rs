//! Android snapshot artifacts
//!
//! Snapshot blobs are produced by the bundler into
//! `platforms/android/snapshot-build` and have to be copied into the app
//! assets before the native build picks them up.

use crate::core::context::android_platform_dir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Name of the gradle configuration the snapshot package installs
pub const SNAPSHOT_PACKAGE_NAME: &str = "nativescript-android-snapshot";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no snapshot blobs found in {}; was the bundle built with --env.snapshot?", .0.display())]
    MissingBlobs(PathBuf),

    #[error("failed to walk {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Removes and installs snapshot artifacts for a project
pub trait SnapshotArtifacts: Send + Sync {
    /// Drop artifacts left over from a previous snapshot build
    fn clean(&self, project_dir: &Path) -> Result<(), SnapshotError>;

    /// Copy freshly generated artifacts into the platform project
    fn install(&self, project_dir: &Path) -> Result<(), SnapshotError>;
}

/// Filesystem layout of the android platform project
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshotArtifacts;

impl ProjectSnapshotArtifacts {
    pub fn new() -> Self {
        Self
    }

    fn assets_dir(project_dir: &Path) -> PathBuf {
        android_platform_dir(project_dir).join("src").join("main").join("assets")
    }

    fn snapshot_build_dir(project_dir: &Path) -> PathBuf {
        android_platform_dir(project_dir).join("snapshot-build")
    }
}

impl SnapshotArtifacts for ProjectSnapshotArtifacts {
    fn clean(&self, project_dir: &Path) -> Result<(), SnapshotError> {
        remove_dir_if_exists(&Self::assets_dir(project_dir).join("snapshots"))?;
        remove_dir_if_exists(
            &android_platform_dir(project_dir)
                .join("configurations")
                .join(SNAPSHOT_PACKAGE_NAME),
        )
    }

    fn install(&self, project_dir: &Path) -> Result<(), SnapshotError> {
        let build_dir = Self::snapshot_build_dir(project_dir);
        let assets_dir = Self::assets_dir(project_dir);

        // stale native build output would keep the old blobs
        remove_dir_if_exists(&android_platform_dir(project_dir).join("build"))?;

        let java_classes = build_dir.join("tns-java-classes.js");
        if java_classes.is_file() {
            let target_dir = assets_dir.join("app");
            create_dir(&target_dir)?;
            copy_file(&java_classes, &target_dir.join("tns-java-classes.js"))?;
        }

        let blobs_dir = build_dir.join("snapshots").join("blobs");
        if !blobs_dir.is_dir() {
            return Err(SnapshotError::MissingBlobs(blobs_dir));
        }

        let copied = copy_tree(&blobs_dir, &assets_dir.join("snapshots"))?;
        info!("Installed {} snapshot blob(s)", copied);
        Ok(())
    }
}

fn remove_dir_if_exists(path: &Path) -> Result<(), SnapshotError> {
    if !path.exists() {
        return Ok(());
    }
    debug!("Removing {}", path.display());
    fs::remove_dir_all(path).map_err(|source| SnapshotError::Io {
        action: "failed to remove",
        path: path.to_path_buf(),
        source,
    })
}

fn create_dir(path: &Path) -> Result<(), SnapshotError> {
    fs::create_dir_all(path).map_err(|source| SnapshotError::Io {
        action: "failed to create",
        path: path.to_path_buf(),
        source,
    })
}

fn copy_file(from: &Path, to: &Path) -> Result<(), SnapshotError> {
    fs::copy(from, to).map(|_| ()).map_err(|source| SnapshotError::Io {
        action: "failed to copy",
        path: from.to_path_buf(),
        source,
    })
}

/// Copy `source`'s contents into `target`, returning the number of files copied
fn copy_tree(source: &Path, target: &Path) -> Result<usize, SnapshotError> {
    let mut copied = 0;
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| SnapshotError::Walk {
            path: source.to_path_buf(),
            source: e,
        })?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            create_dir(&destination)?;
        } else {
            copy_file(entry.path(), &destination)?;
            copied += 1;
        }
    }
    Ok(copied)
}
