use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global media root (absolute), from `config::media_storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn media_root() -> PathBuf {
    let root = config::media_storage_root();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Certificate template folder for a seminar:
/// {MEDIA_ROOT}/certificate_templates/seminar_{seminar_id}
pub fn certificate_template_dir(seminar_id: i64) -> PathBuf {
    media_root()
        .join("certificate_templates")
        .join(format!("seminar_{seminar_id}"))
}

/// Build a path under a seminar's template directory (does not create).
pub fn certificate_template_path(seminar_id: i64, filename: &str) -> PathBuf {
    certificate_template_dir(seminar_id).join(filename)
}

/// Path to a font file by name, under the configured font directory.
pub fn font_path(font_name: &str) -> PathBuf {
    let dir = PathBuf::from(config::font_dir());
    if dir.is_absolute() {
        dir.join(font_name)
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(dir)
            .join(font_name)
    }
}
