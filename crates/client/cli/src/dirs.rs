//! Platform-specific directories for logs and journals.
use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "park")
}

/// Log directory, e.g. `~/.cache/park/logs` on Linux.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/park"))
        .join("logs")
}

/// Journal directory, e.g. `~/.local/share/park/journals` on Linux.
pub fn journal_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./park_data"))
        .join("journals")
}
