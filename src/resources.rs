//! Lookup of files shipped next to the program.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const ALARM_SOUND: &str = "alarm.wav";

/// Directory a packaged build extracts its bundled files into.
pub const RESOURCE_DIR_ENV: &str = "SMOKE_ALERT_RESOURCES";

/// Directories searched for bundled files, most specific first.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = env::var_os(RESOURCE_DIR_ENV) {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        dirs.push(dir);
    }
    if let Ok(dir) = env::current_dir() {
        dirs.push(dir);
    }
    dirs
}

/// Resolve `name` to the first existing candidate in `dirs`.
///
/// When nothing exists the first candidate is returned, so a later "not
/// found" error points somewhere meaningful.
pub fn resolve_in(name: &str, dirs: &[PathBuf]) -> PathBuf {
    let candidates: Vec<PathBuf> = dirs.iter().map(|dir| dir.join(name)).collect();

    if let Some(found) = candidates.iter().find(|path| path.exists()) {
        debug!("Resolved {} to {}", name, found.display());
        return found.clone();
    }

    candidates
        .into_iter()
        .next()
        .unwrap_or_else(|| PathBuf::from(name))
}

pub fn resource_path(name: &str) -> PathBuf {
    resolve_in(name, &search_dirs())
}

/// The alarm clip: an explicitly configured file wins over the bundled one.
pub fn alarm_sound_path(configured: Option<&Path>) -> PathBuf {
    match configured {
        Some(path) => path.to_path_buf(),
        None => resource_path(ALARM_SOUND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn first_existing_candidate_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join(ALARM_SOUND), b"RIFF").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(resolve_in(ALARM_SOUND, &dirs), second.path().join(ALARM_SOUND));
    }

    #[test]
    fn earlier_directory_shadows_later() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join(ALARM_SOUND), b"RIFF").unwrap();
        fs::write(second.path().join(ALARM_SOUND), b"RIFF").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(resolve_in(ALARM_SOUND, &dirs), first.path().join(ALARM_SOUND));
    }

    #[test]
    fn missing_file_falls_back_to_first_candidate() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(resolve_in(ALARM_SOUND, &dirs), first.path().join(ALARM_SOUND));
    }

    #[test]
    fn no_dirs_yields_bare_name() {
        assert_eq!(resolve_in(ALARM_SOUND, &[]), PathBuf::from(ALARM_SOUND));
    }

    #[test]
    fn configured_sound_overrides_bundled() {
        let custom = Path::new("/srv/sounds/custom.wav");
        assert_eq!(alarm_sound_path(Some(custom)), custom.to_path_buf());
    }
}
