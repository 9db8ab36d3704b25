use std::path::{Path, PathBuf};

/// Directory under the working directory used when no data dir is given.
const DEFAULT_DATA_DIR: &str = ".pipesim";

/// Paths a pipesim invocation reads and writes.
#[derive(Clone, Debug)]
pub struct PipesimContext {
    cwd: PathBuf,
    data_dir: PathBuf,
    log_dir: Option<PathBuf>,
}

impl PipesimContext {
    /// Context rooted at `cwd` with the default `.pipesim` data dir and no
    /// log directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            data_dir: cwd.join(DEFAULT_DATA_DIR),
            cwd,
            log_dir: None,
        }
    }

    /// Context with explicit overrides; `None` falls back to the defaults.
    #[must_use]
    pub fn with_dirs(cwd: PathBuf, data_dir: Option<PathBuf>, log_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(|| cwd.join(DEFAULT_DATA_DIR)),
            cwd,
            log_dir,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// When set, operational logs are written as JSONL files under this path.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// `<data_dir>/pipesim.db`
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("pipesim.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_defaults_under_cwd() {
        let ctx = PipesimContext::new(PathBuf::from("/tmp/work"));
        assert_eq!(ctx.data_dir(), Path::new("/tmp/work/.pipesim"));
        assert_eq!(ctx.db_path(), PathBuf::from("/tmp/work/.pipesim/pipesim.db"));
        assert!(ctx.log_dir().is_none());
    }

    #[test]
    fn explicit_dirs_override_defaults() {
        let ctx = PipesimContext::with_dirs(
            PathBuf::from("/tmp/work"),
            Some(PathBuf::from("/var/pipesim")),
            Some(PathBuf::from("/tmp/logs")),
        );
        assert_eq!(ctx.cwd(), Path::new("/tmp/work"));
        assert_eq!(ctx.db_path(), PathBuf::from("/var/pipesim/pipesim.db"));
        assert_eq!(ctx.log_dir(), Some(Path::new("/tmp/logs")));
    }

    #[test]
    fn missing_overrides_use_defaults() {
        let ctx = PipesimContext::with_dirs(PathBuf::from("/tmp/work"), None, None);
        assert_eq!(ctx.data_dir(), Path::new("/tmp/work/.pipesim"));
    }
}
