//! logrotate descriptor maintenance
//!
//! The logger does not rotate files itself; it keeps a policy descriptor in
//! the logrotate drop-in directory so the system daemon does. The descriptor
//! is rewritten whole on every enabling change and removed when rotation is
//! switched off. Malformed log paths mean "no rotation", never an error.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// System drop-in directory consumed by the logrotate daemon.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/logrotate.d";

const ROTATE_COUNT: u32 = 4;
const ROTATE_SIZE: &str = "50M";

/// Descriptor path for a log file: `<config_dir>/<basename>.conf`.
/// Returns `None` unless the log path is absolute and names a file.
pub fn descriptor_path(config_dir: &Path, log_path: &Path) -> Option<PathBuf> {
    if !log_path.is_absolute() {
        return None;
    }
    // Path::file_name() normalizes away a trailing separator, which here
    // means "no filename component"
    if log_path.as_os_str().to_string_lossy().ends_with('/') {
        return None;
    }
    let name = log_path.file_name()?;
    Some(config_dir.join(format!("{}.conf", name.to_string_lossy())))
}

/// Bring the descriptor in line with the current configuration. Failures
/// (and removal of an already-absent file) are absorbed.
pub fn apply(config_dir: &Path, log_path: &Path, enabled: bool) {
    let Some(conf) = descriptor_path(config_dir, log_path) else {
        return;
    };
    if enabled {
        let _ = write_descriptor(&conf, &descriptor_contents(log_path));
    } else {
        let _ = fs::remove_file(&conf);
    }
}

fn descriptor_contents(log_path: &Path) -> String {
    format!(
        "{}\n{{\nmissingok\nnotifempty\nnocompress\ncopytruncate\nnodateext\nstart 1\nrotate {}\nsize {}\n}}",
        log_path.display(),
        ROTATE_COUNT,
        ROTATE_SIZE
    )
}

fn write_descriptor(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).truncate(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    let mut file = opts.open(path)?;
    file.write_all(contents.as_bytes())
}
