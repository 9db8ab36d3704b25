use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pipesim_lib::context::PipesimContext;

const LOG_RETENTION_DAYS: i32 = 28;

/// Install a JSONL file subscriber when the context names a log directory.
///
/// Logging is best effort: any setup failure leaves the process without a
/// subscriber and the command still runs.
pub fn init_file_logging(ctx: &PipesimContext) {
    let Some(log_dir) = ctx.log_dir() else {
        return;
    };
    let _ = try_init_file_logging(log_dir, ctx.cwd());
}

fn try_init_file_logging(log_dir: &Path, cwd: &Path) -> anyhow::Result<()> {
    let (dirname, digest) = log_subdir_parts(cwd);
    let subdir_name = format!("{dirname}-{digest}");
    let log_subdir = log_dir.join(&subdir_name);
    fs::create_dir_all(&log_subdir)?;

    let today = jiff::Zoned::now().date();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_subdir.join(format!("{today}.jsonl")))?;

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(Mutex::new(file)))
        .init();

    cleanup_old_logs(&log_subdir, today);

    Ok(())
}

/// `(basename, first 8 hex chars of sha256(path))` for the per-directory
/// log folder, so runs from different directories never share a file.
pub fn log_subdir_parts(dir: &Path) -> (String, String) {
    let dirname = dir.file_name().map_or_else(
        || "unknown".to_string(),
        |n| n.to_string_lossy().into_owned(),
    );

    let mut hasher = Sha256::new();
    hasher.update(dir.to_string_lossy().as_bytes());
    let hash = hasher.finalize();
    let digest = hash.iter().take(4).fold(String::new(), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    });

    (dirname, digest)
}

/// Remove `<date>.jsonl` files at least [`LOG_RETENTION_DAYS`] old.
fn cleanup_old_logs(log_subdir: &Path, today: jiff::civil::Date) {
    let Ok(entries) = fs::read_dir(log_subdir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if ext != "jsonl" {
            continue;
        }
        let Ok(file_date) = stem.parse::<jiff::civil::Date>() else {
            continue;
        };
        if let Ok(span) = today.since(file_date)
            && span.get_days() >= LOG_RETENTION_DAYS
        {
            let _ = fs::remove_file(&path);
        }
    }
}
