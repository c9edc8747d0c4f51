use std::path::Path;

// ─── Logging setup ───────────────────────────────────────────────────

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

fn rotate_file(path: &Path) {
    if let Ok(meta) = std::fs::metadata(path) {
        if meta.len() >= MAX_LOG_SIZE {
            let old = path.with_extension("old");
            let _ = std::fs::rename(path, old);
        }
    }
}

/// Initialize logging for a host that has no dispatcher of its own: stderr
/// plus `importer.log` in `dir`, rotated once it grows past 10 MB.
///
/// Hosts with their own `log` setup should skip this; initializing twice
/// returns an error.
pub fn init(dir: &Path) -> Result<(), fern::InitError> {
    let log_path = dir.join("importer.log");
    rotate_file(&log_path);

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_millis(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr());

    if let Ok(file) = log_file {
        dispatch = dispatch.chain(file);
    } else {
        eprintln!("Warning: could not open log file {}", log_path.display());
    }

    dispatch.apply()?;
    Ok(())
}
