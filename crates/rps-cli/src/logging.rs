use std::{fs::OpenOptions, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or("info"))
}

/// Logs to standard error, for commands that do not take over the terminal.
pub fn init_stderr() -> anyhow::Result<()> {
    builder().target(Target::Stderr).try_init()?;
    Ok(())
}

/// Appends logs to `path`, creating the file and its directory as needed.
pub fn init_file(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    builder().target(Target::Pipe(Box::new(file))).try_init()?;
    Ok(())
}
