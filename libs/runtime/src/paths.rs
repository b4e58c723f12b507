use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the server home directory.
///
/// `None` means `<user home>/<default_subdir>`. A leading `~` is expanded and
/// relative paths are made absolute against the current directory.
pub fn resolve_home_dir(raw: Option<&str>, default_subdir: &str, create: bool) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home"));

    let path = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => user_home()?.join(default_subdir),
        Some("~") => user_home()?,
        Some(p) => match p.strip_prefix("~/") {
            Some(rest) => user_home()?.join(rest),
            None => PathBuf::from(p),
        },
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
    }
    Ok(path)
}
