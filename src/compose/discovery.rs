use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::warn;
use walkdir::WalkDir;

const WELL_KNOWN: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// Resolve a compose path (from config or CLI) against the project root.
/// Absolute paths are taken as-is.
pub fn normalize_compose_path(root: &Path, compose: impl AsRef<Path>) -> Result<PathBuf> {
    let path = compose.as_ref();
    if path.to_string_lossy().trim().is_empty() {
        bail!("Compose path cannot be blank");
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    if !absolute.is_file() {
        bail!("Compose file not found: {}", absolute.display());
    }
    Ok(absolute)
}

/// Pick the compose file for a project: the explicit path, then the
/// configured one, then the first discovered file. Relative paths are
/// resolved against `root`.
pub fn resolve_compose_path(
    root: &Path,
    explicit: Option<&Path>,
    configured: Option<&str>,
    max_depth: usize,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return normalize_compose_path(root, path);
    }
    if let Some(compose) = configured {
        return normalize_compose_path(root, compose);
    }

    let found = discover_compose(root, max_depth)?;
    let Some(first) = found.first() else {
        bail!("no compose file found under {}", root.display());
    };
    if found.len() > 1 {
        warn!(candidates = ?found, chosen = %first, "several compose files found");
    }
    Ok(root.join(first))
}

/// Short name for `path` in diff headers: relative to `root` when inside it,
/// otherwise the bare file name.
pub fn display_label(root: &Path, path: &Path) -> String {
    if let Ok(rel) = path.strip_prefix(root)
        && !rel.as_os_str().is_empty()
    {
        return rel.to_string_lossy().into_owned();
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Find compose files under `root`. Well-known names at the top level win
/// outright; otherwise the tree is walked for YAML files with a `services`
/// mapping. Returns sorted relative paths.
pub fn discover_compose(root: &Path, max_depth: usize) -> Result<Vec<String>> {
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }
    for name in WELL_KNOWN {
        if root.join(name).is_file() {
            return Ok(vec![name.to_string()]);
        }
    }

    let mut matches = Vec::new();
    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !should_skip(e));

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_yaml(path) && is_compose_file(path) {
            let rel = path
                .strip_prefix(root)
                .context("walked outside the project root")?;
            matches.push(rel.to_string_lossy().to_string());
        }
    }

    matches.sort();
    Ok(matches)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml" | "YAML" | "YML")
    )
}

fn is_compose_file(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(doc) = serde_yaml::from_str::<serde_yaml::Value>(&content) else {
        return false;
    };
    doc.get("services").is_some_and(serde_yaml::Value::is_mapping)
}

fn should_skip(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    matches!(
        entry.file_name().to_str().unwrap_or_default(),
        ".git" | ".draky" | "target" | "node_modules" | ".idea" | ".vscode"
    )
}
