//! Home-marker expansion and lexical path normalization
//!
//! Shared by the file and command executors so `~` means the same directory
//! in both.

use std::path::{Component, Path, PathBuf};

fn is_separator(c: char) -> bool {
    c == '/' || c == std::path::MAIN_SEPARATOR
}

/// Replace a leading `~` (alone or followed by a separator) with the home directory
///
/// `~user` forms are returned unchanged.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    if !(rest.is_empty() || rest.starts_with(is_separator)) {
        return PathBuf::from(path);
    }
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    let rest = rest.trim_start_matches(is_separator);
    if rest.is_empty() {
        home
    } else {
        home.join(rest)
    }
}

/// Expand home, make absolute against the current directory, then resolve
/// `.` and `..` without touching the filesystem
#[must_use]
pub fn normalize_path(path: &str) -> PathBuf {
    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    lexical_clean(&absolute)
}

fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Expand a home marker at the very start of a command line
///
/// Only a leading `~` (alone or followed by a separator or whitespace) is
/// replaced. Later `~` characters belong to the shell, which expands unquoted
/// ones itself and must see quoted ones untouched.
#[must_use]
pub fn expand_home_in_command(command: &str) -> String {
    let Some(rest) = command.strip_prefix('~') else {
        return command.to_string();
    };
    if !rest.chars().next().is_none_or(|c| is_separator(c) || c.is_whitespace()) {
        return command.to_string();
    }
    match dirs::home_dir() {
        Some(home) => format!("{}{rest}", home.to_string_lossy()),
        None => command.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> PathBuf {
        dirs::home_dir().unwrap()
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("~"), home());
        assert_eq!(expand_home("~/notes/a.txt"), home().join("notes/a.txt"));
        assert_eq!(expand_home("~bob/a"), PathBuf::from("~bob/a"));
        assert_eq!(expand_home("/tmp/a"), PathBuf::from("/tmp/a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_path_resolves_dots() {
        assert_eq!(normalize_path("/tmp/a/../b/./c"), PathBuf::from("/tmp/b/c"));
        assert_eq!(normalize_path("/../x"), PathBuf::from("/x"));
    }

    #[test]
    fn test_normalize_path_relative_is_absolute() {
        let normalized = normalize_path("some/file.txt");
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("some/file.txt"));
    }

    #[test]
    fn test_normalize_matches_command_expansion() {
        let file_side = normalize_path("~/x.txt");
        let cmd_side = expand_home_in_command("~/x.txt");
        assert_eq!(file_side, PathBuf::from(cmd_side));
    }

    #[test]
    fn test_expand_home_in_command() {
        let h = home().to_string_lossy().into_owned();
        assert_eq!(expand_home_in_command("~/bin/tool --flag"), format!("{h}/bin/tool --flag"));
        assert_eq!(expand_home_in_command("~"), h);
        assert_eq!(expand_home_in_command("~bob/run"), "~bob/run");
        assert_eq!(expand_home_in_command("echo hi"), "echo hi");
    }

    #[test]
    fn test_inner_tilde_is_left_to_the_shell() {
        assert_eq!(
            expand_home_in_command("awk '$1 ~ /x/' log"),
            "awk '$1 ~ /x/' log"
        );
        assert_eq!(expand_home_in_command("echo \"a ~ b\""), "echo \"a ~ b\"");
        assert_eq!(expand_home_in_command("ls ~/docs"), "ls ~/docs");
    }
}
