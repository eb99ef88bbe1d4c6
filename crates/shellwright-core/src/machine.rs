//! Machine detection
//!
//! OS, terminal and distro, read once at startup and used to tailor the
//! system turn.

use std::path::Path;

/// Terminal label for bash outside Windows
pub const LINUX_BASH: &str = "Linux Bash";

/// Terminal label for bash on Windows
pub const WSL_BASH: &str = "WSL Bash";

/// Facts about the machine the agent runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineInfo {
    /// `std::env::consts::OS` value ("linux", "macos", "windows", ...)
    pub os: String,
    /// Terminal label, if a shell could be identified
    pub terminal: Option<String>,
    /// Linux distribution pretty name
    pub distro: Option<String>,
}

impl MachineInfo {
    /// Detect from the current process environment
    #[must_use]
    pub fn detect() -> Self {
        let shell = std::env::var("SHELL")
            .or_else(|_| std::env::var("COMSPEC"))
            .ok();
        let os_release = if cfg!(target_os = "linux") {
            std::fs::read_to_string("/etc/os-release").ok()
        } else {
            None
        };
        Self::from_parts(std::env::consts::OS, shell.as_deref(), os_release.as_deref())
    }

    /// Build from raw inputs
    #[must_use]
    pub fn from_parts(os: &str, shell: Option<&str>, os_release: Option<&str>) -> Self {
        Self {
            os: os.to_string(),
            terminal: shell.map(|s| terminal_label(s, os == "windows")),
            distro: os_release.and_then(pretty_name),
        }
    }

    /// Running on Windows without WSL bash, which the command executor is not written for
    #[must_use]
    pub fn is_unsupported_windows(&self) -> bool {
        self.os == "windows" && self.terminal.as_deref() != Some(WSL_BASH)
    }

    /// Sentences appended to the system turn for this machine
    #[must_use]
    pub fn prompt_context(&self) -> String {
        match self.terminal.as_deref() {
            Some(WSL_BASH) => {
                " You are running under WSL, so both Linux and Windows commands are available."
                    .to_string()
            }
            Some(LINUX_BASH) => match &self.distro {
                Some(distro) => {
                    format!(" You are running on Linux, {distro}, so use Linux commands.")
                }
                None => " You are running on Linux, so use Linux commands.".to_string(),
            },
            Some(other) => format!(" The user's shell is {other} on {}.", self.os),
            None => String::new(),
        }
    }
}

/// "Linux Bash" / "WSL Bash" for any bash, otherwise the shell's file name
#[must_use]
pub fn terminal_label(shell: &str, is_windows: bool) -> String {
    if shell.contains("bash") {
        return if is_windows { WSL_BASH } else { LINUX_BASH }.to_string();
    }
    // Windows paths use backslashes even when parsed on another platform
    let name = shell.rsplit(['/', '\\']).next().unwrap_or(shell);
    Path::new(name)
        .file_name()
        .map_or_else(|| name.to_string(), |n| n.to_string_lossy().into_owned())
}

/// `PRETTY_NAME` from `/etc/os-release` contents
#[must_use]
pub fn pretty_name(os_release: &str) -> Option<String> {
    os_release.lines().find_map(|line| {
        let value = line.strip_prefix("PRETTY_NAME=")?;
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}
