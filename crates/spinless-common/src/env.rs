//! Injectable view of the host environment.
//!
//! Path translation and default-location discovery depend on the platform,
//! environment variables, and whether we run under WSL. Everything that looks
//! at the host goes through [`Environment`] so the pipeline can be driven by a
//! [`StaticEnvironment`] in tests.

use std::collections::HashMap;
use std::path::PathBuf;

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }
}

/// Host environment capabilities used by path resolution and discovery.
pub trait Environment: Send + Sync {
    /// Operating system family.
    fn platform(&self) -> Platform;

    /// Kernel release string (`uname -r`), if known.
    fn kernel_release(&self) -> Option<String>;

    /// Value of an environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Whether we run inside Windows Subsystem for Linux.
    fn is_wsl(&self) -> bool {
        self.kernel_release()
            .map(|release| release.to_lowercase().contains("microsoft"))
            .unwrap_or(false)
    }

    /// Per-user configuration directory.
    ///
    /// `%APPDATA%` on Windows, `~/Library/Application Support` on macOS,
    /// `$XDG_CONFIG_HOME` or `~/.config` elsewhere.
    fn config_dir(&self) -> Option<PathBuf> {
        match self.platform() {
            Platform::Windows => self
                .var("APPDATA")
                .map(PathBuf::from)
                .or_else(|| self.home_dir()),
            Platform::MacOs => self
                .home_dir()
                .map(|home| home.join("Library").join("Application Support")),
            Platform::Linux | Platform::Other => self
                .var("XDG_CONFIG_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .or_else(|| self.home_dir().map(|home| home.join(".config"))),
        }
    }
}

/// The real host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn kernel_release(&self) -> Option<String> {
        if Platform::current() != Platform::Linux {
            return None;
        }
        std::fs::read_to_string("/proc/sys/kernel/osrelease")
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// A fixed environment, mainly for tests.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub platform: Platform,
    pub kernel_release: Option<String>,
    pub vars: HashMap<String, String>,
    pub home: Option<PathBuf>,
}

impl StaticEnvironment {
    /// A plain Linux host with the given home directory.
    pub fn linux(home: impl Into<PathBuf>) -> Self {
        Self {
            platform: Platform::Linux,
            kernel_release: Some("6.1.0-generic".to_string()),
            vars: HashMap::new(),
            home: Some(home.into()),
        }
    }

    /// A WSL2 host with the given home directory.
    pub fn wsl(home: impl Into<PathBuf>) -> Self {
        Self {
            kernel_release: Some("5.15.153.1-microsoft-standard-WSL2".to_string()),
            ..Self::linux(home)
        }
    }

    /// Set an environment variable.
    pub fn with_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }
}

impl Environment for StaticEnvironment {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn kernel_release(&self) -> Option<String> {
        self.kernel_release.clone()
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wsl_detection() {
        assert!(StaticEnvironment::wsl("/home/me").is_wsl());
        assert!(!StaticEnvironment::linux("/home/me").is_wsl());

        let env = StaticEnvironment {
            kernel_release: Some("4.4.0-19041-Microsoft".to_string()),
            ..StaticEnvironment::linux("/home/me")
        };
        assert!(env.is_wsl());
    }

    #[test]
    fn test_config_dir_linux() {
        let env = StaticEnvironment::linux("/home/me");
        assert_eq!(env.config_dir(), Some(PathBuf::from("/home/me/.config")));

        let env = env.with_var("XDG_CONFIG_HOME", "/xdg");
        assert_eq!(env.config_dir(), Some(PathBuf::from("/xdg")));
    }

    #[test]
    fn test_config_dir_macos() {
        let env = StaticEnvironment {
            platform: Platform::MacOs,
            ..StaticEnvironment::linux("/Users/me")
        };
        assert_eq!(
            env.config_dir(),
            Some(PathBuf::from("/Users/me/Library/Application Support"))
        );
    }

    #[test]
    fn test_config_dir_windows() {
        let env = StaticEnvironment {
            platform: Platform::Windows,
            ..StaticEnvironment::linux("C:/Users/me")
        }
        .with_var("APPDATA", "C:/Users/me/AppData/Roaming");
        assert_eq!(
            env.config_dir(),
            Some(PathBuf::from("C:/Users/me/AppData/Roaming"))
        );
    }
}
