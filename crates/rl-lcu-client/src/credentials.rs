// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Locating the control API port and password
//!
//! While running, the client writes a lockfile into its install directory:
//!
//! ```text
//! LeagueClient:<pid>:<port>:<password>:<protocol>
//! ```
//!
//! The UX process also carries the same data on its command line as
//! `--app-port=<port>` and `--remoting-auth-token=<password>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::auth::{AuthConfig, DEFAULT_USERNAME};
use crate::error::{LcuError, LcuResult};

/// The API only ever listens on loopback
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

const APP_PORT_FLAG: &str = "--app-port=";
const AUTH_TOKEN_FLAG: &str = "--remoting-auth-token=";

/// Everything needed to reach the control API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub protocol: String,
    pub address: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(protocol: impl Into<String>, port: u16, password: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            address: LOOPBACK_ADDRESS.to_string(),
            port,
            username: DEFAULT_USERNAME.to_string(),
            password: password.into(),
        }
    }

    /// Parse lockfile contents
    pub fn from_lockfile(content: &str) -> LcuResult<Self> {
        let parts: Vec<&str> = content.trim().split(':').collect();
        if parts.len() != 5 {
            return Err(LcuError::Lockfile(format!(
                "expected 5 ':'-separated fields, got {}",
                parts.len()
            )));
        }

        let port = parts[2]
            .parse::<u16>()
            .map_err(|_| LcuError::Lockfile(format!("invalid port '{}'", parts[2])))?;
        let password = parts[3];
        if password.is_empty() {
            return Err(LcuError::Lockfile("empty password".to_string()));
        }
        let protocol = match parts[4] {
            "http" | "https" => parts[4],
            other => return Err(LcuError::Lockfile(format!("unknown protocol '{}'", other))),
        };

        Ok(Self::new(protocol, port, password))
    }

    /// Extract credentials from a client process command line
    pub fn from_command_line<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        let mut port = None;
        let mut password = None;
        for arg in args {
            let arg = arg.as_ref().trim_matches('"');
            if let Some(value) = arg.strip_prefix(APP_PORT_FLAG) {
                port = value.parse::<u16>().ok();
            } else if let Some(value) = arg.strip_prefix(AUTH_TOKEN_FLAG) {
                password = Some(value.to_string()).filter(|v| !v.is_empty());
            }
        }

        Some(Self::new("https", port?, password?))
    }

    pub fn base_url(&self) -> LcuResult<Url> {
        Ok(Url::parse(&format!(
            "{}://{}:{}/",
            self.protocol, self.address, self.port
        ))?)
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig::basic(&self.username, &self.password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("protocol", &self.protocol)
            .field("address", &self.address)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &rl_logging::redact(&self.password))
            .finish()
    }
}

/// Somewhere credentials may be found
///
/// `Ok(None)` means "not there yet"; the connector keeps retrying.
pub trait CredentialSource: Send + Sync {
    fn discover(&self) -> LcuResult<Option<Credentials>>;
}

/// Reads the first lockfile that exists among the given paths
#[derive(Debug, Clone)]
pub struct LockfileSource {
    paths: Vec<PathBuf>,
}

impl LockfileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Lockfile locations for a default install on this platform
    pub fn default_locations() -> Self {
        Self::new(default_lockfile_paths())
    }

    fn read(path: &Path) -> LcuResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            // The client deletes the lockfile on exit; a vanished file is "not yet"
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LcuError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl CredentialSource for LockfileSource {
    fn discover(&self) -> LcuResult<Option<Credentials>> {
        for path in &self.paths {
            let Some(content) = Self::read(path)? else {
                continue;
            };
            debug!(path = %path.display(), "Found lockfile");
            return Credentials::from_lockfile(&content).map(Some);
        }
        Ok(None)
    }
}

/// Tries each source in order and returns the first hit
#[derive(Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl CredentialSource for SourceChain {
    fn discover(&self) -> LcuResult<Option<Credentials>> {
        let mut last_error = None;
        for source in &self.sources {
            match source.discover() {
                Ok(Some(credentials)) => return Ok(Some(credentials)),
                Ok(None) => {}
                Err(e) => {
                    debug!(error = %e, "Credential source failed, trying next");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

/// Known lockfile locations for a default install
pub fn default_lockfile_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        [
            r"C:\Riot Games\League of Legends\lockfile",
            r"D:\Riot Games\League of Legends\lockfile",
            r"C:\Program Files\Riot Games\League of Legends\lockfile",
            r"C:\Program Files (x86)\Riot Games\League of Legends\lockfile",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }

    #[cfg(target_os = "macos")]
    {
        vec![PathBuf::from(
            "/Applications/League of Legends.app/Contents/LoL/lockfile",
        )]
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Vec::new()
    }
}
