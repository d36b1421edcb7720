use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use suppaftp::FtpStream;
use tracing::info;

use crate::config::FtpConfig;

/// Delivers a finished artifact somewhere
pub trait Publisher {
    fn publish(&self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes artifacts into a local directory
#[derive(Debug, Clone)]
pub struct LocalPublisher {
    dir: PathBuf,
}

impl LocalPublisher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalPublisher { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Publisher for LocalPublisher {
    fn publish(&self, name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;
        let path = self.path_for(name);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;
        info!(path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(())
    }
}

/// Uploads artifacts to an FTP server: connect, log in, cd, store, quit
#[derive(Clone)]
pub struct FtpPublisher {
    host: String,
    port: u16,
    user: String,
    password: String,
    remote_dir: String,
}

impl std::fmt::Debug for FtpPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtpPublisher")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("remote_dir", &self.remote_dir)
            .finish_non_exhaustive()
    }
}

impl FtpPublisher {
    pub fn new(config: &FtpConfig, user: String, password: String) -> Self {
        FtpPublisher {
            host: config.host.clone(),
            port: config.port,
            user,
            password,
            remote_dir: config.remote_dir.clone(),
        }
    }

    /// Credentials come from `FTP_USER` / `FTP_PASS`
    pub fn from_config(config: &FtpConfig) -> Result<Self> {
        let config = config.clone().with_env_overrides();
        if config.host.trim().is_empty() {
            return Err(anyhow!("FTP host is not configured"));
        }
        let user = std::env::var("FTP_USER").context("FTP_USER is not set")?;
        let password = std::env::var("FTP_PASS").context("FTP_PASS is not set")?;
        Ok(Self::new(&config, user, password))
    }
}

impl Publisher for FtpPublisher {
    fn publish(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        info!(host = %addr, "connecting to FTP");
        let mut ftp = FtpStream::connect(&addr)
            .with_context(|| format!("Failed to connect to FTP {}", addr))?;
        ftp.login(&self.user, &self.password).context("FTP login failed")?;
        ftp.cwd(&self.remote_dir)
            .with_context(|| format!("Failed to change FTP directory to {}", self.remote_dir))?;
        info!(dir = %self.remote_dir, "changed FTP directory");

        let mut reader = Cursor::new(bytes);
        ftp.put_file(name, &mut reader)
            .with_context(|| format!("Failed to upload {}", name))?;
        ftp.quit().context("FTP quit failed")?;
        info!(name, bytes = bytes.len(), "artifact uploaded");
        Ok(())
    }
}

/// Publishes to every target in order and stops at the first failure
pub fn publish_all(targets: &[&dyn Publisher], name: &str, bytes: &[u8]) -> Result<()> {
    for target in targets {
        target.publish(name, bytes)?;
    }
    Ok(())
}

/// Writes a JSON copy of any serializable value, e.g. the snapshot
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
