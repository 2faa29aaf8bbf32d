//! Station configuration.
//!
//! Read from `~/.net-manager/net-manager.conf`, falling back to
//! `.net-manager.conf` in the working directory. A missing file yields the
//! defaults; a present file that does not parse is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    checkin::classifier::DuplicateScope,
    error::{Error, Result},
};

/// Directory under the home directory holding config and data files.
pub const CONFIG_DIR: &str = ".net-manager";
/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "net-manager.conf";
/// Config file name in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".net-manager.conf";

/// Outgoing mail account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MailConfig {
    /// SMTP relay host.
    pub smtp_host: String,
    /// SMTP relay port.
    pub port: u16,
    /// Account password.
    pub password: String,
    /// Sender address.
    pub email: String,
}

/// The station sending announcements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StationConfig {
    /// Station callsign.
    pub call: String,
    /// Text appended to every message.
    pub signature: String,
    /// Mail account.
    pub mail: MailConfig,
}

/// Recipients of the monthly time report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimeReportConfig {
    /// Primary recipient.
    pub main_mail: String,
    /// Optional carbon copy.
    pub cc_mail: String,
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Sending station.
    pub station: StationConfig,
    /// Directory of weekly net logs.
    pub net_log_directory: PathBuf,
    /// Directory of hospital net logs.
    pub hospital_log_directory: PathBuf,
    /// Club mailing list for announcements.
    pub mailing_list: String,
    /// Time report recipients.
    pub time_report: TimeReportConfig,
    /// Roster CSV export.
    pub roster_file: PathBuf,
    /// Net-control schedule.
    pub netcontrol_schedule_file: PathBuf,
    /// City responsibility schedule.
    pub city_schedule_file: PathBuf,
    /// Directory outgoing messages are spooled to.
    pub outbox_directory: PathBuf,
    /// Duplicate detection scope for check-in logs.
    pub duplicate_scope: DuplicateScope,
    /// Days between nets, used to validate city schedule coverage.
    pub net_cadence_days: u32,
    /// Directory relative data paths resolve against first.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: StationConfig::default(),
            net_log_directory: PathBuf::from("."),
            hospital_log_directory: PathBuf::from("."),
            mailing_list: String::new(),
            time_report: TimeReportConfig::default(),
            roster_file: PathBuf::from("ContactListByName.csv"),
            netcontrol_schedule_file: PathBuf::from("netcontrol_schedule.txt"),
            city_schedule_file: PathBuf::from("city_responsibility_schedule.txt"),
            outbox_directory: PathBuf::from("outbox"),
            duplicate_scope: DuplicateScope::Session,
            net_cadence_days: 7,
            base_dir: None,
        }
    }
}

impl Config {
    /// Parses YAML text.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Loads the config file at `path`; its directory becomes the base for
    /// relative data paths.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_yaml(&text).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Searches the home config directory, then the working directory.
    pub fn discover() -> Result<Self> {
        for candidate in candidate_paths() {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        warn!("no config file found, proceeding with defaults");
        Ok(Self {
            base_dir: home_config_dir(),
            ..Self::default()
        })
    }

    /// Resolves a data file: absolute paths as-is, relative ones against
    /// the config directory when the file exists there, else the working
    /// directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        if let Some(base) = &self.base_dir {
            let joined = base.join(path);
            if joined.exists() {
                return joined;
            }
        }
        path.to_path_buf()
    }

    /// Fails when the station has no sender address.
    pub fn require_sender(&self) -> Result<&str> {
        if self.station.mail.email.is_empty() {
            return Err(Error::Config("station.mail.email is not set".to_string()));
        }
        Ok(&self.station.mail.email)
    }
}

fn home_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR))
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut out = Vec::new();
    match home_config_dir() {
        Some(dir) => out.push(dir.join(CONFIG_FILE)),
        None => warn!("failed to find user home directory, trying working directory"),
    }
    out.push(PathBuf::from(LOCAL_CONFIG_FILE));
    out
}
