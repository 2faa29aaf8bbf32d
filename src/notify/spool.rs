use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::error::{Error, Result};

use super::message::{Message, Notifier};

/// Writes each message as a numbered `.eml` file for a mail relay to pick up.
pub struct SpoolNotifier {
    dir: PathBuf,
    next: usize,
}

impl SpoolNotifier {
    /// Creates `dir` if needed; numbering continues after the highest
    /// numbered message still in the spool.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        let mut highest = 0;
        for entry in std::fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
            let path = entry.map_err(|e| Error::io(&dir, e))?.path();
            if path.extension().is_none_or(|ext| ext != "eml") {
                continue;
            }
            if let Some(n) = sequence_number(&path) {
                highest = highest.max(n);
            }
        }
        debug!(dir = %dir.display(), highest, "opened spool");
        Ok(Self {
            dir,
            next: highest + 1,
        })
    }

    /// Spool directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Notifier for SpoolNotifier {
    fn send(&mut self, message: &Message) -> Result<()> {
        let path = self
            .dir
            .join(format!("{:04}-{}.eml", self.next, slug(&message.subject)));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        file.write_all(message.to_rfc822().as_bytes())
            .map_err(|e| Error::io(&path, e))?;
        self.next += 1;
        info!(path = %path.display(), to = ?message.to, subject = %message.subject, "spooled message");
        Ok(())
    }
}

fn sequence_number(path: &Path) -> Option<usize> {
    let name = path.file_name()?.to_str()?;
    let (number, _) = name.split_once('-')?;
    number.parse().ok()
}

fn slug(subject: &str) -> String {
    let mut out = String::new();
    for c in subject.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').chars().take(48).collect()
}
