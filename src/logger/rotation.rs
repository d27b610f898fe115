//! File rotation for the logger

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jiff::Zoned;
use jiff::civil::DateTime;

use crate::logger::compression;
use crate::logger::config::{RotationConfig, RotationStrategy};

/// Decides when the live file rotates and manages the rotated archives
pub struct RotationManager {
    config: RotationConfig,
    /// Start of the period the live file belongs to, for time strategies
    current_period: Option<DateTime>,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self::starting_at(config, Zoned::now().datetime())
    }

    pub fn starting_at(config: RotationConfig, now: DateTime) -> Self {
        let current_period = period_start(config.strategy, now);
        Self {
            config,
            current_period,
        }
    }

    /// Whether the live file must rotate before the next write
    pub fn should_rotate(&self, current_file_size: u64) -> bool {
        self.should_rotate_at(current_file_size, Zoned::now().datetime())
    }

    pub fn should_rotate_at(&self, current_file_size: u64, now: DateTime) -> bool {
        match self.config.strategy {
            RotationStrategy::Size => current_file_size >= self.config.max_size,
            RotationStrategy::Daily | RotationStrategy::Hourly => {
                current_file_size > 0 && period_start(self.config.strategy, now) != self.current_period
            }
        }
    }

    /// Move the live file aside, compress it if configured and prune old archives.
    ///
    /// # Returns
    /// The path of the archive, if a live file existed
    pub fn rotate(&mut self, current_path: &Path) -> io::Result<Option<PathBuf>> {
        let now = Zoned::now();
        self.current_period = period_start(self.config.strategy, now.datetime());

        if !current_path.exists() {
            return Ok(None);
        }

        let suffix = now.strftime("%Y%m%d_%H%M%S").to_string();
        let rotated = unique_rotated_path(current_path, &suffix);
        fs::rename(current_path, &rotated)?;

        let archive = if self.config.compress {
            compression::compress_file(&rotated)?
        } else {
            rotated
        };

        self.prune(current_path)?;
        Ok(Some(archive))
    }

    /// Delete the oldest archives until at most `max_files` remain
    pub fn prune(&self, base_path: &Path) -> io::Result<()> {
        let mut archives = rotated_files(base_path)?;
        archives.sort_by_key(|path| fs::metadata(path).and_then(|m| m.modified()).ok());

        let excess = archives.len().saturating_sub(self.config.max_files);
        for oldest in archives.iter().take(excess) {
            fs::remove_file(oldest)?;
        }
        Ok(())
    }
}

fn period_start(strategy: RotationStrategy, at: DateTime) -> Option<DateTime> {
    match strategy {
        RotationStrategy::Size => None,
        RotationStrategy::Daily => Some(at.date().at(0, 0, 0, 0)),
        RotationStrategy::Hourly => Some(at.date().at(at.hour(), 0, 0, 0)),
    }
}

/// `{stem}.{suffix}.{ext}`, with a counter appended if that name is taken
fn unique_rotated_path(base_path: &Path, suffix: &str) -> PathBuf {
    let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = base_path.extension().map(|e| e.to_string_lossy());

    let name_for = |tag: String| match &ext {
        Some(ext) => format!("{}.{}.{}", stem, tag, ext),
        None => format!("{}.{}", stem, tag),
    };

    let mut candidate = base_path.with_file_name(name_for(suffix.to_string()));
    let mut counter = 1;
    while candidate.exists() || compression::compressed_path(&candidate).exists() {
        candidate = base_path.with_file_name(name_for(format!("{}-{}", suffix, counter)));
        counter += 1;
    }
    candidate
}

/// Archives that belong to `base_path`: siblings named `{stem}.*`
fn rotated_files(base_path: &Path) -> io::Result<Vec<PathBuf>> {
    let parent = match base_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        "{}.",
        base_path.file_stem().unwrap_or_default().to_string_lossy()
    );
    let live_name = base_path.file_name().unwrap_or_default();

    Ok(fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            name != live_name && name.to_string_lossy().starts_with(&prefix)
        })
        .map(|entry| entry.path())
        .collect())
}
