use std::any::Any;
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeZone};

use super::{Appender, AppenderSkeleton};
use crate::layout::to_chrono_format;
use crate::{Error, LoggingEvent};

const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;
const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_BACKUP_INDEX: u32 = 1;

/// Rolls over at midnight, naming the old file `file.yyyy-MM-dd`.
pub const DEFAULT_DATE_PATTERN: &str = "'.'yyyy-MM-dd";

/// Parse a size such as `512`, `10KB`, `5MB` or `1GB` (case-insensitive).
///
/// Sizes that do not fit in a `u64` are rejected.
///
/// ```rust
/// use logbridge_legacy::appender::parse_file_size;
///
/// assert_eq!(parse_file_size("10KB"), Some(10 * 1024));
/// assert_eq!(parse_file_size("lots"), None);
/// ```
pub fn parse_file_size(value: &str) -> Option<u64> {
    let upper = value.trim().to_ascii_uppercase();
    let (digits, multiplier) = if let Some(d) = upper.strip_suffix("KB") {
        (d, 1024)
    } else if let Some(d) = upper.strip_suffix("MB") {
        (d, 1024 * 1024)
    } else if let Some(d) = upper.strip_suffix("GB") {
        (d, 1024 * 1024 * 1024)
    } else {
        (upper.as_str(), 1)
    };
    digits
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
}

struct Sink {
    writer: BufWriter<File>,
    written: u64,
}

/// Writes rendered events to a file.
pub struct FileAppender {
    skeleton: AppenderSkeleton,
    path: PathBuf,
    append: bool,
    buffered_io: bool,
    buffer_size: usize,
    sink: Mutex<Option<Sink>>,
}

impl FileAppender {
    pub fn new(skeleton: AppenderSkeleton, path: impl Into<PathBuf>) -> Self {
        Self {
            skeleton,
            path: path.into(),
            append: true,
            buffered_io: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            sink: Mutex::new(None),
        }
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Hold output in memory until the buffer fills or the file closes.
    pub fn with_buffered_io(mut self, buffered_io: bool) -> Self {
        self.buffered_io = buffered_io;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_append(&self) -> bool {
        self.append
    }

    pub fn is_buffered_io(&self) -> bool {
        self.buffered_io
    }

    fn lock(&self) -> MutexGuard<'_, Option<Sink>> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn open(&self, append: bool) -> Result<Sink, Error> {
        let open_error = |source| Error::Open {
            appender: self.name().to_string(),
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&self.path)
            .map_err(open_error)?;
        let written = if append {
            file.metadata().map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };
        let mut sink = Sink {
            writer: BufWriter::with_capacity(self.buffer_size, file),
            written,
        };
        if let Some(header) = self.layout().and_then(|l| l.header()) {
            self.write_to(&mut sink, &header);
        }
        Ok(sink)
    }

    fn write_to(&self, sink: &mut Sink, text: &str) {
        let result = sink.writer.write_all(text.as_bytes()).and_then(|()| {
            if self.buffered_io {
                Ok(())
            } else {
                sink.writer.flush()
            }
        });
        match result {
            Ok(()) => sink.written += text.len() as u64,
            Err(err) => log::warn!(
                "Failed to write to [{}] for appender [{}]: {}",
                self.path.display(),
                self.name(),
                err
            ),
        }
    }

    fn finish(&self, mut sink: Sink) {
        if let Some(footer) = self.layout().and_then(|l| l.footer()) {
            self.write_to(&mut sink, &footer);
        }
        if let Err(err) = sink.writer.flush() {
            log::warn!("Failed to flush [{}]: {}", self.path.display(), err);
        }
    }

    /// Write `text`, then let `after` inspect the open sink.
    fn write_then(&self, text: &str, after: impl FnOnce(&mut Option<Sink>)) {
        let mut guard = self.lock();
        match guard.as_mut() {
            Some(sink) => self.write_to(sink, text),
            None => {
                log::warn!("No output stream or file set for the appender named [{}]", self.name());
                return;
            }
        }
        after(&mut *guard);
    }
}

impl Appender for FileAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.skeleton
    }

    fn append(&self, event: &LoggingEvent) {
        self.write_then(&self.skeleton.render(event), |_| {});
    }

    fn activate_options(&self) -> Result<(), Error> {
        let mut guard = self.lock();
        if let Some(old) = guard.take() {
            self.finish(old);
        }
        *guard = Some(self.open(self.append)?);
        self.skeleton.activate();
        Ok(())
    }

    fn close(&self) {
        if self.skeleton.close() {
            if let Some(sink) = self.lock().take() {
                self.finish(sink);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A [`FileAppender`] that rolls the file over once it reaches a size.
///
/// On rollover `file.N-1` becomes `file.N` down to `file` becoming `file.1`;
/// the oldest backup beyond `max_backup_index` is deleted. With no backups
/// the file is simply truncated.
pub struct RollingFileAppender {
    file: FileAppender,
    max_file_size: u64,
    max_backup_index: u32,
}

impl RollingFileAppender {
    pub fn new(file: FileAppender) -> Self {
        Self {
            file,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_backup_index: DEFAULT_MAX_BACKUP_INDEX,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size.max(1);
        self
    }

    pub fn with_max_backup_index(mut self, max_backup_index: u32) -> Self {
        self.max_backup_index = max_backup_index;
        self
    }

    pub fn file(&self) -> &FileAppender {
        &self.file
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn max_backup_index(&self) -> u32 {
        self.max_backup_index
    }

    fn backup(&self, index: u32) -> PathBuf {
        let mut name = self.file.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn roll_over(&self, slot: &mut Option<Sink>) {
        if let Some(sink) = slot.take() {
            self.file.finish(sink);
        }
        if self.max_backup_index > 0 {
            let oldest = self.backup(self.max_backup_index);
            if oldest.exists() {
                if let Err(err) = fs::remove_file(&oldest) {
                    log::warn!("Failed to delete [{}]: {}", oldest.display(), err);
                }
            }
            for index in (1..self.max_backup_index).rev() {
                let from = self.backup(index);
                if from.exists() {
                    if let Err(err) = fs::rename(&from, self.backup(index + 1)) {
                        log::warn!("Failed to rename [{}]: {}", from.display(), err);
                    }
                }
            }
            if let Err(err) = fs::rename(&self.file.path, self.backup(1)) {
                log::warn!("Failed to rename [{}]: {}", self.file.path.display(), err);
            }
        }
        match self.file.open(false) {
            Ok(sink) => *slot = Some(sink),
            Err(err) => log::error!("Rollover failed: {}", err),
        }
    }
}

impl Appender for RollingFileAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.file.skeleton
    }

    fn append(&self, event: &LoggingEvent) {
        let text = self.file.skeleton.render(event);
        self.file.write_then(&text, |slot| {
            let full = slot
                .as_ref()
                .is_some_and(|sink| sink.written >= self.max_file_size);
            if full {
                log::debug!("Rolling over [{}]", self.file.path.display());
                self.roll_over(slot);
            }
        });
    }

    fn activate_options(&self) -> Result<(), Error> {
        self.file.activate_options()
    }

    fn close(&self) {
        self.file.close()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A [`FileAppender`] that rolls the file over when the period named by
/// its date pattern changes.
///
/// The pattern is a `SimpleDateFormat` pattern whose rendering is appended to
/// the file name of the finished period, so `'.'yyyy-MM-dd-HH` rolls hourly
/// into `file.2024-01-31-17`. Periods are taken from event timestamps in
/// local time. A file that was freshly created or truncated on activation
/// starts its period with the first event it receives.
pub struct DailyRollingFileAppender {
    file: FileAppender,
    date_pattern: String,
    format: String,
    period: Mutex<Option<String>>,
}

impl DailyRollingFileAppender {
    pub fn new(file: FileAppender) -> Self {
        Self {
            file,
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            format: to_chrono_format(DEFAULT_DATE_PATTERN),
            period: Mutex::new(None),
        }
    }

    pub fn with_date_pattern(mut self, date_pattern: impl Into<String>) -> Self {
        self.date_pattern = date_pattern.into();
        self.format = to_chrono_format(&self.date_pattern);
        self
    }

    pub fn file(&self) -> &FileAppender {
        &self.file
    }

    pub fn date_pattern(&self) -> &str {
        &self.date_pattern
    }

    /// The file name suffix for the period containing `time`.
    pub fn suffix_at<Tz>(&self, time: DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut suffix = String::new();
        match write!(suffix, "{}", time.format(&self.format)) {
            Ok(()) => Some(suffix),
            Err(_) => {
                log::warn!(
                    "DatePattern [{}] of appender [{}] cannot be rendered",
                    self.date_pattern,
                    self.file.name()
                );
                None
            }
        }
    }

    fn suffix_at_millis(&self, millis: i64) -> Option<String> {
        Local
            .timestamp_millis_opt(millis)
            .single()
            .and_then(|time| self.suffix_at(time))
    }

    fn dated(&self, suffix: &str) -> PathBuf {
        let mut name = self.file.path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn lock_period(&self) -> MutexGuard<'_, Option<String>> {
        self.period.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn roll_over(&self, slot: &mut Option<Sink>, finished: &str) {
        if let Some(sink) = slot.take() {
            self.file.finish(sink);
        }
        let target = self.dated(finished);
        if target.exists() {
            if let Err(err) = fs::remove_file(&target) {
                log::warn!("Failed to delete [{}]: {}", target.display(), err);
            }
        }
        if let Err(err) = fs::rename(&self.file.path, &target) {
            log::warn!(
                "Failed to rename [{}] to [{}]: {}",
                self.file.path.display(),
                target.display(),
                err
            );
        }
        match self.file.open(false) {
            Ok(sink) => *slot = Some(sink),
            Err(err) => log::error!("Rollover failed: {}", err),
        }
    }
}

impl Appender for DailyRollingFileAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.file.skeleton
    }

    fn append(&self, event: &LoggingEvent) {
        if let Some(current) = self.suffix_at_millis(event.time_stamp) {
            let mut slot = self.file.lock();
            let mut period = self.lock_period();
            match period.replace(current.clone()) {
                Some(finished) if finished != current && slot.is_some() => {
                    log::debug!(
                        "Rolling over [{}] to [{}]",
                        self.file.path.display(),
                        self.dated(&finished).display()
                    );
                    self.roll_over(&mut *slot, &finished);
                }
                _ => {}
            }
        }
        self.file
            .write_then(&self.file.skeleton.render(event), |_| {});
    }

    fn activate_options(&self) -> Result<(), Error> {
        // Content kept from an earlier run belongs to the period it was last written in
        let kept = if self.file.append {
            fs::metadata(&self.file.path)
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| self.suffix_at(DateTime::<Local>::from(modified)))
        } else {
            None
        };
        self.file.activate_options()?;
        *self.lock_period() = kept;
        Ok(())
    }

    fn close(&self) {
        self.file.close()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
