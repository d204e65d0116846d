use std::any::Any;
use std::io::Write;
use std::str::FromStr;

use super::{Appender, AppenderSkeleton};
use crate::{Error, LoggingEvent};

/// Which standard stream a [`ConsoleAppender`] writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    Out,
    Err,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Out => "System.out",
            Target::Err => "System.err",
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("System.out") => Ok(Target::Out),
            t if t.eq_ignore_ascii_case("System.err") => Ok(Target::Err),
            other => Err(format!("[{}] should be System.out or System.err", other)),
        }
    }
}

/// Writes rendered events to stdout or stderr.
pub struct ConsoleAppender {
    skeleton: AppenderSkeleton,
    target: Target,
    follow: bool,
}

impl ConsoleAppender {
    pub fn new(skeleton: AppenderSkeleton, target: Target) -> Self {
        Self {
            skeleton,
            target,
            follow: false,
        }
    }

    /// Accepted for compatibility; output always follows the live stream.
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    fn write(&self, text: &str) {
        let result = match self.target {
            Target::Out => std::io::stdout().lock().write_all(text.as_bytes()),
            Target::Err => std::io::stderr().lock().write_all(text.as_bytes()),
        };
        if let Err(err) = result {
            log::warn!("Console appender [{}] failed to write: {}", self.name(), err);
        }
    }
}

impl Appender for ConsoleAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.skeleton
    }

    fn append(&self, event: &LoggingEvent) {
        self.write(&self.skeleton.render(event));
    }

    fn activate_options(&self) -> Result<(), Error> {
        if self.skeleton.activate() {
            if let Some(header) = self.layout().and_then(|l| l.header()) {
                self.write(&header);
            }
        }
        Ok(())
    }

    fn close(&self) {
        if self.skeleton.close() {
            if let Some(footer) = self.layout().and_then(|l| l.footer()) {
                self.write(&footer);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
