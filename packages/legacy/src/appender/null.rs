use std::any::Any;

use super::{Appender, AppenderSkeleton};
use crate::LoggingEvent;

/// Discards every event.
pub struct NullAppender {
    skeleton: AppenderSkeleton,
}

impl NullAppender {
    pub fn new(skeleton: AppenderSkeleton) -> Self {
        Self { skeleton }
    }
}

impl Appender for NullAppender {
    fn skeleton(&self) -> &AppenderSkeleton {
        &self.skeleton
    }

    fn append(&self, _event: &LoggingEvent) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
