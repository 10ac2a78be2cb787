#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use sql_query_adapter::logging::{LogContext, QueryLogger};

/// Logger sink that keeps every line for later assertions.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(String, LogContext)>>,
}

impl RecordingLogger {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(line, _)| line.clone())
            .collect()
    }

    pub fn contexts(&self) -> Vec<LogContext> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(_, context)| context.clone())
            .collect()
    }
}

impl QueryLogger for RecordingLogger {
    fn log(&self, line: &str, context: &LogContext) {
        self.lines
            .lock()
            .unwrap()
            .push((line.to_string(), context.clone()));
    }
}
