use std::sync::Mutex;

/// Where the client sends the user when the session ends
pub trait Navigator: Send + Sync {
    fn redirect_to(&self, path: &str);
}

/// Headless navigator: records the redirect in the log and nothing else
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect_to(&self, path: &str) {
        tracing::info!("Redirecting to {}", path);
    }
}

/// Keeps every redirect it was asked to perform, newest last
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to(&self, path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}
