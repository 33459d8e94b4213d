//! Preservation of zero-yield response bodies.
//!
//! When a fetch strategy parses to zero rows the raw body is written out,
//! named by draw number and strategy tag, so markup drift can be diagnosed
//! offline. Writes are best-effort: a failing dump never disturbs the run.

use std::path::PathBuf;

pub struct DebugDump {
    dir: Option<PathBuf>,
}

impl DebugDump {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// A dump that drops everything; used by tests and dry runs.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { dir: None }
    }

    /// Preserve the body of a zero-yield detail/archive fetch for a draw.
    pub async fn save_draw(&self, draw_no: u32, tag: &str, body: &str) {
        self.write(format!("draw_{draw_no:04}_{tag}.html"), body)
            .await;
    }

    /// Preserve the body of a zero-yield store-directory page.
    pub async fn save_store_page(&self, sido: &str, gugun: &str, page: u32, tag: &str, body: &str) {
        self.write(format!("stores_{sido}_{gugun}_p{page}_{tag}.html"), body)
            .await;
    }

    async fn write(&self, name: String, body: &str) {
        let Some(dir) = &self.dir else { return };
        if let Err(err) = tokio::fs::create_dir_all(dir).await {
            tracing::debug!(dir = %dir.display(), error = %err, "could not create debug dump directory");
            return;
        }
        let path = dir.join(name);
        match tokio::fs::write(&path, body).await {
            Ok(()) => tracing::debug!(path = %path.display(), "preserved zero-yield response body"),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "could not write debug dump");
            }
        }
    }
}
