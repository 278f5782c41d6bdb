//! File upload through the native input or the synthetic drop.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::By;
use crate::script;
use crate::wait::Condition;

use super::Interactor;

// ============================================================================
// Interactor - Upload
// ============================================================================

impl Interactor {
    /// Uploads one file through the located element.
    ///
    /// A true native file input receives the path directly; anything else
    /// goes through the synthetic drag-and-drop sequence.
    ///
    /// # Example
    ///
    /// ```ignore
    /// interactor
    ///     .upload_file(&By::id("avatar"), Path::new("fixtures/avatar.png"))
    ///     .await?;
    /// ```
    pub async fn upload_file(&self, by: &By, path: &Path) -> Result<()> {
        self.upload_file_timeout(by, path, self.default_timeout())
            .await
    }

    /// Single-file upload with an explicit resolution timeout.
    pub async fn upload_file_timeout(&self, by: &By, path: &Path, timeout: Duration) -> Result<()> {
        self.upload(by, &[path], false, timeout).await
    }

    /// Uploads several files through the located element.
    ///
    /// The direct path additionally requires the element to expose a
    /// `multiple` capability that is not explicitly disabled; otherwise
    /// the synthetic drop carries all files at once.
    pub async fn upload_files(&self, by: &By, paths: &[PathBuf]) -> Result<()> {
        self.upload_files_timeout(by, paths, self.default_timeout())
            .await
    }

    /// Multi-file upload with an explicit resolution timeout.
    pub async fn upload_files_timeout(
        &self,
        by: &By,
        paths: &[PathBuf],
        timeout: Duration,
    ) -> Result<()> {
        let refs: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        self.upload(by, &refs, true, timeout).await
    }

    async fn upload(
        &self,
        by: &By,
        paths: &[&Path],
        multiple: bool,
        timeout: Duration,
    ) -> Result<()> {
        let payload = joined_paths(paths)?;
        let element = self.resolve(by, &Condition::present(), timeout).await?;

        let direct = if multiple {
            script::is_native_file_input(self.session(), &element).await?
                && script::accepts_direct_multi_upload(self.session(), &element).await?
        } else {
            script::is_native_file_input(self.session(), &element).await?
        };

        if direct {
            debug!(selector = %by, files = paths.len(), "Uploading through native file input");
            return self.session().send_keys(&element, &payload).await;
        }

        debug!(selector = %by, files = paths.len(), "Uploading through synthetic drop");
        let marker = script::plant_upload_input(self.session(), &element, multiple).await?;
        let input = self
            .resolve(&By::id(marker), &Condition::present(), timeout)
            .await?;
        self.session().send_keys(&input, &payload).await
    }
}

/// Joins the paths newline-separated, the form a file input accepts for
/// multi-file assignment.
fn joined_paths(paths: &[&Path]) -> Result<String> {
    if paths.is_empty() {
        return Err(Error::invalid_argument("no file paths supplied"));
    }
    let mut parts = Vec::with_capacity(paths.len());
    for path in paths {
        let part = path.to_str().ok_or_else(|| {
            Error::invalid_argument(format!("file path is not valid UTF-8: {}", path.display()))
        })?;
        parts.push(part);
    }
    Ok(parts.join("\n"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::config::InteractorConfig;
    use crate::mock::{MockSession, SessionCall};
    use crate::session::ScriptArg;

    fn fast() -> InteractorConfig {
        InteractorConfig::new()
            .with_wait_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(100))
    }

    fn sent_keys(session: &MockSession) -> Vec<(String, String)> {
        session
            .calls()
            .iter()
            .filter_map(|c| match c {
                SessionCall::SendKeys(id, text) => Some((id.clone(), text.clone())),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_upload_direct_into_file_input() {
        let session = MockSession::new();
        let input = session.add_element("#avatar", |e| {
            e.with_tag("input").with_attribute("type", "file")
        });
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        interactor
            .upload_file(&By::css("#avatar"), Path::new("/tmp/avatar.png"))
            .await
            .unwrap();

        assert_eq!(
            sent_keys(&session),
            vec![(input.id().to_string(), "/tmp/avatar.png".to_string())]
        );
        assert!(session.scripts_matching("markerId").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_upload_synthetic_for_dropzone() {
        let session = MockSession::new();
        let dropzone = session.add_element("#dropzone", |e| e);
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        interactor
            .upload_file(&By::css("#dropzone"), Path::new("/tmp/report.pdf"))
            .await
            .unwrap();

        let plants = session.scripts_matching("input.id = markerId");
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].args[1], ScriptArg::Value(json!(false)));

        // The path goes into the planted input, never the dropzone.
        let keys = sent_keys(&session);
        assert_eq!(keys.len(), 1);
        assert_ne!(keys[0].0, dropzone.id());
        assert_eq!(keys[0].1, "/tmp/report.pdf");
    }

    #[tokio::test(start_paused = true)]
    async fn test_multi_upload_direct_with_multiple_capability() {
        let session = MockSession::new();
        let input = session.add_element("#gallery", |e| {
            e.with_tag("input")
                .with_attribute("type", "file")
                .with_property("multiple", json!(true))
        });
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let paths = vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")];
        interactor
            .upload_files(&By::css("#gallery"), &paths)
            .await
            .unwrap();

        assert_eq!(
            sent_keys(&session),
            vec![(input.id().to_string(), "/tmp/a.png\n/tmp/b.png".to_string())]
        );
        assert!(session.scripts_matching("markerId").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_multi_upload_synthetic_when_multiple_disabled() {
        let session = MockSession::new();
        session.add_element("#gallery", |e| {
            e.with_tag("input")
                .with_attribute("type", "file")
                .with_property("multiple", json!("false"))
        });
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let paths = vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")];
        interactor
            .upload_files(&By::css("#gallery"), &paths)
            .await
            .unwrap();

        let plants = session.scripts_matching("input.id = markerId");
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].args[1], ScriptArg::Value(json!(true)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_multi_upload_synthetic_without_multiple_capability() {
        let session = MockSession::new();
        session.add_element("#gallery", |e| {
            e.with_tag("input").with_attribute("type", "file")
        });
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let paths = vec![PathBuf::from("/tmp/a.png")];
        interactor
            .upload_files(&By::css("#gallery"), &paths)
            .await
            .unwrap();

        assert_eq!(session.scripts_matching("markerId").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_rejects_empty_path_list() {
        let session = MockSession::new();
        session.add_element("#gallery", |e| e);
        let interactor = Interactor::with_config(session.clone(), fast()).unwrap();

        let err = interactor
            .upload_files(&By::css("#gallery"), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(session.total_finds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_missing_target_is_not_found() {
        let session = MockSession::new();
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let err = interactor
            .upload_file_timeout(
                &By::css("#ghost"),
                Path::new("/tmp/a.png"),
                Duration::from_millis(200),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
    }
}
