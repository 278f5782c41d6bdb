//! Download verification and download-directory upkeep.

use std::path::Path;
use std::time::Duration;

use tokio::fs;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::By;

use super::Interactor;

// ============================================================================
// Constants
// ============================================================================

/// Default wait for a download to appear (15 seconds).
const DEFAULT_DOWNLOAD_WAIT: Duration = Duration::from_secs(15);

/// Default interval between download-directory polls (2 seconds).
const DEFAULT_DOWNLOAD_POLL: Duration = Duration::from_secs(2);

/// Heading of the diagnostic directory listing.
const LISTING_HEADING: &str = "\nFiles available in download folder:\n";

// ============================================================================
// Types
// ============================================================================

/// Parameters for one download verification.
///
/// The expected file name is required; the wait timeout and poll
/// interval default to 15s and 2s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadVerification {
    /// Name the downloaded file must appear under.
    pub file_name: String,
    /// How long to poll for the file.
    pub wait_timeout: Duration,
    /// Interval between directory polls. Must be nonzero.
    pub poll_interval: Duration,
}

impl DownloadVerification {
    /// Creates a verification for the file name with default timing.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            wait_timeout: DEFAULT_DOWNLOAD_WAIT,
            poll_interval: DEFAULT_DOWNLOAD_POLL,
        }
    }

    /// Sets the wait timeout.
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

// ============================================================================
// Interactor - Download Verification
// ============================================================================

impl Interactor {
    /// Clicks the download trigger and verifies the file lands.
    ///
    /// Any pre-existing file of the expected name is deleted first, so a
    /// leftover from an earlier run can never satisfy the poll. The file
    /// counts as landed once it exists with nonzero size.
    ///
    /// Returns whether the file appeared, plus a diagnostic listing of
    /// the download directory for failure messages.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when no download directory is configured; click
    /// and filesystem failures propagate.
    pub async fn download_and_verify(
        &self,
        by: &By,
        verification: &DownloadVerification,
    ) -> Result<(bool, String)> {
        let target = self.download_dir()?.join(&verification.file_name);

        if fs::try_exists(&target).await? {
            fs::remove_file(&target).await?;
            debug!(file = %target.display(), "Removed pre-existing download");
        }

        self.click(by).await?;

        debug!(
            file = %target.display(),
            timeout_ms = verification.wait_timeout.as_millis() as u64,
            "Polling for download"
        );
        let appeared = await_download(&target, verification).await?;
        let listing = self.download_dir_listing().await?;
        Ok((appeared, listing))
    }
}

/// Polls for the file until it has content or the timeout passes.
async fn await_download(target: &Path, verification: &DownloadVerification) -> Result<bool> {
    let start = Instant::now();
    loop {
        if file_has_content(target).await? {
            return Ok(true);
        }
        if start.elapsed() >= verification.wait_timeout {
            return Ok(false);
        }
        sleep(verification.poll_interval).await;
    }
}

async fn file_has_content(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// Interactor - Download Directory
// ============================================================================

impl Interactor {
    /// Returns the configured download directory.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when none is configured.
    pub fn download_dir(&self) -> Result<&Path> {
        self.inner
            .config
            .download_dir
            .as_deref()
            .ok_or_else(|| Error::config("download directory not configured"))
    }

    /// Returns the diagnostic listing of the download directory.
    ///
    /// File names are sorted for stable output.
    pub async fn download_dir_listing(&self) -> Result<String> {
        let dir = self.download_dir()?;
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        let mut listing = String::from(LISTING_HEADING);
        listing.push_str(&names.join("\n"));
        Ok(listing)
    }

    /// Deletes one file from the download directory.
    ///
    /// Returns whether the file existed.
    pub async fn delete_from_download_dir(&self, file_name: &str) -> Result<bool> {
        let target = self.download_dir()?.join(file_name);
        if fs::try_exists(&target).await? {
            fs::remove_file(&target).await?;
            debug!(file = %target.display(), "Deleted download");
            return Ok(true);
        }
        Ok(false)
    }

    /// Deletes every file in the download directory.
    ///
    /// Subdirectories are left alone. Returns how many files were
    /// removed.
    pub async fn clear_download_dir(&self) -> Result<usize> {
        let dir = self.download_dir()?.to_path_buf();
        let mut removed = 0;
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
        debug!(dir = %dir.display(), removed, "Cleared download directory");
        Ok(removed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::config::InteractorConfig;
    use crate::mock::MockSession;

    fn fast() -> InteractorConfig {
        InteractorConfig::new()
            .with_wait_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(100))
    }

    fn downloads(dir: &TempDir) -> (MockSession, Interactor) {
        let session = MockSession::new();
        session.add_element("#download", |e| e);
        let config = fast().with_download_dir(dir.path());
        let interactor = Interactor::with_config(session.clone(), config).unwrap();
        (session, interactor)
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_verified_once_file_lands() {
        let dir = TempDir::new().unwrap();
        let (session, interactor) = downloads(&dir);
        let target = dir.path().join("report.pdf");

        tokio::spawn(async move {
            sleep(Duration::from_secs(3)).await;
            std::fs::write(&target, b"content").unwrap();
        });

        let verification = DownloadVerification::new("report.pdf")
            .with_wait_timeout(Duration::from_secs(10))
            .with_poll_interval(Duration::from_secs(2));
        let start = Instant::now();
        let (appeared, listing) = interactor
            .download_and_verify(&By::css("#download"), &verification)
            .await
            .unwrap();

        assert!(appeared);
        assert!(listing.contains("report.pdf"));
        assert_eq!(start.elapsed(), Duration::from_secs(4));
        assert_eq!(session.total_finds(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_reports_absence_after_timeout() {
        let dir = TempDir::new().unwrap();
        let (_, interactor) = downloads(&dir);
        std::fs::write(dir.path().join("other.txt"), b"x").unwrap();

        let verification = DownloadVerification::new("report.pdf")
            .with_wait_timeout(Duration::from_secs(4))
            .with_poll_interval(Duration::from_secs(2));
        let (appeared, listing) = interactor
            .download_and_verify(&By::css("#download"), &verification)
            .await
            .unwrap();

        assert!(!appeared);
        assert!(listing.starts_with(LISTING_HEADING));
        assert!(listing.contains("other.txt"));
        assert!(!listing.contains("report.pdf"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_deletes_preexisting_file_first() {
        let dir = TempDir::new().unwrap();
        let (_, interactor) = downloads(&dir);
        let target = dir.path().join("report.pdf");
        std::fs::write(&target, b"stale run").unwrap();

        let verification = DownloadVerification::new("report.pdf")
            .with_wait_timeout(Duration::from_secs(2))
            .with_poll_interval(Duration::from_secs(1));
        let (appeared, _) = interactor
            .download_and_verify(&By::css("#download"), &verification)
            .await
            .unwrap();

        // The stale file can never satisfy the poll.
        assert!(!appeared);
        assert!(!target.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_byte_file_does_not_verify() {
        let dir = TempDir::new().unwrap();
        let (_, interactor) = downloads(&dir);
        let target = dir.path().join("report.pdf");

        tokio::spawn(async move {
            sleep(Duration::from_secs(1)).await;
            std::fs::write(&target, b"").unwrap();
        });

        let verification = DownloadVerification::new("report.pdf")
            .with_wait_timeout(Duration::from_secs(3))
            .with_poll_interval(Duration::from_secs(1));
        let (appeared, _) = interactor
            .download_and_verify(&By::css("#download"), &verification)
            .await
            .unwrap();

        assert!(!appeared);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_sorts_names_under_heading() {
        let dir = TempDir::new().unwrap();
        let (_, interactor) = downloads(&dir);
        std::fs::write(dir.path().join("b.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();

        let listing = interactor.download_dir_listing().await.unwrap();
        assert_eq!(
            listing,
            "\nFiles available in download folder:\na.txt\nb.pdf"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_and_clear_download_dir() {
        let dir = TempDir::new().unwrap();
        let (_, interactor) = downloads(&dir);
        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"x").unwrap();

        assert!(interactor.delete_from_download_dir("a.txt").await.unwrap());
        assert!(!interactor.delete_from_download_dir("a.txt").await.unwrap());

        assert_eq!(interactor.clear_download_dir().await.unwrap(), 1);
        assert_eq!(interactor.download_dir_listing().await.unwrap(), LISTING_HEADING);
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_requires_configured_directory() {
        let session = MockSession::new();
        session.add_element("#download", |e| e);
        let interactor = Interactor::with_config(session, fast()).unwrap();

        let err = interactor
            .download_and_verify(&By::css("#download"), &DownloadVerification::new("x.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
