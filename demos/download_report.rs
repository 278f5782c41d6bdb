//! Download verification walkthrough against the in-memory mock session.
//!
//! Demonstrates:
//! - Wiring a download directory into the interactor config
//! - Clicking a trigger and polling the directory until the file lands
//! - The folder listing returned alongside the verdict
//! - Cleaning the directory between runs
//!
//! Usage:
//!   cargo run --example download_report
//!   cargo run --example download_report -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tokio::time::sleep;

use common::Args;
use webdriver_interactor::{By, DownloadVerification, Interactor, InteractorConfig, MockSession};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("=== Download verification walkthrough ===\n");

    // ========================================================================
    // Setup
    // ========================================================================

    println!("[Setup] Staging the report page and a download folder...");

    let downloads = tempfile::tempdir()?;
    std::fs::write(downloads.path().join("report.csv"), b"stale run")?;

    let session = MockSession::new();
    session.set_url("https://shop.example/reports");
    session.set_title("Reports");
    session.add_element("#export", |e| e.with_tag("button").with_text("Export CSV"));

    let mut config = InteractorConfig::new()
        .with_wait_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(100))
        .with_download_dir(downloads.path());
    config.debug = args.debug;

    let interactor = Interactor::with_config(session.clone(), config)?;
    println!("        Download folder: {}", downloads.path().display());
    println!("        ✓ Session ready (a stale report.csv is already on disk)\n");

    // ========================================================================
    // Download and verify
    // ========================================================================

    println!("[1] download_and_verify: click #export, then poll for report.csv");

    // Stand-in for the browser: the file lands shortly after the click.
    let writer_dir = downloads.path().to_path_buf();
    tokio::spawn(async move {
        sleep(Duration::from_millis(600)).await;
        let _ = std::fs::write(writer_dir.join("report.csv"), b"id,total\n1,9.99\n");
    });

    let verification = DownloadVerification::new("report.csv")
        .with_wait_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(200));

    let (verified, listing) = interactor
        .download_and_verify(&By::css("#export"), &verification)
        .await?;

    println!("    Verified: {verified}");
    for line in listing.lines().filter(|l| !l.is_empty()) {
        println!("      {line}");
    }

    if verified {
        println!("    ✓ Stale copy was removed first, fresh file found with content\n");
    } else {
        println!("    ✗ Expected report.csv to verify\n");
    }

    // ========================================================================
    // Absent file
    // ========================================================================

    println!("[2] download_and_verify: a file that never arrives");

    let missing = DownloadVerification::new("summary.pdf")
        .with_wait_timeout(Duration::from_millis(600))
        .with_poll_interval(Duration::from_millis(200));

    let (found, listing) = interactor
        .download_and_verify(&By::css("#export"), &missing)
        .await?;

    println!("    Verified: {found}");
    for line in listing.lines().filter(|l| !l.is_empty()) {
        println!("      {line}");
    }
    println!("    ✓ Absence reported as a verdict, not an error\n");

    // ========================================================================
    // Folder maintenance
    // ========================================================================

    println!("[3] Folder maintenance: delete and clear");

    let deleted = interactor.delete_from_download_dir("report.csv").await?;
    println!("    delete_from_download_dir(\"report.csv\"): {deleted}");

    std::fs::write(downloads.path().join("scratch-1.tmp"), b"x")?;
    std::fs::write(downloads.path().join("scratch-2.tmp"), b"x")?;

    let removed = interactor.clear_download_dir().await?;
    println!("    clear_download_dir removed {removed} files");

    let listing = interactor.download_dir_listing().await?;
    if listing.trim().ends_with(':') {
        println!("    ✓ Folder is empty again\n");
    } else {
        println!("    ✗ Folder still holds files:{listing}\n");
    }

    // ========================================================================
    // Done
    // ========================================================================

    println!("=== Download verification walkthrough complete ===");

    Ok(())
}
