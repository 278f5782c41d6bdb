//! Checkout flow walkthrough against the in-memory mock session.
//!
//! Demonstrates:
//! - Settling the page before the first interaction
//! - Typing into a field that starts disabled
//! - Selecting an option and reading the list back
//! - Clicking through transient staleness
//! - Waiting for a confirmation banner to appear
//! - State probes that report `false` instead of raising
//!
//! Usage:
//!   cargo run --example checkout
//!   cargo run --example checkout -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;

use common::Args;
use webdriver_interactor::{By, Condition, Interactor, InteractorConfig, MockSession, Result};

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

async fn run(args: Args) -> Result<()> {
    println!("=== Checkout walkthrough ===\n");

    // ========================================================================
    // Setup
    // ========================================================================

    println!("[Setup] Staging the checkout page...");

    let session = MockSession::new();
    session.set_url("https://shop.example/checkout");
    session.set_title("Checkout");
    session.set_ready_state("loading");

    session.add_element("#email", |e| e.with_tag("input"));
    let quantity = session.add_element("#quantity", |e| {
        e.with_tag("input").enabled_after_checks(2)
    });
    session.add_element("#country", |e| e.with_tag("select"));
    let submit = session.add_element("#submit", |e| {
        e.with_tag("button").with_text("Place order").stale_first_clicks(1)
    });
    session.add_element_after_finds("#confirmation", 3, |e| {
        e.with_text("Order #1042 confirmed")
    });

    // The select scripts run inside the page, so the mock answers them
    // by fragment.
    session.set_script_result_for("textContent.trim() === wanted", json!(true));
    session.set_script_result_for("Array.prototype.map", json!(["Sweden", "Norway", "Finland"]));

    let mut config = InteractorConfig::new()
        .with_wait_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(100));
    config.enable_backoff_unit = Duration::from_millis(200);
    config.page_ready_spacing = Duration::from_millis(200);
    config.highlight_pause = Duration::from_millis(200);
    config.debug = args.debug;

    let interactor = Interactor::with_config(session.clone(), config)?;
    println!("        ✓ Session ready\n");

    // ========================================================================
    // Page load
    // ========================================================================

    println!("[1] wait_for_page_load: settle the document");

    let settler = session.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(300)).await;
        settler.set_ready_state("complete");
    });

    interactor.wait_for_page_load().await?;
    println!("    ✓ document.readyState reached \"complete\"\n");

    // ========================================================================
    // Text entry
    // ========================================================================

    println!("[2] enter_text: fill the email field");

    interactor.enter_text(&By::css("#email"), "jo@example.com").await?;

    let value = interactor.get_value(&By::css("#email")).await?;
    println!("    Field value: {value:?}");

    if value == "jo@example.com" {
        println!("    ✓ Field cleared and typed\n");
    } else {
        println!("    ✗ Expected \"jo@example.com\", got {value:?}\n");
    }

    println!("[3] enter_text: quantity field enables after a short backoff");

    interactor.enter_text(&By::css("#quantity"), "2").await?;

    let checks = session.enabled_check_count(&quantity);
    println!("    Enabled checks before typing: {checks}");
    println!("    ✓ Backoff absorbed the disabled window\n");

    // ========================================================================
    // Selection
    // ========================================================================

    println!("[4] select_by_visible_text: pick a country");

    interactor.select_by_visible_text(&By::css("#country"), "Sweden").await?;

    let options = interactor.get_all_option_texts(&By::css("#country")).await?;
    println!("    Options on offer: {options:?}");
    println!("    ✓ \"Sweden\" selected\n");

    // ========================================================================
    // Click
    // ========================================================================

    println!("[5] click: submit goes stale once mid-click");

    interactor.click(&By::css("#submit")).await?;

    let clicks = session.click_count(&submit);
    println!("    Clicks attempted: {clicks}");

    if clicks == 2 {
        println!("    ✓ Stale first attempt retried against a fresh handle\n");
    } else {
        println!("    ✗ Expected 2 attempts, saw {clicks}\n");
    }

    // ========================================================================
    // Confirmation
    // ========================================================================

    println!("[6] wait_until: confirmation banner appears after a few polls");

    interactor
        .wait_until(
            &By::css("#confirmation"),
            &Condition::visible().and(Condition::text_is("Order #1042 confirmed")),
        )
        .await?;

    let banner = interactor.get_text(&By::css("#confirmation")).await?;
    let polls = session.find_count("#confirmation");
    println!("    Banner: {banner:?} (after {polls} lookups)");
    println!("    ✓ Composite condition satisfied\n");

    // ========================================================================
    // Probes
    // ========================================================================

    println!("[7] is_displayed: probes never raise");

    let banner_shown = interactor.is_displayed(&By::css("#confirmation")).await;
    let coupon_shown = interactor
        .is_displayed_timeout(&By::css("#coupon-banner"), Duration::from_millis(400))
        .await;

    println!("    #confirmation displayed: {banner_shown}");
    println!("    #coupon-banner displayed: {coupon_shown} (absent element, quiet probe)");
    println!("    ✓ Probe verdicts fed back as plain booleans\n");

    // ========================================================================
    // Done
    // ========================================================================

    println!("=== Checkout walkthrough complete ===");

    Ok(())
}
