//! Script-injected interaction fallbacks.
//!
//! Everything the native automation surface cannot do reliably lives here:
//! viewport geometry, center scrolling, the debug highlight, script-driven
//! click and value assignment, select-option manipulation, and the
//! synthetic drag-and-drop file upload. Each snippet references its inputs
//! positionally (`arguments[0]` is always the target element), so nothing
//! is ever interpolated into script text.
//!
//! The helpers are thin: execute the snippet, validate the returned shape,
//! classify anything unexpected as a script error.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::session::{ElementHandle, ScriptArg, Session};

// ============================================================================
// Script Bodies
// ============================================================================

/// Whether the element's bounding box lies fully inside the viewport.
const IS_IN_VIEWPORT: &str = "\
var rect = arguments[0].getBoundingClientRect();
return (
  rect.top >= 0 &&
  rect.left >= 0 &&
  rect.bottom <= (window.innerHeight || document.documentElement.clientHeight) &&
  rect.right <= (window.innerWidth || document.documentElement.clientWidth)
);";

/// Scrolls so the element's vertical center meets the viewport's center.
const SCROLL_TO_CENTER: &str = "\
var rect = arguments[0].getBoundingClientRect();
var middle = rect.top + window.pageYOffset - window.innerHeight / 2;
window.scrollTo(0, middle);";

/// Outlines the element for visual debugging.
const HIGHLIGHT: &str = "arguments[0].style.border = '3px solid red';";

/// Clicks through the DOM, bypassing hit-testing.
const CLICK: &str = "arguments[0].click();";

/// Assigns a value and fires the events frameworks listen for.
const ASSIGN_VALUE: &str = "\
arguments[0].value = arguments[1];
arguments[0].dispatchEvent(new Event('input', { bubbles: true }));
arguments[0].dispatchEvent(new Event('change', { bubbles: true }));";

/// Selects the option whose trimmed label equals `arguments[1]`.
const SELECT_BY_TEXT: &str = "\
var select = arguments[0];
var wanted = arguments[1];
var options = select.options || select.querySelectorAll('option');
for (var i = 0; i < options.length; i++) {
  if (options[i].textContent.trim() === wanted) {
    select.selectedIndex = i;
    options[i].selected = true;
    select.dispatchEvent(new Event('input', { bubbles: true }));
    select.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
  }
}
return false;";

/// Selects the option whose value equals `arguments[1]`.
const SELECT_BY_VALUE: &str = "\
var select = arguments[0];
var wanted = arguments[1];
var options = select.options || select.querySelectorAll('option');
for (var i = 0; i < options.length; i++) {
  if (options[i].value === wanted) {
    select.selectedIndex = i;
    options[i].selected = true;
    select.dispatchEvent(new Event('input', { bubbles: true }));
    select.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
  }
}
return false;";

/// Selects the option at ordinal `arguments[1]`.
const SELECT_BY_INDEX: &str = "\
var select = arguments[0];
var index = arguments[1];
var options = select.options || select.querySelectorAll('option');
if (index < 0 || index >= options.length) { return false; }
select.selectedIndex = index;
options[index].selected = true;
select.dispatchEvent(new Event('input', { bubbles: true }));
select.dispatchEvent(new Event('change', { bubbles: true }));
return true;";

/// Trimmed labels of every option under the element.
const OPTION_TEXTS: &str = "\
var options = arguments[0].options || arguments[0].querySelectorAll('option');
return Array.prototype.map.call(options, function (o) {
  return o.textContent.trim();
});";

/// Plants a transient file input that simulates a drop onto the target.
///
/// `arguments[0]` target element, `arguments[1]` multi-file flag,
/// `arguments[2]` marker id for locating the planted input. Once files are
/// fed into the input, its change handler dispatches dragenter, dragover,
/// and drop at the target's center and removes the input again.
const PLANT_UPLOAD_INPUT: &str = "\
var target = arguments[0];
var multiple = arguments[1];
var markerId = arguments[2];
var input = document.createElement('input');
input.id = markerId;
input.type = 'file';
if (multiple) { input.multiple = true; }
input.style.position = 'fixed';
input.style.left = '0';
input.style.top = '0';
input.style.opacity = '0';
input.onchange = function () {
  var rect = target.getBoundingClientRect();
  var x = rect.left + rect.width / 2;
  var y = rect.top + rect.height / 2;
  var dataTransfer = { files: input.files, types: ['Files'] };
  ['dragenter', 'dragover', 'drop'].forEach(function (type) {
    var event = document.createEvent('CustomEvent');
    event.initCustomEvent(type, true, true, null);
    event.dataTransfer = dataTransfer;
    event.clientX = x;
    event.clientY = y;
    target.dispatchEvent(event);
  });
  setTimeout(function () {
    if (input.parentNode) { input.parentNode.removeChild(input); }
  }, 25);
};
document.body.appendChild(input);";

// ============================================================================
// Viewport and Scrolling
// ============================================================================

/// Checks whether the element is fully inside the visible viewport.
pub(crate) async fn is_in_viewport(session: &dyn Session, element: &ElementHandle) -> Result<bool> {
    let result = session
        .execute_script(IS_IN_VIEWPORT, &[element.into()])
        .await?;
    result
        .as_bool()
        .ok_or_else(|| Error::script_error(format!("viewport check returned {result}")))
}

/// Scrolls the element's vertical center to the viewport's center, but
/// only when it is not already fully visible.
///
/// Returns `true` when a scroll was issued. The check and the scroll are
/// deliberately fused so no caller can scroll unconditionally.
pub(crate) async fn ensure_in_view(
    session: &dyn Session,
    element: &ElementHandle,
) -> Result<bool> {
    if is_in_viewport(session, element).await? {
        return Ok(false);
    }
    debug!(element = %element, "Scrolling element to viewport center");
    session
        .execute_script(SCROLL_TO_CENTER, &[element.into()])
        .await?;
    Ok(true)
}

// ============================================================================
// Highlight
// ============================================================================

/// Outlines the element and pauses so a watching human can spot it.
///
/// Purely observational; callers gate this on the debug flag.
pub(crate) async fn highlight(
    session: &dyn Session,
    element: &ElementHandle,
    pause: Duration,
) -> Result<()> {
    session.execute_script(HIGHLIGHT, &[element.into()]).await?;
    sleep(pause).await;
    Ok(())
}

// ============================================================================
// Click and Value Assignment
// ============================================================================

/// Clicks through injected script, for targets the native click cannot
/// reach.
pub(crate) async fn click(session: &dyn Session, element: &ElementHandle) -> Result<()> {
    debug!(element = %element, "Clicking via script");
    session.execute_script(CLICK, &[element.into()]).await?;
    Ok(())
}

/// Assigns a value through injected script and fires input/change events.
pub(crate) async fn assign_value(
    session: &dyn Session,
    element: &ElementHandle,
    text: &str,
) -> Result<()> {
    debug!(element = %element, "Assigning value via script");
    session
        .execute_script(ASSIGN_VALUE, &[element.into(), text.into()])
        .await?;
    Ok(())
}

// ============================================================================
// Option Selection
// ============================================================================

/// Selects an option by its trimmed visible label.
///
/// Returns whether any option matched.
pub(crate) async fn select_by_text(
    session: &dyn Session,
    element: &ElementHandle,
    text: &str,
) -> Result<bool> {
    let result = session
        .execute_script(SELECT_BY_TEXT, &[element.into(), text.into()])
        .await?;
    selection_flag(result)
}

/// Selects an option by its underlying value.
pub(crate) async fn select_by_value(
    session: &dyn Session,
    element: &ElementHandle,
    value: &str,
) -> Result<bool> {
    let result = session
        .execute_script(SELECT_BY_VALUE, &[element.into(), value.into()])
        .await?;
    selection_flag(result)
}

/// Selects an option by ordinal index.
pub(crate) async fn select_by_index(
    session: &dyn Session,
    element: &ElementHandle,
    index: usize,
) -> Result<bool> {
    let result = session
        .execute_script(
            SELECT_BY_INDEX,
            &[element.into(), ScriptArg::Value(Value::from(index))],
        )
        .await?;
    selection_flag(result)
}

/// Returns the trimmed label of every option under the element.
pub(crate) async fn option_texts(
    session: &dyn Session,
    element: &ElementHandle,
) -> Result<Vec<String>> {
    let result = session
        .execute_script(OPTION_TEXTS, &[element.into()])
        .await?;
    match result {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::script_error(format!("non-string option label {item}")))
            })
            .collect(),
        other => Err(Error::script_error(format!(
            "option listing returned {other}"
        ))),
    }
}

fn selection_flag(result: Value) -> Result<bool> {
    result
        .as_bool()
        .ok_or_else(|| Error::script_error(format!("selection script returned {result}")))
}

// ============================================================================
// File Upload
// ============================================================================

/// Whether the element is a native file input (`type` attribute literally
/// `"file"`).
pub(crate) async fn is_native_file_input(
    session: &dyn Session,
    element: &ElementHandle,
) -> Result<bool> {
    Ok(session
        .get_attribute(element, "type")
        .await?
        .is_some_and(|t| t == "file"))
}

/// Whether the element accepts direct multi-path assignment: a `multiple`
/// capability that is present and not explicitly disabled.
pub(crate) async fn accepts_direct_multi_upload(
    session: &dyn Session,
    element: &ElementHandle,
) -> Result<bool> {
    let multiple = session.get_property(element, "multiple").await?;
    Ok(multiple.is_some_and(|value| {
        value != Value::Bool(false) && value.as_str() != Some("false")
    }))
}

/// Plants the transient synthetic-upload input next to the target.
///
/// Returns the marker id of the planted input; feeding file paths into
/// the input completes the simulated drop.
pub(crate) async fn plant_upload_input(
    session: &dyn Session,
    target: &ElementHandle,
    multiple: bool,
) -> Result<String> {
    let marker_id = format!("upload-{}", Uuid::new_v4());
    debug!(target = %target, marker = %marker_id, multiple, "Planting synthetic upload input");
    session
        .execute_script(
            PLANT_UPLOAD_INPUT,
            &[
                target.into(),
                ScriptArg::Value(Value::Bool(multiple)),
                ScriptArg::Value(Value::String(marker_id.clone())),
            ],
        )
        .await?;
    Ok(marker_id)
}

// ============================================================================
// Tests
// ============================================================================
