//! Script classification.
//!
//! Decides how a script is launched from its path and optional interpreter.
//! An explicit interpreter always wins; otherwise the file extension picks the
//! host. Scripts such as `.ps1` or `.py` need an explicit interpreter.

use sr_core::ScriptKind;

/// Classifies a script.
///
/// # Examples
///
/// ```
/// use sr_core::ScriptKind;
/// use sr_launcher::classify;
///
/// assert_eq!(classify(r"C:\p\build.BAT", None), ScriptKind::Batch);
/// assert_eq!(classify("deploy.sh", Some("  ")), ScriptKind::Shell);
/// assert_eq!(classify("tool.ps1", Some("pwsh")), ScriptKind::Interpreter);
/// assert_eq!(classify("tool.ps1", None), ScriptKind::Unknown);
/// ```
#[must_use]
pub fn classify(script_path: &str, interpreter: Option<&str>) -> ScriptKind {
    if interpreter.is_some_and(|name| !name.trim().is_empty()) {
        return ScriptKind::Interpreter;
    }

    match extension(script_path) {
        Some(ext) if ext.eq_ignore_ascii_case("bat") => ScriptKind::Batch,
        Some(ext) if ext.eq_ignore_ascii_case("sh") => ScriptKind::Shell,
        _ => ScriptKind::Unknown,
    }
}

/// Extension of the last path segment, accepting either separator style.
fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit(['/', '\\']).next()?;
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}
