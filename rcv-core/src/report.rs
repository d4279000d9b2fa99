//! Human-readable presentation of a fixture mismatch.

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Unified line diff of the existing fixture text against the new encoding.
///
/// Returns an empty string when both texts are identical.
pub fn text_diff(existing: &str, new: &str) -> String {
    TextDiff::from_lines(existing, new)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header("existing", "new")
        .to_string()
}
