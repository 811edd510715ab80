//! Snapshot formatting helpers.

/// Format labels one per line for `insta::assert_snapshot!`.
///
/// ```ignore
/// let items = analysis.completions(&uri, position).unwrap();
/// insta::assert_snapshot!(format_labels(items.labels()), @"...");
/// ```
pub fn format_labels<I, T>(labels: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let lines: Vec<String> = labels.into_iter().map(|label| label.to_string()).collect();
    if lines.is_empty() {
        return String::from("(no completions)");
    }
    lines.join("\n")
}
