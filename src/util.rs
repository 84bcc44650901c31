/// True when `path` contains any of the `ignore` substrings. An empty
/// substring matches every path.
pub fn is_ignored(path: &str, ignore: &[String]) -> bool {
    ignore.iter().any(|substr| path.contains(substr.as_str()))
}

/// Width of a label in terminal columns, counting chars rather than bytes.
pub fn label_width(label: &str) -> usize {
    label.chars().count()
}
