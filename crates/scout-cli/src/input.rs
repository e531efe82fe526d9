//! Email list parsing for `--input`.

/// One email per line. Blank lines and `#` comments are skipped.
pub fn parse_email_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}
