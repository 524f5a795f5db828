/// Split the free-text setlist into song titles.
///
/// Lines that are empty or whitespace-only are dropped; the others are kept
/// exactly as typed (trailing spaces included) and in order. A trailing `\r`
/// from CRLF input is not part of the title.
pub fn parse_setlist(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_setlist`] for titles without line breaks.
pub fn join_setlist<S: AsRef<str>>(titles: &[S]) -> String {
    titles
        .iter()
        .map(|title| title.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
