//! Line normalization and word splitting.
//!
//! There is no quoting, escaping or substitution: a command line is a flat list
//! of words separated by runs of whitespace.

/// Whitespace as understood by C's `isspace` in the "C" locale.
///
/// Note that this includes vertical tab, which [`char::is_ascii_whitespace`] does not.
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\x0b', '\x0c', '\r'];

fn is_space(ch: char) -> bool {
    WHITESPACE.contains(&ch)
}

/// Borrowed counterpart of [`normalize`].
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Strip leading and trailing whitespace from `line` in place.
///
/// Interior whitespace is left untouched. A line made only of whitespace
/// becomes empty, and an already trimmed line is not modified.
pub fn normalize(line: &mut String) {
    let end = line.trim_end_matches(is_space).len();
    line.truncate(end);

    let start = line.len() - line.trim_start_matches(is_space).len();
    line.replace_range(..start, "");
}

/// Split `line` into words separated by any run of `delims`.
///
/// Consecutive delimiters collapse, so empty words are never produced. At most
/// `capacity` words are returned; whatever follows is silently dropped.
///
/// The returned slices borrow from `line`, which is left intact.
pub fn split<'a>(line: &'a str, delims: &[char], capacity: usize) -> Vec<&'a str> {
    line.split(|ch: char| delims.contains(&ch))
        .filter(|word| !word.is_empty())
        .take(capacity)
        .collect()
}

/// Split on [`WHITESPACE`], the way command lines are split into argv.
pub fn split_words(line: &str, capacity: usize) -> Vec<&str> {
    split(line, WHITESPACE, capacity)
}
