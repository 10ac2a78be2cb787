#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backticked,
    LineComment,
    BlockComment,
}

pub(super) fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    match bytes.get(idx) {
        Some(b'#') => true,
        // MySQL only treats `--` as a comment when followed by whitespace.
        Some(b'-') => {
            bytes.get(idx + 1) == Some(&b'-')
                && bytes
                    .get(idx + 2)
                    .is_none_or(|b| b.is_ascii_whitespace())
        }
        _ => false,
    }
}

pub(super) fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// Scan a bind key (`[A-Za-z0-9_]+`) starting at `start`.
pub(super) fn scan_key(bytes: &[u8], start: usize) -> Option<(usize, &str)> {
    let mut idx = start;
    while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
        idx += 1;
    }
    if idx == start {
        None
    } else {
        std::str::from_utf8(&bytes[start..idx])
            .ok()
            .map(|key| (idx, key))
    }
}

/// Closing quote handling shared by the quoted states: a doubled quote stays
/// inside the literal, a backslash escapes the next byte in string literals.
pub(super) fn closes_quote(bytes: &[u8], idx: usize, quote: u8) -> (bool, usize) {
    if bytes[idx] == b'\\' && quote != b'`' {
        return (false, idx + 1);
    }
    if bytes[idx] != quote {
        return (false, idx);
    }
    if bytes.get(idx + 1) == Some(&quote) {
        (false, idx + 1)
    } else {
        (true, idx)
    }
}
