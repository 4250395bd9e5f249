use unicode_segmentation::UnicodeSegmentation;

const ESC: char = '\x1b';
pub const ELLIPSIS: &str = "\u{2026}";

/// Byte length of the SGR sequence (`ESC [ params m`) at the start of `s`, if
/// there is one. Params are digits and `;` only, so other CSI sequences are
/// not recognized and stay in the text.
fn sgr_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix(ESC)?.strip_prefix('[')?;
    let params = rest
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b';')
        .count();
    match rest.as_bytes().get(params) {
        Some(b'm') => Some(2 + params + 1),
        _ => None,
    }
}

/// Remove every SGR color sequence from `s`.
pub fn strip_ansi(s: &str) -> String {
    let mut stripped = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(ESC) {
        stripped.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match sgr_len(rest) {
            Some(len) => rest = &rest[len..],
            None => {
                stripped.push(ESC);
                rest = &rest[ESC.len_utf8()..];
            }
        }
    }
    stripped.push_str(rest);
    stripped
}

/// Number of terminal cells `s` occupies once color codes are removed.
///
/// Each grapheme cluster counts as one cell.
pub fn visible_width(s: &str) -> usize {
    if !s.contains(ESC) {
        return s.graphemes(true).count();
    }
    strip_ansi(s).graphemes(true).count()
}

/// Shorten `text` to at most `max_width` cells by dropping graphemes from the
/// front and prefixing an ellipsis. The tail of the text is kept.
///
/// A zero budget yields an empty string.
pub fn truncate_front(text: &str, max_width: usize) -> String {
    let width = visible_width(text);
    if width <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let keep = max_width - 1;
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let tail = graphemes[graphemes.len() - keep..].concat();
    format!("{}{}", ELLIPSIS, tail)
}
