//! Cleanup applied to every framed line before it is parsed.

/// Sanitizes one framed request line.
///
/// Trailing bytes are dropped while they are whitespace or non-printable,
/// then every remaining non-printable byte is removed, then leading
/// whitespace is trimmed. Printable means ASCII `0x20..=0x7E`, so the result
/// is always plain ASCII.
#[must_use]
pub fn sanitize_line(raw: &[u8]) -> String {
    let end = raw
        .iter()
        .rposition(|byte| is_printable(*byte) && !byte.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);

    let printable: String = raw
        .get(..end)
        .unwrap_or_default()
        .iter()
        .copied()
        .filter(|byte| is_printable(*byte))
        .map(char::from)
        .collect();

    printable.trim_start_matches(' ').to_owned()
}

const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7e)
}
