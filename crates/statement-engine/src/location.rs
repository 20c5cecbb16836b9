//! Location text cleanup
//!
//! The capture form appends metadata to GPS-filled locations, e.g.
//! `Shibuya (GPS acquired, accuracy ±10m)`. The statement shows only the place
//! name and mentions the capture method separately.

/// Drop a trailing parenthetical annotation (full-width or half-width)
///
/// Text that starts with a parenthesis is kept whole: there is no place name
/// in front of it to keep.
pub fn strip_annotation(raw: &str) -> String {
    let s = raw.trim();
    let cut = ['(', '（'].iter().filter_map(|open| s.find(*open)).min();

    match cut {
        Some(idx) if idx > 0 => s[..idx].trim().to_string(),
        _ => s.to_string(),
    }
}

/// Human-readable capture note when the raw location carries the GPS marker
pub fn location_note(raw: &str, marker: &str, note: &str) -> String {
    if !marker.is_empty() && raw.contains(marker) {
        note.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_half_width_annotation() {
        assert_eq!(strip_annotation("Shibuya (GPS acquired, accuracy ±10m)"), "Shibuya");
    }

    #[test]
    fn test_strips_full_width_annotation() {
        assert_eq!(strip_annotation("渋谷（GPS取得済・精度: ±10m）"), "渋谷");
    }

    #[test]
    fn test_first_bracket_style_wins() {
        assert_eq!(strip_annotation("自宅（リビング）(GPS)"), "自宅");
        assert_eq!(strip_annotation("Home (den)（GPS取得済）"), "Home");
    }

    #[test]
    fn test_plain_location_is_trimmed() {
        assert_eq!(strip_annotation("  Home  "), "Home");
        assert_eq!(strip_annotation(""), "");
    }

    #[test]
    fn test_leading_parenthesis_keeps_text() {
        assert_eq!(strip_annotation("(unknown)"), "(unknown)");
    }

    #[test]
    fn test_location_note() {
        let note = location_note("Shibuya (GPS acquired)", "GPS acquired", "via GPS");
        assert_eq!(note, "via GPS");
        assert_eq!(location_note("Shibuya", "GPS acquired", "via GPS"), "");
        assert_eq!(location_note("anything", "", "via GPS"), "");
    }
}
