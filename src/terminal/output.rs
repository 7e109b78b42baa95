//! Terminal output utilities.
//!
//! Box drawing, ANSI helpers, wrapping and entropy estimates.

// ============================================================================
// ANSI Color/Style Constants
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[2m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const RED: &str = "\x1b[38;5;9m";
pub const YELLOW: &str = "\x1b[33m";
pub const ERROR_BG: &str = "\x1b[41;97m";

// ============================================================================
// Terminal Control
// ============================================================================

/// Escape sequence moving the cursor to a 0-based column and row.
pub fn move_to(col: u16, row: u16) -> String {
    format!("\x1b[{};{}H", row as u32 + 1, col as u32 + 1)
}

// ============================================================================
// Box Drawing
// ============================================================================

/// Box renderer for a fixed outer width. Every method returns one row.
#[derive(Debug, Clone, Copy)]
pub struct BoxStyle {
    pub width: usize,
}

impl BoxStyle {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(8) }
    }

    fn inner(&self) -> usize {
        self.width - 4
    }

    /// ┌─ Title ───────────────────────────┐
    pub fn top(&self, title: &str) -> String {
        if title.is_empty() {
            format!("┌{}┐", "─".repeat(self.width - 2))
        } else {
            let title_part = format!("─ {} ", title);
            let remaining = (self.width - 2).saturating_sub(title_part.chars().count());
            format!("┌{}{}┐", title_part, "─".repeat(remaining))
        }
    }

    /// │ content                           │
    pub fn line(&self, content: &str) -> String {
        let content = truncate_visible(content, self.inner());
        let display_len = console_width(&content);
        let padding = self.inner().saturating_sub(display_len);
        format!("│ {}{} │", content, " ".repeat(padding))
    }

    /// │ content │ with `style` applied across the padded content area.
    pub fn styled_line(&self, style: &str, content: &str) -> String {
        let content = truncate_visible(content, self.inner());
        let display_len = console_width(&content);
        let padding = self.inner().saturating_sub(display_len);
        format!("│ {style}{}{}{RESET} │", content, " ".repeat(padding))
    }

    /// ├───────────────────────────────────┤
    pub fn rule(&self) -> String {
        format!("├{}┤", "─".repeat(self.width - 2))
    }

    /// └───────────────────────────────────┘
    pub fn bottom(&self) -> String {
        format!("└{}┘", "─".repeat(self.width - 2))
    }

    /// Width available for content inside the borders.
    pub fn content_width(&self) -> usize {
        self.inner()
    }
}

/// Calculate display width accounting for ANSI escape codes.
pub fn console_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Cut `s` down to `max` visible characters, keeping escape codes intact
/// and closing any style that was cut off.
pub fn truncate_visible(s: &str, max: usize) -> String {
    if console_width(s) <= max {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut width = 0;
    let mut in_escape = false;
    let mut styled = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
            styled = true;
            out.push(c);
        } else if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
            out.push(c);
        } else if width < max {
            width += 1;
            out.push(c);
        }
    }
    if styled {
        out.push_str(RESET);
    }
    out
}

/// Hard-wrap `text` into rows of at most `width` characters.
///
/// Passwords have no word boundaries, so this splits on characters.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

// ============================================================================
// Entropy Calculation
// ============================================================================

/// Calculate password entropy in bits.
pub fn calculate_entropy(password_length: usize, charset_size: usize) -> f64 {
    if charset_size == 0 {
        return 0.0;
    }
    password_length as f64 * (charset_size as f64).log2()
}

/// Get entropy strength description.
pub fn entropy_strength(bits: f64) -> &'static str {
    match bits as u32 {
        0..=35 => "Weak",
        36..=59 => "Fair",
        60..=127 => "Strong",
        _ => "Very Strong",
    }
}

/// One-line entropy summary for a length range.
pub fn entropy_summary(min: usize, max: usize, charset_size: usize) -> String {
    let low = calculate_entropy(min, charset_size);
    let high = calculate_entropy(max, charset_size);
    if min == max {
        format!("{:.1} bits ({})", low, entropy_strength(low))
    } else {
        format!(
            "{:.1}-{:.1} bits ({} to {})",
            low,
            high,
            entropy_strength(low),
            entropy_strength(high)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_rows_share_one_width() {
        let b = BoxStyle::new(30);
        for row in [
            b.top("Title"),
            b.top(""),
            b.line("content"),
            b.styled_line(ERROR_BG, "bad"),
            b.rule(),
            b.bottom(),
        ] {
            assert_eq!(console_width(&row), 30, "row {row:?}");
        }
    }

    #[test]
    fn escape_codes_have_no_width() {
        assert_eq!(console_width(&format!("{RED}abc{RESET}")), 3);
        assert_eq!(console_width("\x1b[41;97mx\x1b[0m"), 1);
    }

    #[test]
    fn long_content_is_truncated_to_the_box() {
        let b = BoxStyle::new(12);
        assert_eq!(b.line("abcdefghijkl"), "│ abcdefgh │");
        let styled = b.line(&format!("{RED}abcdefghijkl{RESET}"));
        assert_eq!(console_width(&styled), 12);
        assert!(styled.contains("abcdefgh"));
        assert!(!styled.contains("abcdefghi"));
    }

    #[test]
    fn wraps_on_characters() {
        assert_eq!(wrap_chars("abcdefg", 3), vec!["abc", "def", "g"]);
        assert!(wrap_chars("", 3).is_empty());
        assert!(wrap_chars("abc", 0).is_empty());
    }

    #[test]
    fn entropy_of_known_sizes() {
        assert_eq!(calculate_entropy(8, 0), 0.0);
        assert!((calculate_entropy(10, 2) - 10.0).abs() < 1e-9);
        assert_eq!(entropy_strength(40.0), "Fair");
        assert_eq!(entropy_summary(4, 4, 16), "16.0 bits (Weak)");
        assert_eq!(entropy_summary(8, 32, 16), "32.0-128.0 bits (Weak to Very Strong)");
    }
}
