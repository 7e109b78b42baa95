//! Panel layout and drawing.

use std::io::{self, Write};

use super::form::Form;
use crate::pass::{CharacterClass, charset};
use crate::settings::geometry::Geometry;
use crate::settings::{Field, Settings};
use crate::terminal::{
    BoxStyle, DIM, ERROR_BG, RED, RESET, UNDERLINE, entropy_summary, move_to, wrap_chars,
};

pub const MIN_WIDTH: u16 = 40;
const DEFAULT_WIDTH: u16 = 64;
const PASSWORD_ROWS: usize = 3;
/// Panel rows other than the password area, legend included.
const FIXED_ROWS: usize = 15;
const LEGEND: &str = "[n] New  [c] Copy  [q] Quit  [1-7] Edit  [</>] Width  [arrows] Move";

/// Centered panel for a terminal of `cols` x `rows`.
pub fn default_geometry(cols: u16, rows: u16) -> Geometry {
    let width = DEFAULT_WIDTH.min(cols).max(MIN_WIDTH.min(cols));
    let height = 20u16.min(rows);
    Geometry {
        width,
        height,
        x: cols.saturating_sub(width) / 2,
        y: rows.saturating_sub(height) / 2,
    }
}

/// Rows of the panel, top border first. The password area shrinks so the
/// panel fits in `max_rows` whenever the fixed rows do.
pub fn render(form: &Form, settings: &Settings, width: u16, max_rows: u16) -> Vec<String> {
    let b = BoxStyle::new(width as usize);
    let highlight = form.highlight();
    let mut rows = Vec::new();

    rows.push(b.top("Password Generator"));
    rows.push(length_row(&b, form, Bound::Min, highlight.min));
    rows.push(length_row(&b, form, Bound::Max, highlight.max));
    rows.push(b.line(""));

    for (i, class) in CharacterClass::ALL.into_iter().enumerate() {
        let mark = if settings.contains(class) { 'x' } else { ' ' };
        let text = format!("{}) [{}] {}", i + 3, mark, class.label());
        rows.push(if highlight.classes {
            b.styled_line(ERROR_BG, &text)
        } else {
            b.line(&text)
        });
    }

    rows.push(b.rule());
    let budget = (max_rows as usize).saturating_sub(FIXED_ROWS).max(1);
    let password_rows = password_area(form.password(), b.content_width(), budget);
    for line in &password_rows {
        rows.push(b.line(line));
    }
    rows.push(b.rule());

    let size = charset::size(settings.classes().iter().copied());
    rows.push(b.line(&format!(
        "Entropy: {} • {} chars",
        entropy_summary(settings.min_length(), settings.max_length(), size),
        size
    )));
    rows.push(match form.message() {
        Some(msg) => b.line(&format!("{RED}{msg}{RESET}")),
        None => b.line(""),
    });
    rows.push(b.bottom());

    let new_hint = if form.can_generate(settings) {
        LEGEND.to_string()
    } else {
        LEGEND.replacen("[n] New", &format!("{DIM}[n] New{RESET}"), 1)
    };
    rows.push(new_hint);
    rows
}

/// Wrapped password rows, at most `budget` of them. A cut password ends
/// in `…`.
fn password_area(password: Option<&str>, width: usize, budget: usize) -> Vec<String> {
    let mut lines = password.map(|p| wrap_chars(p, width)).unwrap_or_default();
    if lines.len() > budget {
        lines.truncate(budget);
        if let Some(last) = lines.last_mut() {
            last.pop();
            last.push('\u{2026}');
        }
    }
    while lines.len() < PASSWORD_ROWS.min(budget) {
        lines.push(String::new());
    }
    lines
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Min,
    Max,
}

fn length_row(b: &BoxStyle, form: &Form, bound: Bound, error: bool) -> String {
    let (field, number, label, text) = match bound {
        Bound::Min => (Field::MinLength, 1, "Minimum length", form.min_text()),
        Bound::Max => (Field::MaxLength, 2, "Maximum length", form.max_text()),
    };
    let value = match form.editing() {
        Some((editing, buf)) if editing == field => edit_view(buf.digits(), buf.cursor()),
        _ => text.to_string(),
    };
    let row = format!("{number}) {label}: {value}");
    if error {
        b.styled_line(ERROR_BG, &row)
    } else {
        b.line(&row)
    }
}

/// Underlined digits with the cursor cell shown in reverse video.
fn edit_view(digits: &str, cursor: usize) -> String {
    let (before, after) = digits.split_at(cursor.min(digits.len()));
    let mut rest = after.chars();
    let at = rest.next().unwrap_or(' ');
    format!(
        "{UNDERLINE}{before}\x1b[7m{at}\x1b[27m{}{RESET}",
        rest.as_str()
    )
}

/// Clear the screen and paint `rows` at the panel position, clipped to the
/// panel height.
pub fn draw(rows: &[String], geometry: Geometry) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(b"\x1b[2J")?;
    for (i, row) in rows.iter().take(geometry.height as usize).enumerate() {
        let y = geometry.y.saturating_add(i as u16);
        write!(out, "{}{}", move_to(geometry.x, y), row)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsRecord;
    use crate::terminal::console_width;

    fn settings(classes: &[CharacterClass]) -> Settings {
        Settings::from_record(SettingsRecord {
            min_length: 8,
            max_length: 12,
            classes: classes.iter().copied().collect(),
        })
    }

    #[test]
    fn panel_rows_fit_the_width() {
        let mut s = settings(&[CharacterClass::Upper, CharacterClass::Digit]);
        let form = Form::new(&mut s);
        let rows = render(&form, &s, 50, 40);

        let (legend, panel) = rows.split_last().unwrap();
        assert!(legend.contains("[q] Quit"));
        for row in panel {
            assert_eq!(console_width(row), 50, "row {row:?}");
        }
        assert!(panel.iter().any(|r| r.contains("1) Minimum length: 8")));
        assert!(panel.iter().any(|r| r.contains("2) Maximum length: 12")));
        assert!(panel.iter().any(|r| r.contains("3) [x] upper")));
        assert!(panel.iter().any(|r| r.contains("4) [ ] lower")));
    }

    #[test]
    fn long_passwords_wrap_inside_the_box() {
        let mut s = settings(&[CharacterClass::Lower]);
        s.set_min_length(200, None);
        let mut form = Form::new(&mut s);
        form.new_password(&s, &mut rand::rngs::OsRng);

        let rows = render(&form, &s, 40, 60);
        for row in &rows[..rows.len() - 1] {
            assert_eq!(console_width(row), 40);
        }
        assert!(rows.len() > 20);
    }

    #[test]
    fn tall_passwords_are_cut_to_the_terminal() {
        let mut s = settings(&[CharacterClass::Lower]);
        s.set_min_length(9999, None);
        let mut form = Form::new(&mut s);
        form.new_password(&s, &mut rand::rngs::OsRng);

        let rows = render(&form, &s, 40, 24);
        assert_eq!(rows.len(), 24);
        assert!(rows.iter().any(|r| r.contains('\u{2026}')));
        assert!(rows.iter().any(|r| r.contains("Entropy:")));
        assert!(rows.last().unwrap().contains("[q] Quit"));
        for row in &rows[..rows.len() - 1] {
            assert_eq!(console_width(row), 40);
        }

        let fitted = Geometry {
            width: 40,
            height: rows.len() as u16,
            x: 0,
            y: 20,
        }
        .fit(80, 24, MIN_WIDTH);
        assert_eq!(fitted.y, 0);
    }

    #[test]
    fn short_passwords_keep_the_minimum_area() {
        let lines = password_area(Some("abc"), 10, 9);
        assert_eq!(lines, vec!["abc", "", ""]);
        let cut = password_area(Some("abcdefghij"), 4, 2);
        assert_eq!(cut, vec!["abcd", "efg\u{2026}"]);
    }

    #[test]
    fn default_geometry_is_centered() {
        let g = default_geometry(100, 40);
        assert_eq!(g.width, DEFAULT_WIDTH);
        assert_eq!(g.x, 18);
        assert_eq!(g.y, 10);

        let tiny = default_geometry(30, 10);
        assert_eq!(tiny.width, 30);
        assert_eq!(tiny.x, 0);
    }

    #[test]
    fn edit_view_marks_the_cursor() {
        assert_eq!(
            edit_view("12", 1),
            format!("{UNDERLINE}1\x1b[7m2\x1b[27m{RESET}")
        );
        assert_eq!(
            edit_view("12", 2),
            format!("{UNDERLINE}12\x1b[7m \x1b[27m{RESET}")
        );
    }
}
