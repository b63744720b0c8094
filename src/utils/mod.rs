// imgpress/src/utils/mod.rs
use crate::core::ImageKind;
use std::io::IsTerminal;
use std::path::Path;

pub fn is_supported_format(path: &Path) -> bool {
    ImageKind::from_path(path).is_some()
}

/// Sizes are shown in KB (1024 bytes) with two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2}KB", bytes as f64 / 1024.0)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn percentage_saved(original: u64, saved: i64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    round_to_tenth(saved as f64 * 100.0 / original as f64)
}

/// Pads or truncates `name` to exactly `width` characters.
pub fn fit_column(name: &str, width: usize) -> String {
    let count = name.chars().count();
    if count <= width {
        return format!("{:<width$}", name, width = width);
    }

    let keep = width.saturating_sub(3);
    let head: String = name.chars().take(keep).collect();
    format!("{}{}", head, &"..."[..width.min(3)])
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
}

impl Color {
    fn code(&self) -> &'static str {
        match self {
            Color::Red => "31",
            Color::Green => "32",
        }
    }
}

/// Wraps `text` in an ANSI color when `enabled`.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", color.code(), text)
    } else {
        text.to_string()
    }
}

pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kb_formatting_matches_report() {
        assert_eq!(format_kb(2000), "1.95KB");
        assert_eq!(format_kb(1500), "1.46KB");
        assert_eq!(format_kb(500), "0.49KB");
        assert_eq!(format_kb(0), "0.00KB");
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage_saved(2000, 500), 25.0);
        assert_eq!(percentage_saved(3, 1), 33.3);
        assert_eq!(percentage_saved(1000, -50), -5.0);
        assert_eq!(percentage_saved(0, 0), 0.0);
    }

    #[test]
    fn column_is_fixed_width() {
        assert_eq!(fit_column("a.png", 8), "a.png   ");
        let long = fit_column("a/very/long/directory/name/picture.png", 12);
        assert_eq!(long.chars().count(), 12);
        assert!(long.ends_with("..."));
    }

    #[test]
    fn paint_is_noop_when_disabled() {
        assert_eq!(paint("x", Color::Red, false), "x");
        assert_eq!(paint("x", Color::Green, true), "\x1b[32mx\x1b[0m");
    }
}
