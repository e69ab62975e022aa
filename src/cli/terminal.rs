//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Styles used across command output. Plain text when color is unsupported.
pub trait Colorize {
    /// Green, for counts and completed actions
    fn success(&self) -> String;
    /// Amber, for skipped documents and issues
    fn warning(&self) -> String;
    /// Bold blue, for section titles
    fn heading(&self) -> String;
    /// Dimmed, for labels and markers
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::Orange>().to_string())
    }

    fn heading(&self) -> String {
        paint(self.as_ref(), |text| {
            text.fg::<css::LightBlue>().bold().to_string()
        })
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |text| text.dimmed().to_string())
    }
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Redis", 10), "Redis");
        assert_eq!(truncate("Redis", 5), "Redis");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate("Spring Framework Internals", 10), "Spring Fr…");
    }

    #[test]
    fn styled_text_keeps_its_content() {
        for styled in [
            "Redis".success(),
            "Redis".warning(),
            String::from("Redis").heading(),
            String::from("Redis").dim(),
        ] {
            assert!(styled.contains("Redis"));
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate("12–16 weeks", 6), "12–16…");
    }
}
