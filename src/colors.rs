//! Colored log fragments.

use owo_colors::{AnsiColors, DynColors, OwoColorize, Style};

const PALETTE: [AnsiColors; 12] = [
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::BrightRed,
    AnsiColors::BrightGreen,
    AnsiColors::BrightYellow,
    AnsiColors::BrightBlue,
    AnsiColors::BrightMagenta,
    AnsiColors::BrightCyan,
];

/// Which handler produced a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Api,
    Static,
    Document,
}

/// Stable palette index for a request id (FNV-1a).
pub fn color_for_id(id: &str) -> AnsiColors {
    let hash = id.bytes().fold(0x811c_9dc5u32, |acc, b| {
        (acc ^ u32::from(b)).wrapping_mul(0x0100_0193)
    });
    PALETTE[hash as usize % PALETTE.len()]
}

pub fn colored_id(id: &str) -> String {
    let style = Style::new().color(DynColors::Ansi(color_for_id(id)));
    format!("[{}]", id).style(style).to_string()
}

pub fn origin_tag(origin: Origin) -> String {
    match origin {
        Origin::Api => "API".yellow().to_string(),
        Origin::Static => "STATIC".green().to_string(),
        Origin::Document => "HTML".cyan().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_same_color() {
        assert_eq!(
            std::mem::discriminant(&color_for_id("k3x9a")),
            std::mem::discriminant(&color_for_id("k3x9a"))
        );
    }

    #[test]
    fn test_colored_id_wraps_id() {
        assert!(colored_id("k3x9a").contains("[k3x9a]"));
    }

    #[test]
    fn test_origin_tags() {
        assert!(origin_tag(Origin::Api).contains("API"));
        assert!(origin_tag(Origin::Document).contains("HTML"));
    }
}
