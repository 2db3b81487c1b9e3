//! Style constants and clap help styling.

use anstyle::{AnsiColor, Color, Effects, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub(crate) const SUCCESS: Style = fg(AnsiColor::Green);

pub(crate) const ERROR: Style = fg(AnsiColor::Red);

pub(crate) const WARNING: Style = fg(AnsiColor::Yellow);

/// Section headers, e.g. the generated file name above its source.
pub(crate) const HEADER: Style = fg(AnsiColor::Magenta).effects(Effects::BOLD);

pub(crate) const LABEL: Style = Style::new().effects(Effects::BOLD);

pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

pub(crate) const HINT: Style = fg(AnsiColor::Cyan).effects(Effects::DIMMED);

/// Help output palette, matching the message styles above.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(fg(AnsiColor::Magenta).effects(Effects::BOLD))
        .usage(fg(AnsiColor::Magenta).effects(Effects::BOLD))
        .literal(fg(AnsiColor::Cyan))
        .placeholder(fg(AnsiColor::Cyan))
        .error(fg(AnsiColor::Red).effects(Effects::BOLD))
        .valid(fg(AnsiColor::Green))
        .invalid(fg(AnsiColor::Yellow))
}
