//! Color definitions for linepick themes.
//!
//! This module defines the [`ThemeColors`] struct which contains all color
//! values used in the linepick terminal UI. Colors are organized into three
//! categories: prompt line, result list, and semantic colors.

use ratatui::style::Color;

/// Defines all colors used in a linepick theme.
///
/// # Examples
///
/// ```
/// use linepick::theme::colors::ThemeColors;
///
/// let dark = ThemeColors::default_dark();
/// println!("Background: {:?}", dark.background);
///
/// let light = ThemeColors::default_light();
/// println!("Background: {:?}", light.background);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Prompt line
    /// Color for the prompt marker in insert mode.
    pub prompt: Color,
    /// Color for the prompt marker in history mode.
    pub history: Color,
    /// Color for the input cursor block.
    pub cursor: Color,
    /// Color for the `selected/total` counters.
    pub counters: Color,

    // Result list
    /// Main background color.
    pub background: Color,
    /// Main foreground/text color.
    pub foreground: Color,
    /// Foreground color for matched characters.
    pub highlight: Color,
    /// Background color for the selected row.
    pub selected_bg: Color,
    /// Foreground color for the selected row.
    pub selected_fg: Color,
    /// Scrollbar track color.
    pub scrollbar_track: Color,
    /// Scrollbar thumb color.
    pub scrollbar_thumb: Color,

    // Semantic colors
    /// Input color when nothing matches.
    pub error: Color,
    /// Counter color when results were truncated by the limit.
    pub warning: Color,
}

impl ThemeColors {
    /// Returns the default dark color scheme.
    ///
    /// Uses ANSI colors, so the actual RGB values displayed depend on the
    /// terminal configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use linepick::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_dark();
    /// assert_eq!(colors.background, Color::Reset);
    /// ```
    pub fn default_dark() -> Self {
        Self {
            prompt: Color::LightBlue,
            history: Color::Magenta,
            cursor: Color::LightBlue,
            counters: Color::DarkGray,

            background: Color::Reset, // Use terminal's default background
            foreground: Color::Gray,
            highlight: Color::Yellow,
            selected_bg: Color::DarkGray,
            selected_fg: Color::White,
            scrollbar_track: Color::Black,
            scrollbar_thumb: Color::Gray,

            error: Color::Red,
            warning: Color::Yellow,
        }
    }

    /// Returns the default light color scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use linepick::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_light();
    /// assert_eq!(colors.background, Color::Rgb(250, 250, 250));
    /// ```
    pub fn default_light() -> Self {
        Self {
            prompt: Color::Rgb(1, 132, 188),
            history: Color::Rgb(166, 38, 164),
            cursor: Color::Rgb(82, 139, 255),
            counters: Color::Rgb(160, 161, 167),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            highlight: Color::Rgb(202, 18, 67),
            selected_bg: Color::Rgb(220, 220, 220),
            selected_fg: Color::Rgb(56, 58, 66),
            scrollbar_track: Color::Rgb(238, 238, 238),
            scrollbar_thumb: Color::Rgb(160, 161, 167),

            error: Color::Rgb(202, 18, 67),
            warning: Color::Rgb(152, 104, 1),
        }
    }

    /// Returns the Gruvbox Dark color scheme.
    ///
    /// Based on the Gruvbox theme by morhetz.
    pub fn gruvbox_dark() -> Self {
        Self {
            prompt: Color::Rgb(131, 165, 152),   // aqua
            history: Color::Rgb(211, 134, 155),  // purple
            cursor: Color::Rgb(251, 184, 108),   // orange
            counters: Color::Rgb(146, 131, 116), // gray

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            highlight: Color::Rgb(250, 189, 47), // yellow
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(251, 241, 199),
            scrollbar_track: Color::Rgb(50, 48, 47),
            scrollbar_thumb: Color::Rgb(146, 131, 116),

            error: Color::Rgb(251, 73, 52),
            warning: Color::Rgb(254, 128, 25),
        }
    }

    /// Returns the Nord color scheme.
    ///
    /// Based on the Nord theme by Arctic Ice Studio.
    pub fn nord() -> Self {
        Self {
            prompt: Color::Rgb(136, 192, 208),  // frost cyan
            history: Color::Rgb(180, 142, 173), // aurora purple
            cursor: Color::Rgb(136, 192, 208),
            counters: Color::Rgb(76, 86, 106),

            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            highlight: Color::Rgb(235, 203, 139), // aurora yellow
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            scrollbar_track: Color::Rgb(59, 66, 82),
            scrollbar_thumb: Color::Rgb(129, 161, 193),

            error: Color::Rgb(191, 97, 106),
            warning: Color::Rgb(208, 135, 112),
        }
    }
}
