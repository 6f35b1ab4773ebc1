//! Theme system for linepick.
//!
//! # Built-in Themes
//!
//! - `"default-dark"`: A dark theme using the terminal's ANSI palette
//! - `"default-light"`: A light theme for well-lit environments
//! - `"gruvbox-dark"`: Retro groove color scheme with warm, earthy tones
//! - `"nord"`: Arctic, north-bluish color palette
//!
//! # Examples
//!
//! ```
//! use linepick::theme::get_builtin_theme;
//!
//! let theme = get_builtin_theme("default-dark").unwrap();
//! println!("Theme: {}", theme.name);
//! println!("Background: {:?}", theme.colors.background);
//! ```

pub mod colors;

use colors::ThemeColors;

/// A color theme for the linepick terminal UI.
///
/// # Examples
///
/// ```
/// use linepick::theme::{Theme, get_builtin_theme};
///
/// let theme = get_builtin_theme("nord").unwrap();
/// assert_eq!(theme.name, "nord");
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    /// The name of the theme (e.g., "default-dark").
    pub name: String,
    /// The color definitions for this theme.
    pub colors: ThemeColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default-dark".to_string(),
            colors: ThemeColors::default_dark(),
        }
    }
}

/// Returns a built-in theme by name, or `None` if the name is unknown.
///
/// # Examples
///
/// ```
/// use linepick::theme::get_builtin_theme;
///
/// assert!(get_builtin_theme("gruvbox-dark").is_some());
/// assert!(get_builtin_theme("nonexistent").is_none());
/// ```
pub fn get_builtin_theme(name: &str) -> Option<Theme> {
    let colors = match name {
        "default-dark" => ThemeColors::default_dark(),
        "default-light" => ThemeColors::default_light(),
        "gruvbox-dark" => ThemeColors::gruvbox_dark(),
        "nord" => ThemeColors::nord(),
        _ => return None,
    };
    Some(Theme {
        name: name.to_string(),
        colors,
    })
}

/// Returns a sorted list of all built-in theme names.
pub fn list_builtin_themes() -> Vec<String> {
    let mut themes = vec![
        "default-dark".to_string(),
        "default-light".to_string(),
        "gruvbox-dark".to_string(),
        "nord".to_string(),
    ];
    themes.sort();
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_theme_loads() {
        for name in list_builtin_themes() {
            let theme = get_builtin_theme(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }
}
