// ABOUTME: Theme system with semantic color roles.
// ABOUTME: Built-in themes and theme registry.

use ratatui::style::Color;

pub struct Theme {
    pub name: &'static str,
    /// Page background behind the circles
    pub background: Color,
    /// Card and bar fill
    pub surface: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    /// Text on a `button` fill
    pub text_inverse: Color,
    pub button: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

/// Deep blue page with white buttons.
pub static DEFAULT_THEME: Theme = Theme {
    name: "default",
    background: Color::Rgb(23, 37, 84),
    surface: Color::Rgb(36, 52, 104),
    border: Color::Rgb(110, 125, 170),
    border_focused: Color::Rgb(255, 255, 255),
    text: Color::Rgb(255, 255, 255),
    text_muted: Color::Rgb(229, 231, 235),
    text_inverse: Color::Rgb(30, 58, 138),
    button: Color::Rgb(255, 255, 255),
    accent: Color::Rgb(147, 197, 253),
    success: Color::Rgb(110, 231, 183),
    warning: Color::Rgb(253, 224, 71),
    error: Color::Rgb(252, 129, 129),
};

pub static LIGHT_THEME: Theme = Theme {
    name: "light",
    background: Color::Rgb(248, 250, 252),
    surface: Color::Rgb(255, 255, 255),
    border: Color::Rgb(203, 213, 225),
    border_focused: Color::Rgb(37, 99, 235),
    text: Color::Rgb(30, 30, 40),
    text_muted: Color::Rgb(100, 100, 120),
    text_inverse: Color::Rgb(255, 255, 255),
    button: Color::Rgb(37, 99, 235),
    accent: Color::Rgb(79, 70, 229),
    success: Color::Rgb(22, 163, 74),
    warning: Color::Rgb(202, 138, 4),
    error: Color::Rgb(220, 38, 38),
};

pub static MIDNIGHT_THEME: Theme = Theme {
    name: "midnight",
    background: Color::Rgb(12, 14, 28),
    surface: Color::Rgb(20, 24, 45),
    border: Color::Rgb(60, 70, 110),
    border_focused: Color::Rgb(100, 160, 255),
    text: Color::Rgb(200, 210, 235),
    text_muted: Color::Rgb(100, 115, 150),
    text_inverse: Color::Rgb(12, 14, 28),
    button: Color::Rgb(80, 140, 240),
    accent: Color::Rgb(100, 160, 255),
    success: Color::Rgb(80, 200, 160),
    warning: Color::Rgb(240, 180, 100),
    error: Color::Rgb(240, 90, 110),
};

pub static EMBER_THEME: Theme = Theme {
    name: "ember",
    background: Color::Rgb(28, 20, 18),
    surface: Color::Rgb(42, 30, 26),
    border: Color::Rgb(110, 80, 64),
    border_focused: Color::Rgb(255, 140, 60),
    text: Color::Rgb(240, 225, 210),
    text_muted: Color::Rgb(160, 140, 120),
    text_inverse: Color::Rgb(28, 20, 18),
    button: Color::Rgb(255, 140, 60),
    accent: Color::Rgb(255, 100, 80),
    success: Color::Rgb(140, 200, 100),
    warning: Color::Rgb(255, 200, 80),
    error: Color::Rgb(255, 80, 80),
};

pub fn get_theme(name: &str) -> &'static Theme {
    match name {
        "default" => &DEFAULT_THEME,
        "light" => &LIGHT_THEME,
        "midnight" => &MIDNIGHT_THEME,
        "ember" => &EMBER_THEME,
        _ => &DEFAULT_THEME,
    }
}

pub fn list_themes() -> &'static [&'static str] {
    &["default", "light", "midnight", "ember"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_theme_returns_correct_theme() {
        for name in list_themes() {
            assert_eq!(get_theme(name).name, *name);
        }
    }

    #[test]
    fn test_get_theme_unknown_returns_default() {
        assert_eq!(get_theme("unknown").name, "default");
    }

    #[test]
    fn test_light_theme_has_light_background() {
        let theme = get_theme("light");
        if let Color::Rgb(r, g, b) = theme.background {
            assert!(r > 200 && g > 200 && b > 200);
        } else {
            panic!("Expected RGB color");
        }
    }

    #[test]
    fn test_default_theme_is_deep_blue() {
        if let Color::Rgb(r, g, b) = DEFAULT_THEME.background {
            assert!(b > r && b > g);
        } else {
            panic!("Expected RGB color");
        }
    }
}
