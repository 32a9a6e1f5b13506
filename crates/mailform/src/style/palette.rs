//! Color palette with light and dark variants.

use iced::Color;

/// Application theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// Mode for the `dark_mode` config flag.
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

/// Colors used by the compose window.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    pub surface: Color,
    pub surface_sunken: Color,
    pub background: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    pub accent_green: Color,
    pub accent_red: Color,

    pub hover: Color,
    pub selected: Color,

    pub border_subtle: Color,
    pub border_medium: Color,
}

impl Palette {
    /// Light palette: white form on a pale grey window.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb(0.11, 0.42, 0.86),
            primary_light: Color::from_rgb(0.30, 0.57, 0.95),
            primary_dark: Color::from_rgb(0.07, 0.32, 0.70),

            surface: Color::WHITE,
            surface_sunken: Color::from_rgb(0.96, 0.97, 0.98),
            background: Color::from_rgb(0.94, 0.95, 0.96),

            text_primary: Color::from_rgb(0.10, 0.11, 0.14),
            text_secondary: Color::from_rgb(0.38, 0.42, 0.49),
            text_muted: Color::from_rgb(0.60, 0.63, 0.68),
            text_on_primary: Color::WHITE,

            accent_green: Color::from_rgb(0.13, 0.60, 0.33),
            accent_red: Color::from_rgb(0.85, 0.20, 0.24),

            hover: Color::from_rgb(0.93, 0.95, 0.98),
            selected: Color::from_rgb(0.88, 0.93, 1.0),

            border_subtle: Color::from_rgb(0.88, 0.89, 0.91),
            border_medium: Color::from_rgb(0.78, 0.80, 0.84),
        }
    }

    /// Dark palette: charcoal surfaces with a blue accent.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb(0.36, 0.62, 1.0),
            primary_light: Color::from_rgb(0.50, 0.72, 1.0),
            primary_dark: Color::from_rgb(0.24, 0.48, 0.86),

            surface: Color::from_rgb(0.13, 0.14, 0.16),
            surface_sunken: Color::from_rgb(0.10, 0.11, 0.13),
            background: Color::from_rgb(0.08, 0.09, 0.10),

            text_primary: Color::from_rgb(0.91, 0.92, 0.94),
            text_secondary: Color::from_rgb(0.66, 0.69, 0.73),
            text_muted: Color::from_rgb(0.48, 0.51, 0.56),
            text_on_primary: Color::from_rgb(0.06, 0.07, 0.09),

            accent_green: Color::from_rgb(0.30, 0.82, 0.50),
            accent_red: Color::from_rgb(1.0, 0.40, 0.42),

            hover: Color::from_rgb(0.17, 0.18, 0.21),
            selected: Color::from_rgb(0.14, 0.21, 0.32),

            border_subtle: Color::from_rgb(0.21, 0.22, 0.25),
            border_medium: Color::from_rgb(0.30, 0.31, 0.35),
        }
    }

    /// Gets the palette for a given theme mode.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

/// Current active palette - defaults to light mode.
static CURRENT: std::sync::LazyLock<std::sync::RwLock<Palette>> =
    std::sync::LazyLock::new(|| std::sync::RwLock::new(Palette::light()));

/// Sets the current global palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Gets a copy of the current palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::light(), |p| *p)
}
