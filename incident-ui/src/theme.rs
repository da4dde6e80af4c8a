#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
}

impl Palette {
    /// Inline custom properties consumed by `style.css`.
    pub fn css_vars(&self) -> String {
        format!(
            "--primary:{};--secondary:{};--background:{};--surface:{};--text:{};",
            self.primary, self.secondary, self.background, self.surface, self.text
        )
    }
}

impl ThemeMode {
    pub const STORAGE_KEY: &'static str = "themeMode";

    /// Only an explicit `"dark"` selects the dark theme.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Dark mode",
            Self::Dark => "Light mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                primary: "#1976d2",
                secondary: "#7948ec",
                background: "#fafafa",
                surface: "#ffffff",
                text: "rgba(0, 0, 0, 0.87)",
            },
            Self::Dark => Palette {
                primary: "#1976d2",
                secondary: "#7948ec",
                background: "#121212",
                surface: "#1e1e1e",
                text: "#ffffff",
            },
        }
    }
}
