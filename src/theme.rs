use gpui::*;
use serde::Deserialize;

/// Which palette to use, from the `theme` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the window's light/dark appearance
    #[default]
    System,
    Light,
    Dark,
}

fn is_dark_appearance(appearance: WindowAppearance) -> bool {
    matches!(appearance, WindowAppearance::Dark | WindowAppearance::VibrantDark)
}

pub struct Theme {
    pub background: Hsla,
    pub foreground: Hsla,
    pub border: Hsla,
    pub input_background: Hsla,
    pub countdown: Hsla,
    pub start: Hsla,
    pub stop: Hsla,
    pub secondary: Hsla,
    pub secondary_foreground: Hsla,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: rgb(0xffffff).into(),
            foreground: rgb(0x111827).into(),
            border: rgb(0xd1d5db).into(),
            input_background: rgb(0xf9fafb).into(),
            countdown: rgb(0x2563eb).into(),
            start: rgb(0x10b981).into(),
            stop: rgb(0xef4444).into(),
            secondary: rgb(0xe5e7eb).into(),
            secondary_foreground: rgb(0x374151).into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: rgb(0x1f2937).into(),
            foreground: rgb(0xf9fafb).into(),
            border: rgb(0x4b5563).into(),
            input_background: rgb(0x111827).into(),
            countdown: rgb(0x60a5fa).into(),
            start: rgb(0x059669).into(),
            stop: rgb(0xdc2626).into(),
            secondary: rgb(0x4b5563).into(),
            secondary_foreground: rgb(0xe5e7eb).into(),
        }
    }

    pub fn resolve(preference: ThemePreference, appearance: WindowAppearance) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
            ThemePreference::System if is_dark_appearance(appearance) => Self::dark(),
            ThemePreference::System => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // `gpui::*` exports a `test` macro that would shadow the built-in attribute.
    use core::prelude::v1::test;

    #[test]
    fn system_preference_follows_appearance() {
        let dark = Theme::resolve(ThemePreference::System, WindowAppearance::VibrantDark);
        assert_eq!(dark.background, Theme::dark().background);

        let light = Theme::resolve(ThemePreference::System, WindowAppearance::Light);
        assert_eq!(light.background, Theme::light().background);
    }

    #[test]
    fn explicit_preference_overrides_appearance() {
        let light = Theme::resolve(ThemePreference::Light, WindowAppearance::Dark);
        assert_eq!(light.background, Theme::light().background);

        let dark = Theme::resolve(ThemePreference::Dark, WindowAppearance::VibrantLight);
        assert_eq!(dark.countdown, Theme::dark().countdown);
    }
}
