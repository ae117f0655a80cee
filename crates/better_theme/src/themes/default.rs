//! Built-in "better" theme

use crate::color::Color;
use crate::theme::{ColorScheme, Theme, ThemeBundle};
use crate::tokens::*;

/// The library's default look
#[derive(Clone, Debug)]
pub struct BetterTheme {
    scheme: ColorScheme,
    colors: ColorTokens,
    typography: TypographyTokens,
    spacing: SpacingTokens,
    radii: RadiusTokens,
    animations: AnimationTokens,
}

impl BetterTheme {
    pub fn light() -> Self {
        Self {
            scheme: ColorScheme::Light,
            colors: ColorTokens {
                primary: Color::from_hex(0x6366F1),
                primary_hover: Color::from_hex(0x4F46E5),
                secondary: Color::from_hex(0x64748B),
                success: Color::from_hex(0x16A34A),
                warning: Color::from_hex(0xD97706),
                error: Color::from_hex(0xDC2626),
                info: Color::from_hex(0x0284C7),
                background: Color::from_hex(0xF8FAFC),
                surface: Color::WHITE,
                surface_elevated: Color::from_hex(0xF1F5F9),
                backdrop: Color::BLACK.with_alpha(0.4),
                text_primary: Color::from_hex(0x0F172A),
                text_secondary: Color::from_hex(0x475569),
                text_tertiary: Color::from_hex(0x94A3B8),
                text_inverse: Color::WHITE,
                border: Color::from_hex(0xE2E8F0),
                border_hover: Color::from_hex(0xCBD5E1),
                border_focus: Color::from_hex(0x6366F1),
                border_error: Color::from_hex(0xDC2626),
                input_bg: Color::WHITE,
                input_bg_disabled: Color::from_hex(0xF1F5F9),
                selection: Color::from_hex(0x6366F1).with_alpha(0.15),
            },
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            radii: RadiusTokens::default(),
            animations: AnimationTokens::default(),
        }
    }

    pub fn dark() -> Self {
        Self {
            scheme: ColorScheme::Dark,
            colors: ColorTokens {
                primary: Color::from_hex(0x818CF8),
                primary_hover: Color::from_hex(0xA5B4FC),
                secondary: Color::from_hex(0x94A3B8),
                success: Color::from_hex(0x22C55E),
                warning: Color::from_hex(0xF59E0B),
                error: Color::from_hex(0xF87171),
                info: Color::from_hex(0x38BDF8),
                background: Color::from_hex(0x020617),
                surface: Color::from_hex(0x0F172A),
                surface_elevated: Color::from_hex(0x1E293B),
                backdrop: Color::BLACK.with_alpha(0.6),
                text_primary: Color::from_hex(0xF8FAFC),
                text_secondary: Color::from_hex(0xCBD5E1),
                text_tertiary: Color::from_hex(0x64748B),
                text_inverse: Color::from_hex(0x0F172A),
                border: Color::from_hex(0x1E293B),
                border_hover: Color::from_hex(0x334155),
                border_focus: Color::from_hex(0x818CF8),
                border_error: Color::from_hex(0xF87171),
                input_bg: Color::from_hex(0x0F172A),
                input_bg_disabled: Color::from_hex(0x1E293B),
                selection: Color::from_hex(0x818CF8).with_alpha(0.25),
            },
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            radii: RadiusTokens::default(),
            animations: AnimationTokens::default(),
        }
    }

    pub fn bundle() -> ThemeBundle {
        ThemeBundle::new("better", Self::light(), Self::dark())
    }
}

impl Theme for BetterTheme {
    fn name(&self) -> &str {
        "better"
    }

    fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    fn colors(&self) -> &ColorTokens {
        &self.colors
    }

    fn typography(&self) -> &TypographyTokens {
        &self.typography
    }

    fn spacing(&self) -> &SpacingTokens {
        &self.spacing
    }

    fn radii(&self) -> &RadiusTokens {
        &self.radii
    }

    fn animations(&self) -> &AnimationTokens {
        &self.animations
    }
}
