//! Design tokens
//!
//! Token sets are plain structs so themes can override a few fields with
//! `..Default::default()`. Widgets look values up through the token enums
//! ([`ColorToken`], [`SpacingToken`], [`RadiusToken`]) via `ThemeContext`.

use crate::color::Color;

// =============================================================================
// COLORS
// =============================================================================

/// Semantic color slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Primary,
    PrimaryHover,
    Secondary,
    Success,
    Warning,
    Error,
    Info,
    Background,
    Surface,
    SurfaceElevated,
    Backdrop,
    TextPrimary,
    TextSecondary,
    TextTertiary,
    TextInverse,
    Border,
    BorderHover,
    BorderFocus,
    BorderError,
    InputBg,
    InputBgDisabled,
    Selection,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorTokens {
    pub primary: Color,
    pub primary_hover: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub background: Color,
    pub surface: Color,
    pub surface_elevated: Color,
    pub backdrop: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub text_inverse: Color,
    pub border: Color,
    pub border_hover: Color,
    pub border_focus: Color,
    pub border_error: Color,
    pub input_bg: Color,
    pub input_bg_disabled: Color,
    pub selection: Color,
}

impl ColorTokens {
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryHover => self.primary_hover,
            ColorToken::Secondary => self.secondary,
            ColorToken::Success => self.success,
            ColorToken::Warning => self.warning,
            ColorToken::Error => self.error,
            ColorToken::Info => self.info,
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::SurfaceElevated => self.surface_elevated,
            ColorToken::Backdrop => self.backdrop,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextTertiary => self.text_tertiary,
            ColorToken::TextInverse => self.text_inverse,
            ColorToken::Border => self.border,
            ColorToken::BorderHover => self.border_hover,
            ColorToken::BorderFocus => self.border_focus,
            ColorToken::BorderError => self.border_error,
            ColorToken::InputBg => self.input_bg,
            ColorToken::InputBgDisabled => self.input_bg_disabled,
            ColorToken::Selection => self.selection,
        }
    }
}

// =============================================================================
// TYPOGRAPHY
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct FontFamily {
    pub name: String,
    pub fallbacks: Vec<String>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, fallbacks: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            fallbacks: fallbacks.into_iter().map(String::from).collect(),
        }
    }

    /// CSS `font-family` value
    pub fn to_css(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.fallbacks.iter().map(String::as_str))
            .map(|f| {
                if f.contains(' ') {
                    format!("\"{f}\"")
                } else {
                    f.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypographyTokens {
    pub font_sans: FontFamily,
    pub font_mono: FontFamily,
    /// Body text size in px
    pub font_size: f32,
    pub font_size_sm: f32,
    pub font_size_lg: f32,
    pub line_height: f32,
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            font_sans: FontFamily::new("Inter", vec!["system-ui", "sans-serif"]),
            font_mono: FontFamily::new("JetBrains Mono", vec!["monospace"]),
            font_size: 16.0,
            font_size_sm: 14.0,
            font_size_lg: 20.0,
            line_height: 1.5,
        }
    }
}

// =============================================================================
// SPACING & RADII
// =============================================================================

/// Spacing scale, in multiples of the 4px base unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpacingToken {
    Space0,
    Space1,
    Space2,
    Space3,
    Space4,
    Space6,
    Space8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpacingTokens {
    /// Base unit in px
    pub unit: f32,
}

impl SpacingTokens {
    pub fn get(&self, token: SpacingToken) -> f32 {
        let steps = match token {
            SpacingToken::Space0 => 0.0,
            SpacingToken::Space1 => 1.0,
            SpacingToken::Space2 => 2.0,
            SpacingToken::Space3 => 3.0,
            SpacingToken::Space4 => 4.0,
            SpacingToken::Space6 => 6.0,
            SpacingToken::Space8 => 8.0,
        };
        steps * self.unit
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self { unit: 4.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RadiusToken {
    None,
    Sm,
    Md,
    Lg,
    Full,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadiusTokens {
    pub radius_sm: f32,
    pub radius_md: f32,
    pub radius_lg: f32,
}

impl RadiusTokens {
    pub fn get(&self, token: RadiusToken) -> f32 {
        match token {
            RadiusToken::None => 0.0,
            RadiusToken::Sm => self.radius_sm,
            RadiusToken::Md => self.radius_md,
            RadiusToken::Lg => self.radius_lg,
            RadiusToken::Full => 9999.0,
        }
    }
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            radius_sm: 4.0,
            radius_md: 8.0,
            radius_lg: 12.0,
        }
    }
}

// =============================================================================
// ANIMATION
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationTokens {
    /// Default transition duration; also the popover exit delay
    pub transition_ms: u64,
    /// Delay before a tooltip appears
    pub tooltip_delay_ms: u64,
}

impl Default for AnimationTokens {
    fn default() -> Self {
        Self {
            transition_ms: 200,
            tooltip_delay_ms: 300,
        }
    }
}
