use ratatui::style::{Color, Modifier};

/// Page layout selected by a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Single flowing column.
    Standard,
    /// Two balanced columns.
    TwoColumn,
    /// Narrow cue pane (key points + summary) next to a wide notes pane.
    Cornell,
}

/// Page header presentation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Centered brand line over a double rule.
    Centered,
    /// Heavy left-aligned title with a tagline.
    Masthead,
    /// Brand bar with a fill-in date slot.
    BrandBar,
}

/// A fixed presentation profile. Themes are only ever selected from
/// [`THEMES`]; nothing creates or mutates one at runtime. All rendering
/// decisions read these tokens, never the theme id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub layout: LayoutKind,
    pub header: HeaderStyle,
    pub primary: Color,
    pub secondary: Color,
    /// Accent glyph prefixed to level-2 headings.
    pub heading_glyph: &'static str,
    /// Marker replacing the default unordered-list bullet.
    pub bullet_glyph: &'static str,
    /// Character a horizontal rule is drawn with.
    pub rule_glyph: char,
    /// Extra modifiers applied to headings (the terminal stand-in for a
    /// heading font choice).
    pub heading_modifier: Modifier,
    /// Whether bold spans in body text also take the primary color.
    pub accent_bold: bool,
}

pub const THEMES: &[Theme] = &[
    Theme {
        id: "academic-classic",
        name: "Classic Academic (Purple)",
        layout: LayoutKind::Standard,
        header: HeaderStyle::Centered,
        primary: Color::Rgb(101, 7, 97),
        secondary: Color::Rgb(250, 245, 255),
        heading_glyph: "★",
        bullet_glyph: "◆",
        rule_glyph: '═',
        heading_modifier: Modifier::BOLD,
        accent_bold: false,
    },
    Theme {
        id: "modern-clean",
        name: "Modern Minimal (Ink)",
        layout: LayoutKind::TwoColumn,
        header: HeaderStyle::Masthead,
        primary: Color::Rgb(17, 24, 39),
        secondary: Color::Rgb(255, 255, 255),
        heading_glyph: "/",
        bullet_glyph: "•",
        rule_glyph: '━',
        heading_modifier: Modifier::BOLD,
        accent_bold: true,
    },
    Theme {
        id: "study-cornell",
        name: "Cornell Notes (Emerald)",
        layout: LayoutKind::Cornell,
        header: HeaderStyle::BrandBar,
        primary: Color::Rgb(5, 150, 105),
        secondary: Color::Rgb(236, 253, 245),
        heading_glyph: "▌",
        bullet_glyph: "▸",
        rule_glyph: '─',
        heading_modifier: Modifier::BOLD.union(Modifier::UNDERLINED),
        accent_bold: false,
    },
];

pub fn theme_by_id(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}
