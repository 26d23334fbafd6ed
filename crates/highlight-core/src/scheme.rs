//! Token categories and the color scheme that maps them to display styles.
//!
//! Tokenizers emit coarse [`TokenKind`] categories; a [`SyntaxScheme`] maps
//! each category to concrete display attributes. The scheme is supplied by
//! the host theme layer and treated as immutable for the duration of a
//! highlighting pass: a pass captures the scheme it was started with, and a
//! theme change swaps the whole scheme and starts a fresh pass.

/// A packed ARGB color (`0xAARRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Create a fully opaque color from 8-bit channels.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    /// Alpha channel.
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// Token categories a tokenizer can emit.
///
/// Deliberately coarse: grammars map their own constructs down to these, and
/// schemes only need to style this fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal.
    Number,
    /// Operator or punctuation.
    Operator,
    /// Language keyword.
    Keyword,
    /// Type name.
    Type,
    /// Language constant (`true`, `null`, ...).
    LangConst,
    /// Function or method name.
    Method,
    /// String or character literal.
    String,
    /// Comment.
    Comment,
}

/// Display attributes for one token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Foreground color.
    pub color: Color,
    /// Optional background fill.
    pub background: Option<Color>,
    /// Bold face.
    pub bold: bool,
    /// Italic face.
    pub italic: bool,
}

impl TextStyle {
    /// A plain foreground-only style.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            background: None,
            bold: false,
            italic: false,
        }
    }

    /// Set the background fill.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    /// Set the bold face flag.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the italic face flag.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Maps token categories to display styles, plus the two highlight
/// backgrounds the engine itself paints (search matches and the
/// matching-delimiter pair).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxScheme {
    /// Style for [`TokenKind::Number`].
    pub number: TextStyle,
    /// Style for [`TokenKind::Operator`].
    pub operator: TextStyle,
    /// Style for [`TokenKind::Keyword`].
    pub keyword: TextStyle,
    /// Style for [`TokenKind::Type`].
    pub type_name: TextStyle,
    /// Style for [`TokenKind::LangConst`].
    pub lang_const: TextStyle,
    /// Style for [`TokenKind::Method`].
    pub method: TextStyle,
    /// Style for [`TokenKind::String`].
    pub string: TextStyle,
    /// Style for [`TokenKind::Comment`].
    pub comment: TextStyle,
    /// Background painted behind search matches.
    pub find_result_background: Color,
    /// Background painted behind the matching-delimiter pair.
    pub delimiter_background: Color,
}

impl SyntaxScheme {
    /// Resolve the display style for a token category.
    pub fn style_for(&self, token: TokenKind) -> TextStyle {
        match token {
            TokenKind::Number => self.number,
            TokenKind::Operator => self.operator,
            TokenKind::Keyword => self.keyword,
            TokenKind::Type => self.type_name,
            TokenKind::LangConst => self.lang_const,
            TokenKind::Method => self.method,
            TokenKind::String => self.string,
            TokenKind::Comment => self.comment,
        }
    }

    /// A classic dark scheme, used as the default until the host installs its
    /// own.
    pub fn darcula() -> Self {
        Self {
            number: TextStyle::new(Color(0xFF68_97BB)),
            operator: TextStyle::new(Color(0xFFE8_E2B7)),
            keyword: TextStyle::new(Color(0xFFCC_7832)),
            type_name: TextStyle::new(Color(0xFFEC_7600)),
            lang_const: TextStyle::new(Color(0xFF98_76AA)),
            method: TextStyle::new(Color(0xFFFF_C66D)),
            string: TextStyle::new(Color(0xFF6A_8759)),
            comment: TextStyle::new(Color(0xFF80_8080)).italic(),
            find_result_background: Color(0xFF32_593D),
            delimiter_background: Color(0xFF3B_514D),
        }
    }
}

impl Default for SyntaxScheme {
    fn default() -> Self {
        Self::darcula()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channels() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.0, 0xFF12_3456);
        assert_eq!(c.alpha(), 0xFF);
        assert_eq!(c.red(), 0x12);
        assert_eq!(c.green(), 0x34);
        assert_eq!(c.blue(), 0x56);
    }

    #[test]
    fn test_style_for_covers_every_category() {
        let scheme = SyntaxScheme::darcula();
        assert_eq!(scheme.style_for(TokenKind::Keyword), scheme.keyword);
        assert_eq!(scheme.style_for(TokenKind::Type), scheme.type_name);
        assert_eq!(scheme.style_for(TokenKind::Comment), scheme.comment);
        assert!(scheme.style_for(TokenKind::Comment).italic);
    }
}
