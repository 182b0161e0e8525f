//! Layout configuration for emitted code.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation (TypeScript, JavaScript).
    pub const TYPESCRIPT: Self = Self::Spaces(2);

    /// 4-space indentation (C#, Rust).
    pub const CSHARP: Self = Self::Spaces(4);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            Self::Spaces(8) => "        ",
            // Fallback to 4 whitespaces
            Self::Spaces(_) => "    ",
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}

/// Placement of an opening brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// Opening brace on the same line as the header (TypeScript).
    #[default]
    SameLine,
    /// Opening brace on its own line (C#).
    NextLine,
}

/// Line ending sequence for emitted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Complete layout configuration consumed by the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitStyle {
    pub indent: Indent,
    pub braces: BraceStyle,
    pub line_ending: LineEnding,
    /// Column budget beyond which a parenthesized list is wrapped.
    pub max_width: usize,
}

impl EmitStyle {
    /// TypeScript layout: 2 spaces, same-line braces.
    pub fn typescript() -> Self {
        Self {
            indent: Indent::TYPESCRIPT,
            braces: BraceStyle::SameLine,
            line_ending: LineEnding::Lf,
            max_width: 100,
        }
    }

    /// C# layout: 4 spaces, next-line braces.
    pub fn csharp() -> Self {
        Self {
            indent: Indent::CSHARP,
            braces: BraceStyle::NextLine,
            line_ending: LineEnding::Lf,
            max_width: 100,
        }
    }

    /// Override the column budget.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Override the line ending.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

impl Default for EmitStyle {
    fn default() -> Self {
        Self::csharp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::Spaces(4).as_str(), "    ");
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_style_presets() {
        let ts = EmitStyle::typescript();
        assert_eq!(ts.indent, Indent::TYPESCRIPT);
        assert_eq!(ts.braces, BraceStyle::SameLine);

        let cs = EmitStyle::csharp();
        assert_eq!(cs.indent, Indent::CSHARP);
        assert_eq!(cs.braces, BraceStyle::NextLine);
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    }
}
