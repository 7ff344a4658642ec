//! Formatting attributes carried by a run.

/// A WordprocessingML boolean toggle property (`w:b`, `w:i`, ...), which is
/// tri-state: the element can be absent, present (on), or present with
/// `w:val="0"`/`"false"` (explicit off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    #[default]
    Absent,
    On,
    Off,
}

impl Toggle {
    /// Whether the property should be treated as active for formatting-diff
    /// and textconv purposes. Only an explicit `On` counts.
    pub fn is_on(self) -> bool {
        matches!(self, Toggle::On)
    }
}

/// Formatting attributes of a run. Cloned by value whenever the Splicer or
/// CommentWriter manufactures a new run, so emitted markup always inherits
/// the exact formatting of the run it was split or derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProperties {
    pub bold: Toggle,
    pub italic: Toggle,
    pub underline: Toggle,
    pub strikethrough: Toggle,
    /// `w:rFonts/@w:ascii`.
    pub font_ascii: Option<String>,
    /// `w:rFonts/@w:hAnsi`.
    pub font_high_ansi: Option<String>,
    /// `w:rFonts/@w:cs`.
    pub font_complex_script: Option<String>,
    /// `w:sz/@w:val`, in half-points, kept as the original string.
    pub font_size_half_points: Option<String>,
    /// `w:color/@w:val`, hex digits without a leading `#`.
    pub color: Option<String>,
    /// `w:highlight/@w:val`, a named color.
    pub highlight: Option<String>,
}

impl RunProperties {
    /// The font family that should display: Ascii wins, else HighAnsi, else
    /// ComplexScript.
    pub fn effective_font(&self) -> Option<&str> {
        self.font_ascii
            .as_deref()
            .or(self.font_high_ansi.as_deref())
            .or(self.font_complex_script.as_deref())
    }
}
