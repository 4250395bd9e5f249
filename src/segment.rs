use crate::{
    colors::{Palette, Tone},
    width::{strip_ansi, visible_width},
};

/// One field of the prompt, in plain and colored form. Both forms occupy the
/// same number of cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    pub plain: String,
    pub decorated: String,
}

impl Segment {
    pub fn painted(text: &str, tone: Tone, palette: &Palette) -> Self {
        Segment {
            plain: text.to_string(),
            decorated: palette.paint(text, tone),
        }
    }

    /// Text that is never colored.
    pub fn raw(text: &str) -> Self {
        Segment {
            plain: text.to_string(),
            decorated: text.to_string(),
        }
    }

    /// Output of a collaborator that colors its own text.
    pub fn from_decorated(decorated: &str) -> Self {
        Segment {
            plain: strip_ansi(decorated),
            decorated: decorated.to_string(),
        }
    }

    pub fn width(&self) -> usize {
        visible_width(&self.plain)
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// `None` for empty segments, so optional fields drop out of a plan.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn concat(parts: &[&Segment]) -> Self {
        Segment {
            plain: parts.iter().map(|x| x.plain.as_str()).collect(),
            decorated: parts.iter().map(|x| x.decorated.as_str()).collect(),
        }
    }
}

/// The single-cell decorations, colored once for the whole run.
#[derive(Clone, Debug)]
pub struct Glyphs {
    pub spacer: Segment,
    pub blank: Segment,
    pub left_bracket: Segment,
    pub right_bracket: Segment,
    pub left_brace: Segment,
    pub right_brace: Segment,
    pub left_angle: Segment,
    pub right_angle: Segment,
}

impl Glyphs {
    pub fn new(palette: &Palette) -> Self {
        let glyph = |c: &str| Segment::painted(c, Tone::DECORATION, palette);
        Glyphs {
            spacer: glyph("-"),
            blank: Segment::raw(" "),
            left_bracket: glyph("["),
            right_bracket: glyph("]"),
            left_brace: glyph("{"),
            right_brace: glyph("}"),
            left_angle: glyph("<"),
            right_angle: glyph(">"),
        }
    }
}
