use const_format::formatcp;

#[derive(Clone, Copy)]
pub struct Color {
    pub fg: u8,
    pub bg: u8,
    pub fgb: u8,
    pub bgb: u8,
}

pub const BLACK: Color = Color {
    fg: 30,
    bg: 40,
    fgb: 90,
    bgb: 100,
};
pub const RED: Color = Color {
    fg: 31,
    bg: 41,
    fgb: 91,
    bgb: 101,
};
pub const GREEN: Color = Color {
    fg: 32,
    bg: 42,
    fgb: 92,
    bgb: 102,
};
pub const YELLOW: Color = Color {
    fg: 33,
    bg: 43,
    fgb: 93,
    bgb: 103,
};
pub const BLUE: Color = Color {
    fg: 34,
    bg: 44,
    fgb: 94,
    bgb: 104,
};
pub const MAGENTA: Color = Color {
    fg: 35,
    bg: 45,
    fgb: 95,
    bgb: 105,
};
pub const CYAN: Color = Color {
    fg: 36,
    bg: 46,
    fgb: 96,
    bgb: 106,
};
pub const WHITE: Color = Color {
    fg: 37,
    bg: 47,
    fgb: 97,
    bgb: 107,
};

const BOLD: u8 = 1;
const BLINK: u8 = 5;
const RESET: &str = "\x1b[0m";

/// Every color treatment the prompt uses. Closed so that the width of a
/// painted string never depends on anything but its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Cyan,
    Magenta,
    BoldMagenta,
    BrightGreen,
    BrightYellow,
    BrightRed,
    BrightMagenta,
    BrightBlue,
    BrightBlack,
    BoldBrightGreen,
    BoldBrightYellow,
    BoldBrightRed,
    BoldBrightMagenta,
    /// Bright white on red, bold.
    Alarm,
    /// Bold bright red, blinking.
    Vanished,
}

impl Tone {
    /// Glyphs and anything without an opinion of its own.
    pub const DECORATION: Tone = Tone::Green;
    pub const ALERT: Tone = Tone::BrightRed;

    pub fn sgr(self) -> &'static str {
        match self {
            Tone::Green => formatcp!("\x1b[{}m", GREEN.fg),
            Tone::Yellow => formatcp!("\x1b[{}m", YELLOW.fg),
            Tone::Red => formatcp!("\x1b[{}m", RED.fg),
            Tone::Cyan => formatcp!("\x1b[{}m", CYAN.fg),
            Tone::Magenta => formatcp!("\x1b[{}m", MAGENTA.fg),
            Tone::BoldMagenta => formatcp!("\x1b[{};{}m", MAGENTA.fg, BOLD),
            Tone::BrightGreen => formatcp!("\x1b[{}m", GREEN.fgb),
            Tone::BrightYellow => formatcp!("\x1b[{}m", YELLOW.fgb),
            Tone::BrightRed => formatcp!("\x1b[{}m", RED.fgb),
            Tone::BrightMagenta => formatcp!("\x1b[{}m", MAGENTA.fgb),
            Tone::BrightBlue => formatcp!("\x1b[{}m", BLUE.fgb),
            Tone::BrightBlack => formatcp!("\x1b[{}m", BLACK.fgb),
            Tone::BoldBrightGreen => formatcp!("\x1b[{};{}m", GREEN.fgb, BOLD),
            Tone::BoldBrightYellow => formatcp!("\x1b[{};{}m", YELLOW.fgb, BOLD),
            Tone::BoldBrightRed => formatcp!("\x1b[{};{}m", RED.fgb, BOLD),
            Tone::BoldBrightMagenta => formatcp!("\x1b[{};{}m", MAGENTA.fgb, BOLD),
            Tone::Alarm => formatcp!("\x1b[{};{};{}m", RED.bg, WHITE.fgb, BOLD),
            Tone::Vanished => formatcp!("\x1b[{};{};{}m", RED.fgb, BOLD, BLINK),
        }
    }
}

/// Resolved color mode. Painting is a pure function of the text and tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", tone.sgr(), text, RESET)
    }
}
