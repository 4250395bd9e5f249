use crate::{
    colors::{Palette, Tone},
    segment::Segment,
};

/// ` :N:` for a failed previous command, nothing for success.
pub fn exit_code(code: i32, palette: &Palette) -> Option<Segment> {
    if code == 0 {
        return None;
    }
    Some(Segment::painted(&format!(" :{}:", code), Tone::ALERT, palette))
}
