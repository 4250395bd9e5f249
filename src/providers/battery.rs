use anyhow::{bail, Result};

use super::FieldProvider;
use crate::{
    colors::{Palette, Tone},
    config::{BatteryMode, RenderContext},
    exec,
    segment::{Glyphs, Segment},
    width::strip_ansi,
};

const HELPER: &str = "ibam-battery-prompt";

const TRUE_FLAGS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatteryInfo {
    /// Colored gauge exactly as the helper printed it.
    pub gauge: Segment,
    pub minutes_left: u32,
    pub charging: bool,
    pub percent: u32,
}

/// `H:MM`, or bare minutes.
fn parse_minutes(text: &str) -> u32 {
    match text.split_once(':') {
        Some((h, m)) => {
            let h: u32 = h.trim().parse().unwrap_or(0);
            let m: u32 = m.trim().parse().unwrap_or(0);
            h.saturating_mul(60).saturating_add(m)
        }
        None => text.trim().parse().unwrap_or(0),
    }
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

impl BatteryInfo {
    /// Helper output: gauge, time left, charging flag, (unused), percent.
    pub fn parse(output: &str) -> Self {
        let lines: Vec<&str> = output.lines().map(str::trim).collect();
        let line = |i: usize| lines.get(i).copied().unwrap_or("");
        BatteryInfo {
            gauge: Segment::from_decorated(line(0)),
            minutes_left: parse_minutes(&strip_ansi(line(1))),
            charging: TRUE_FLAGS.contains(&line(2)),
            percent: line(4).parse().unwrap_or(0),
        }
    }

    /// Full battery shows an empty slot, a healthy one the gauge, a low one the
    /// time left.
    pub fn render(&self, glyphs: &Glyphs, palette: &Palette) -> Segment {
        let inner = if self.percent > 99 {
            Segment::default()
        } else if self.percent > 20 {
            self.gauge.clone()
        } else if self.minutes_left > 0 {
            let tone = if self.charging {
                Tone::Green
            } else {
                Tone::BrightRed
            };
            Segment::painted(&format_minutes(self.minutes_left), tone, palette)
        } else {
            Segment::default()
        };
        Segment::concat(&[&glyphs.left_angle, &inner, &glyphs.right_angle])
    }
}

fn empty_slot(glyphs: &Glyphs) -> Segment {
    Segment::concat(&[&glyphs.left_angle, &glyphs.right_angle])
}

/// Battery gauge or time left, in angle brackets.
pub struct Battery {
    /// Called with `-p`.
    helper: String,
}

impl Default for Battery {
    fn default() -> Self {
        Battery {
            helper: HELPER.to_string(),
        }
    }
}

impl FieldProvider for Battery {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn fetch(&self, ctx: &RenderContext) -> Result<Segment> {
        match ctx.battery {
            BatteryMode::Hidden => Ok(Segment::default()),
            BatteryMode::Placeholder => Ok(empty_slot(&ctx.glyphs)),
            BatteryMode::Show => {
                let out = exec::run(&self.helper, None, &["-p"])?;
                if !out.success() {
                    bail!("{} exited with {:?}", self.helper, out.code);
                }
                let info = BatteryInfo::parse(&out.stdout);
                Ok(info.render(&ctx.glyphs, &ctx.palette))
            }
        }
    }

    fn sentinel(&self, ctx: &RenderContext) -> Segment {
        empty_slot(&ctx.glyphs)
    }
}
