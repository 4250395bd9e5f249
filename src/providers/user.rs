use anyhow::Context;
use pwd::Passwd;

use super::FieldProvider;
use crate::{
    colors::{Palette, Tone},
    config::{JobState, RenderContext},
    segment::Segment,
};

const SENTINEL: &str = "!user!";

/// Login name of the current user.
pub struct Username;

fn paint_username(name: &str, privileged: bool, palette: &Palette) -> Segment {
    let tone = if privileged || name == "root" {
        Tone::BrightYellow
    } else {
        Tone::Cyan
    };
    Segment::painted(name, tone, palette)
}

impl FieldProvider for Username {
    fn name(&self) -> &'static str {
        "user"
    }

    fn fetch(&self, ctx: &RenderContext) -> anyhow::Result<Segment> {
        let passwd = Passwd::current_user().context("no passwd entry for current uid")?;
        let privileged = rustix::process::getuid().is_root();
        Ok(paint_username(&passwd.name, privileged, &ctx.palette))
    }

    fn sentinel(&self, ctx: &RenderContext) -> Segment {
        Segment::painted(SENTINEL, Tone::ALERT, &ctx.palette)
    }
}

/// The `@` between user and host, colored by background job state.
pub fn jobs_flag(ctx: &RenderContext) -> Segment {
    let tone = match ctx.jobs {
        JobState::Suspended => Tone::BoldBrightRed,
        JobState::Running => Tone::BoldBrightGreen,
        JobState::Idle => Tone::Cyan,
    };
    Segment::painted("@", tone, &ctx.palette)
}
