use std::fs;

use anyhow::{Context, Result};

use super::FieldProvider;
use crate::{
    colors::{Palette, Tone},
    config::RenderContext,
    exec,
    segment::Segment,
};

const SENTINEL: &str = "!host!";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CpuLoad {
    pub processors: usize,
    pub one_minute: f64,
}

impl CpuLoad {
    /// Parse `/proc/stat` (for the processor count) and `/proc/loadavg`.
    pub fn parse(stat: &str, loadavg: &str) -> Self {
        let processors = stat
            .lines()
            .filter(|line| {
                line.strip_prefix("cpu")
                    .map_or(false, |rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            })
            .count();
        let one_minute = loadavg
            .split_whitespace()
            .next()
            .and_then(|x| x.parse().ok())
            .unwrap_or(0.0);
        CpuLoad {
            processors,
            one_minute,
        }
    }

    pub fn read() -> Self {
        let stat = fs::read_to_string("/proc/stat").unwrap_or_default();
        let loadavg = fs::read_to_string("/proc/loadavg").unwrap_or_default();
        Self::parse(&stat, &loadavg)
    }

    /// One-minute load per processor. Zero when the processor count is unknown.
    pub fn ratio(&self) -> f64 {
        if self.processors == 0 {
            0.0
        } else {
            self.one_minute / self.processors as f64
        }
    }
}

/// Color the host name by load. From half load upwards the raw figure is
/// appended.
pub fn paint_host(host: &str, load: CpuLoad, palette: &Palette) -> Segment {
    let ratio = load.ratio();
    let (tone, show_load) = if ratio > 1.0 {
        (Tone::Alarm, true)
    } else if ratio > 0.75 {
        (Tone::BoldBrightRed, true)
    } else if ratio > 0.50 {
        (Tone::BoldBrightMagenta, true)
    } else if ratio > 0.25 {
        (Tone::BoldBrightYellow, false)
    } else {
        (Tone::Cyan, false)
    };

    let text = if show_load {
        format!("{}({:.2})", host, load.one_minute)
    } else {
        host.to_string()
    };
    Segment::painted(&text, tone, palette)
}

fn hostname() -> Result<String> {
    match exec::run("pretty-hostname", None, &[]) {
        Ok(out) if out.success() && !out.stdout.trim().is_empty() => {
            return Ok(out.stdout.trim().to_string())
        }
        _ => {}
    }

    let uname = rustix::system::uname();
    let name = uname.nodename().to_string_lossy().trim().to_string();
    if name.is_empty() {
        anyhow::bail!("empty nodename");
    }
    Ok(name)
}

/// Host name colored by CPU load.
pub struct HostLoad;

impl FieldProvider for HostLoad {
    fn name(&self) -> &'static str {
        "host"
    }

    fn fetch(&self, ctx: &RenderContext) -> Result<Segment> {
        let host = hostname().context("reading host name")?;
        Ok(paint_host(&host, CpuLoad::read(), &ctx.palette))
    }

    fn sentinel(&self, ctx: &RenderContext) -> Segment {
        paint_host(SENTINEL, CpuLoad::read(), &ctx.palette)
    }
}
