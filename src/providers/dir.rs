use std::{
    fs,
    path::{Path, PathBuf},
};

use rustix::fs::{access, Access};

use crate::{
    colors::{Palette, Tone},
    config::RenderContext,
    exec,
    segment::Segment,
    width::truncate_front,
};

const MISSING: &str = "<missing>";

/// What `df -P` had to say about the filesystem holding the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiskUsage {
    Percent(u32),
    /// `df` could not be run or exited with an error.
    Failed,
    /// No data line after the header.
    NoData,
    /// The data line has no capacity column.
    ShortLine,
    /// The capacity column is not a number.
    Unparsable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirState {
    Missing,
    ReadOnly,
    Writable(DiskUsage),
}

/// The working directory, shortened for display, before the width budget is
/// known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directory {
    pub display: String,
    pub state: DirState,
}

/// Render `cwd` relative to `home` as `~` or `~/rest`. Paths outside home are
/// returned whole.
fn relative_to_home(cwd: &Path, home: &Path) -> Option<String> {
    let relative = cwd.strip_prefix(home).ok()?;
    if relative.as_os_str().is_empty() {
        Some("~".to_string())
    } else {
        Some(format!("~/{}", relative.display()))
    }
}

pub fn home_relative(cwd: &Path, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return cwd.display().to_string();
    };
    relative_to_home(cwd, home)
        .or_else(|| {
            let canonical = fs::canonicalize(home).ok()?;
            relative_to_home(cwd, &canonical)
        })
        .unwrap_or_else(|| cwd.display().to_string())
}

pub fn parse_df(output: &str) -> DiskUsage {
    let trimmed = output.trim();
    let mut lines = trimmed.lines();
    let Some(data) = lines.nth(1) else {
        return DiskUsage::NoData;
    };
    let Some(capacity) = data.split_whitespace().nth(4) else {
        return DiskUsage::ShortLine;
    };
    match capacity.trim_end_matches('%').parse() {
        Ok(percent) => DiskUsage::Percent(percent),
        Err(_) => DiskUsage::Unparsable,
    }
}

fn disk_usage(dir: &Path) -> DiskUsage {
    let dir_str = dir.to_string_lossy();
    match exec::run("df", Some(dir), &["-P", &dir_str]) {
        Ok(out) if out.success() => {
            let usage = parse_df(&out.stdout);
            if !matches!(usage, DiskUsage::Percent(_)) {
                log::warn!("unexpected df output for {}: {:?}", dir.display(), usage);
            }
            usage
        }
        Ok(out) => {
            log::debug!("df exited with {:?}", out.code);
            DiskUsage::Failed
        }
        Err(err) => {
            log::debug!("{:#}", err);
            DiskUsage::Failed
        }
    }
}

fn formatted(dir: &Path, command: &str) -> Option<PathBuf> {
    let dir_str = dir.to_string_lossy();
    let out = exec::run(command, Some(dir), &[&dir_str]).ok()?;
    let text = out.stdout.trim();
    if text.is_empty() {
        None
    } else {
        Some(PathBuf::from(text))
    }
}

impl Directory {
    pub fn gather(ctx: &RenderContext) -> Self {
        let Some(dir) = &ctx.work_dir else {
            return Directory {
                display: MISSING.to_string(),
                state: DirState::Missing,
            };
        };

        let shown = ctx
            .wd_format
            .as_deref()
            .and_then(|cmd| formatted(dir, cmd))
            .unwrap_or_else(|| dir.clone());
        let display = home_relative(&shown, ctx.home.as_deref());

        let state = if access(dir.as_path(), Access::WRITE_OK).is_ok() {
            DirState::Writable(disk_usage(dir))
        } else {
            DirState::ReadOnly
        };

        Directory { display, state }
    }

    /// Mark, truncate and color by state. Failure markers count against
    /// `budget`, so the result never exceeds it unless the budget is under 2.
    pub fn segment(&self, budget: usize, palette: &Palette) -> Segment {
        let (marker, tone) = match self.state {
            DirState::Missing => (None, Tone::Vanished),
            DirState::ReadOnly => (None, Tone::Red),
            DirState::Writable(usage) => match usage {
                DiskUsage::Percent(p) if p > 90 => (None, Tone::Alarm),
                DiskUsage::Percent(p) if p > 80 => (None, Tone::BoldBrightRed),
                DiskUsage::Percent(p) if p > 70 => (None, Tone::BoldBrightYellow),
                DiskUsage::Percent(_) => (None, Tone::BrightGreen),
                DiskUsage::Failed => (Some('!'), Tone::BoldBrightMagenta),
                DiskUsage::Unparsable => (Some('='), Tone::BrightBlack),
                DiskUsage::ShortLine => (Some('+'), Tone::Yellow),
                DiskUsage::NoData => (Some('~'), Tone::BoldMagenta),
            },
        };
        let text = match marker {
            Some(m) => {
                let path = truncate_front(&self.display, budget.saturating_sub(2));
                format!("{m}{path}{m}")
            }
            None => truncate_front(&self.display, budget),
        };
        Segment::painted(&text, tone, palette)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{home_relative, parse_df, DirState, Directory, DiskUsage};
    use crate::{
        colors::{Palette, Tone},
        config::RenderContext,
    };

    const DF: &str = "Filesystem     1024-blocks      Used Available Capacity Mounted on\n\
                      /dev/nvme0n1p2   488245288 374581232  88793752      81% /\n";

    fn dir(display: &str, state: DirState) -> Directory {
        Directory {
            display: display.to_string(),
            state,
        }
    }

    #[test]
    fn relative_to_home() {
        let home = Some(Path::new("/home/me"));
        assert_eq!(home_relative(Path::new("/home/me/foo/bar"), home), "~/foo/bar");
        assert_eq!(home_relative(Path::new("/home/me"), home), "~");
        assert_eq!(home_relative(Path::new("/home/meow"), home), "/home/meow");
        assert_eq!(home_relative(Path::new("/foo/bar"), home), "/foo/bar");
        assert_eq!(home_relative(Path::new("/foo/bar"), None), "/foo/bar");
    }

    #[test]
    fn df_capacity() {
        assert_eq!(parse_df(DF), DiskUsage::Percent(81));
    }

    #[test]
    fn df_failure_modes() {
        assert_eq!(parse_df(""), DiskUsage::NoData);
        assert_eq!(parse_df("Filesystem 1024-blocks\n"), DiskUsage::NoData);
        assert_eq!(parse_df("header\n/dev/sda1 100 50 50\n"), DiskUsage::ShortLine);
        assert_eq!(parse_df("header\n/dev/sda1 100 50 50 lots /\n"), DiskUsage::Unparsable);
    }

    #[test]
    fn usage_thresholds() {
        let palette = Palette::new(true);
        let cases = [
            (50, Tone::BrightGreen),
            (70, Tone::BrightGreen),
            (71, Tone::BoldBrightYellow),
            (81, Tone::BoldBrightRed),
            (91, Tone::Alarm),
        ];
        for (percent, tone) in cases {
            let segment = dir("~/proj", DirState::Writable(DiskUsage::Percent(percent)))
                .segment(40, &palette);
            assert_eq!(segment.decorated, palette.paint("~/proj", tone));
        }
    }

    #[test]
    fn failure_markers() {
        let palette = Palette::new(false);
        let cases = [
            (DiskUsage::Failed, "!~/proj!"),
            (DiskUsage::Unparsable, "=~/proj="),
            (DiskUsage::ShortLine, "+~/proj+"),
            (DiskUsage::NoData, "~~/proj~"),
        ];
        for (usage, text) in cases {
            let segment = dir("~/proj", DirState::Writable(usage)).segment(40, &palette);
            assert_eq!(segment.plain, text);
        }
    }

    #[test]
    fn read_only_is_red() {
        let palette = Palette::new(true);
        let segment = dir("/etc", DirState::ReadOnly).segment(40, &palette);
        assert_eq!(segment.decorated, palette.paint("/etc", Tone::Red));
    }

    #[test]
    fn truncated_to_budget() {
        let palette = Palette::new(false);
        let segment = dir(
            "~/src/rust/dashline/src/providers",
            DirState::Writable(DiskUsage::Percent(10)),
        )
        .segment(12, &palette);
        assert_eq!(segment.plain, "…c/providers");
    }

    #[test]
    fn markers_fit_inside_budget() {
        let palette = Palette::new(false);
        let segment = dir(
            "~/src/rust/dashline/src/providers",
            DirState::Writable(DiskUsage::Failed),
        )
        .segment(12, &palette);
        assert_eq!(segment.plain, "!…providers!");
        assert_eq!(segment.width(), 12);
    }

    #[test]
    fn missing_directory() {
        let ctx = RenderContext::new(80, Palette::new(true));
        let missing = Directory::gather(&ctx);
        assert_eq!(missing.state, DirState::Missing);
        let segment = missing.segment(40, &ctx.palette);
        assert_eq!(segment.plain, "<missing>");
        assert_eq!(segment.decorated, ctx.palette.paint("<missing>", Tone::Vanished));
    }

    #[test]
    fn gathers_writable_directory() {
        let scratch = tempfile::tempdir().unwrap();
        let mut ctx = RenderContext::new(80, Palette::new(false));
        ctx.work_dir = Some(scratch.path().to_path_buf());
        ctx.home = Some(PathBuf::from("/nonexistent-home"));
        let gathered = Directory::gather(&ctx);
        assert_eq!(gathered.display, scratch.path().display().to_string());
        assert!(matches!(gathered.state, DirState::Writable(_)));
    }

    #[test]
    fn formatter_command_rewrites_path() {
        let scratch = tempfile::tempdir().unwrap();
        let mut ctx = RenderContext::new(80, Palette::new(false));
        ctx.work_dir = Some(scratch.path().to_path_buf());
        ctx.home = Some(PathBuf::from("/home/alice"));
        ctx.wd_format = Some("echo /home/alice/formatted".to_string());
        let gathered = Directory::gather(&ctx);
        // the formatter receives the path as a trailing argument
        assert!(gathered.display.starts_with("~/formatted"));
    }
}
