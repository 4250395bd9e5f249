use std::{
    env,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};
use terminal_size::{terminal_size, Width};

use crate::{colors::Palette, segment::Glyphs};

const FALLBACK_WIDTH: usize = 100;

#[derive(Parser, Debug, Default)]
#[command(name = "dashline", version, about = "Two-line, width-aware shell prompt")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// The exit code of the previously run command.
    #[arg(short = 'e', long = "exitcode", default_value_t = 0, allow_negative_numbers = true)]
    pub exit_code: i32,

    /// The working directory to pretend we're in. `~` and `~/...` are expanded
    /// against $HOME.
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<String>,

    /// Override detected terminal width. Zero or less means auto-detect.
    #[arg(short = 'w', long = "width", default_value_t = 0, allow_negative_numbers = true)]
    pub width: i64,

    /// The shell has background jobs running.
    #[arg(short = 'r', long = "runningjobs")]
    pub running_jobs: bool,

    /// The shell has background jobs that are suspended.
    #[arg(short = 's', long = "suspendedjobs")]
    pub suspended_jobs: bool,

    /// Attempt to show battery data on the prompt.
    #[arg(short = 'b', long = "showBattery")]
    pub show_battery: bool,

    /// Leave out the empty `<>` slot when battery data is not shown.
    #[arg(long = "no-battery-slot")]
    pub no_battery_slot: bool,

    /// Force colored output.
    #[arg(short = 'c', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Never color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Command that prints VCS information. Defaults to reading git
    /// repositories directly; an empty string turns VCS info off.
    #[arg(short = 'g', long = "vcs")]
    pub vcs: Option<String>,

    /// Pass the working directory through this command for additional
    /// formatting or truncation.
    #[arg(short = 'p', long = "wdformat")]
    pub wd_format: Option<String>,

    /// Directory holding the `check_kerberos` / `check_midway` marker files.
    /// Defaults to $HOME/.host/config.
    #[arg(long = "marker-dir", env = "DASHLINE_MARKER_DIR")]
    pub marker_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the snippet that installs the prompt in a shell
    Init { shell: Shell },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
    Suspended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryMode {
    Show,
    /// Not queried; an empty `<>` keeps the slot.
    Placeholder,
    Hidden,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VcsSource {
    Builtin,
    Command(String),
    Disabled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CredentialChecks {
    pub kerberos: bool,
    pub midway: bool,
}

/// Everything a render needs, resolved once before any field is fetched.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub width: usize,
    pub palette: Palette,
    pub glyphs: Glyphs,
    /// `None` when the shell's directory no longer exists.
    pub work_dir: Option<PathBuf>,
    pub home: Option<PathBuf>,
    pub exit_code: i32,
    pub jobs: JobState,
    pub battery: BatteryMode,
    pub vcs: VcsSource,
    pub wd_format: Option<String>,
    pub credentials: CredentialChecks,
}

impl RenderContext {
    /// A context with nothing enabled beyond the width and color mode.
    pub fn new(width: usize, palette: Palette) -> Self {
        RenderContext {
            width,
            glyphs: Glyphs::new(&palette),
            palette,
            work_dir: None,
            home: None,
            exit_code: 0,
            jobs: JobState::Idle,
            battery: BatteryMode::Placeholder,
            vcs: VcsSource::Disabled,
            wd_format: None,
            credentials: CredentialChecks::default(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);

        let work_dir = match &args.dir {
            Some(dir) => Some(expand_tilde(dir, home.as_deref())),
            None => env::current_dir().ok(),
        }
        .filter(|dir| dir.is_dir());

        let detected = terminal_size().map(|(Width(w), _)| w as usize);
        let columns = env::var("COLUMNS").ok().and_then(|c| c.parse().ok());
        let width = pick_width(args.width, detected, columns);

        // color must be settled before the glyphs are painted
        let palette = Palette::new(color_enabled(args.color, args.no_color));

        let marker_dir = args
            .marker_dir
            .clone()
            .or_else(|| home.as_ref().map(|h| h.join(".host/config")));
        let credentials = marker_dir
            .map(|dir| CredentialChecks {
                kerberos: dir.join("check_kerberos").exists(),
                midway: dir.join("check_midway").exists(),
            })
            .unwrap_or_default();

        let jobs = if args.suspended_jobs {
            JobState::Suspended
        } else if args.running_jobs {
            JobState::Running
        } else {
            JobState::Idle
        };

        let battery = match (args.show_battery, args.no_battery_slot) {
            (true, _) => BatteryMode::Show,
            (false, false) => BatteryMode::Placeholder,
            (false, true) => BatteryMode::Hidden,
        };

        let vcs = match args.vcs.as_deref().map(str::trim) {
            None => VcsSource::Builtin,
            Some("") => VcsSource::Disabled,
            Some(cmd) => VcsSource::Command(cmd.to_string()),
        };

        log::debug!("width {} color {}", width, palette.enabled());

        RenderContext {
            width,
            glyphs: Glyphs::new(&palette),
            palette,
            work_dir,
            home,
            exit_code: args.exit_code,
            jobs,
            battery,
            vcs,
            wd_format: args.wd_format.clone().filter(|c| !c.trim().is_empty()),
            credentials,
        }
    }
}

fn expand_tilde(dir: &str, home: Option<&Path>) -> PathBuf {
    match (dir, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (_, Some(home)) if dir.starts_with("~/") => home.join(&dir[2..]),
        _ => PathBuf::from(dir),
    }
}

fn pick_width(requested: i64, detected: Option<usize>, columns: Option<usize>) -> usize {
    if requested > 0 {
        return requested as usize;
    }
    detected
        .filter(|w| *w > 0)
        .or(columns.filter(|w| *w > 0))
        .unwrap_or(FALLBACK_WIDTH)
}

fn color_enabled(force: bool, disable: bool) -> bool {
    if force {
        return true;
    }
    if disable {
        return false;
    }
    let no_color = env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty());
    let dumb = env::var("TERM").map_or(false, |t| t == "dumb");
    !no_color && !dumb && io::stdout().is_terminal()
}
