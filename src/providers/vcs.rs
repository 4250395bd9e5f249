use std::path::Path;

use super::git::RepoSummary;
use crate::{
    config::{RenderContext, VcsSource},
    exec,
    segment::Segment,
};

/// Indent between the left block and the branch name.
const BRANCH_INDENT: &str = "   ";

/// The two VCS fields: branch on the left, changed-files summary flush right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VcsInfo {
    pub branch: Segment,
    pub files: Segment,
}

impl VcsInfo {
    fn new(branch: Segment, files: Segment) -> Self {
        VcsInfo {
            branch: Segment::concat(&[&Segment::raw(BRANCH_INDENT), &branch]),
            files,
        }
    }

    /// Two-line output of an external status command, already colored.
    pub fn from_prompt_output(output: &str) -> Option<Self> {
        let mut lines = output.split('\n');
        let branch = lines.next()?.trim();
        let files = lines.next()?.trim();
        Some(VcsInfo::new(
            Segment::from_decorated(branch),
            Segment::from_decorated(files),
        ))
    }
}

fn from_command(command: &str, dir: &Path) -> Option<VcsInfo> {
    let out = match exec::run(command, Some(dir), &["--output=prompt", "--color", "--vcs=git"]) {
        Ok(out) => out,
        Err(err) => {
            log::debug!("{:#}", err);
            return None;
        }
    };
    if !out.success() {
        log::debug!("{} exited with {:?}", command, out.code);
        return None;
    }
    VcsInfo::from_prompt_output(&out.stdout)
}

/// VCS fields for the working directory, or `None` outside a repository and
/// whenever the status can't be read.
pub fn gather(ctx: &RenderContext) -> Option<VcsInfo> {
    let dir = ctx.work_dir.as_deref()?;
    match &ctx.vcs {
        VcsSource::Disabled => None,
        VcsSource::Command(command) => from_command(command, dir),
        VcsSource::Builtin => {
            let summary = RepoSummary::read(dir)?;
            Some(VcsInfo::new(
                summary.branch_segment(&ctx.palette),
                summary.files_segment(&ctx.palette),
            ))
        }
    }
}
