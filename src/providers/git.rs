use std::path::Path;

use git2::{Branch, ErrorCode, Repository, RepositoryState, Status, StatusOptions};

use crate::{
    colors::{Palette, Tone},
    segment::Segment,
};

const NO_BRANCH: &str = "!branch!";

struct StatusField {
    shown: char,
    tone: Tone,
    flags: Status,
}

/// Per-file status counters, in display order. Mirrors the two status letters
/// of `git status -s`.
fn status_fields() -> [StatusField; 8] {
    let field = |shown, tone, flags| StatusField { shown, tone, flags };
    [
        field(
            'M',
            Tone::Green,
            Status::INDEX_MODIFIED
                | Status::WT_MODIFIED
                | Status::INDEX_TYPECHANGE
                | Status::WT_TYPECHANGE,
        ),
        field('+', Tone::BrightGreen, Status::INDEX_NEW),
        field('-', Tone::BrightRed, Status::INDEX_DELETED | Status::WT_DELETED),
        field('R', Tone::BrightYellow, Status::INDEX_RENAMED | Status::WT_RENAMED),
        // copies are never reported by libgit2
        field('C', Tone::BrightBlue, Status::empty()),
        field('U', Tone::BrightMagenta, Status::CONFLICTED),
        field('?', Tone::Red, Status::WT_NEW),
        field('!', Tone::Cyan, Status::IGNORED),
    ]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Pending {
    merging: bool,
    untracked: bool,
    unstaged: bool,
    staged: bool,
    ahead: bool,
}

impl Pending {
    fn note(&mut self, status: Status) {
        if status.is_conflicted() {
            self.merging = true;
        }
        if status.is_wt_new() {
            self.untracked = true;
        }
        if status.intersects(
            Status::WT_MODIFIED | Status::WT_DELETED | Status::WT_TYPECHANGE | Status::WT_RENAMED,
        ) {
            self.unstaged = true;
        }
        if status.intersects(
            Status::INDEX_NEW
                | Status::INDEX_MODIFIED
                | Status::INDEX_DELETED
                | Status::INDEX_TYPECHANGE
                | Status::INDEX_RENAMED,
        ) {
            self.staged = true;
        }
    }

    /// The most urgent pending work decides the branch color.
    fn branch_tone(&self) -> Tone {
        if self.merging {
            Tone::BrightMagenta
        } else if self.untracked {
            Tone::BrightRed
        } else if self.unstaged {
            Tone::BrightYellow
        } else if self.staged {
            Tone::Yellow
        } else if self.ahead {
            Tone::Magenta
        } else {
            Tone::Green
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoSummary {
    pub branch: String,
    pending: Pending,
    counts: [usize; 8],
}

fn get_branch_name(repo: &Repository) -> Option<String> {
    if repo.head_detached().unwrap_or(false) {
        let rev = repo.revparse_single("HEAD").ok()?;
        return rev.short_id().ok()?.as_str().map(str::to_string);
    }

    match repo.head() {
        Ok(head) => head.shorthand().map(str::to_string),
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD").ok()?;
            let target = head.symbolic_target()?;
            Some(target.trim_start_matches("refs/heads/").to_string())
        }
        Err(_) => None,
    }
}

fn is_ahead(repo: &Repository) -> bool {
    let ahead = || -> Option<bool> {
        let head = repo.head().ok()?;
        let local = head.target()?;
        let upstream = Branch::wrap(head).upstream().ok()?.get().target()?;
        let (ahead, _behind) = repo.graph_ahead_behind(local, upstream).ok()?;
        Some(ahead > 0)
    };
    ahead().unwrap_or(false)
}

fn count(statuses: impl Iterator<Item = Status>) -> ([usize; 8], Pending) {
    let fields = status_fields();
    let mut counts = [0; 8];
    let mut pending = Pending::default();
    for status in statuses {
        if status.is_empty() {
            continue;
        }
        pending.note(status);
        for (n, field) in counts.iter_mut().zip(fields.iter()) {
            if status.intersects(field.flags) {
                *n += 1;
            }
        }
    }
    (counts, pending)
}

impl RepoSummary {
    /// Summarize the repository containing `path`. `None` outside a repository
    /// or when the status cannot be read.
    pub fn read(path: &Path) -> Option<Self> {
        let repo = Repository::discover(path).ok()?;
        if repo.is_bare() {
            return None;
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(false)
            .include_ignored(false)
            .renames_head_to_index(true);
        let statuses = match repo.statuses(Some(&mut options)) {
            Ok(statuses) => statuses,
            Err(err) => {
                log::warn!("git status failed: {}", err);
                return None;
            }
        };

        let (counts, mut pending) = count(statuses.iter().map(|e| e.status()));
        pending.merging |= repo.state() == RepositoryState::Merge;
        pending.ahead = is_ahead(&repo);

        Some(RepoSummary {
            branch: get_branch_name(&repo).unwrap_or_else(|| NO_BRANCH.to_string()),
            pending,
            counts,
        })
    }

    pub fn branch_segment(&self, palette: &Palette) -> Segment {
        Segment::painted(&self.branch, self.pending.branch_tone(), palette)
    }

    /// `M:2 ?:1`, one colored counter per non-zero field.
    pub fn files_segment(&self, palette: &Palette) -> Segment {
        let parts: Vec<Segment> = self
            .counts
            .iter()
            .zip(status_fields())
            .filter(|(n, _)| **n > 0)
            .map(|(n, field)| {
                Segment::painted(&format!("{}:{}", field.shown, n), field.tone, palette)
            })
            .collect();

        let space = Segment::raw(" ");
        let mut joined: Vec<&Segment> = Vec::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                joined.push(&space);
            }
            joined.push(part);
        }
        Segment::concat(&joined)
    }
}
