use std::io::{self, Write};

use crate::{
    config::RenderContext,
    layout::{compose, ComposedLine, LineBudget, PlanItem, RenderPlan},
    providers::{
        battery::Battery,
        clock::clock,
        credentials::{KERBEROS, MIDWAY},
        dir::Directory,
        host::HostLoad,
        status::exit_code,
        user::{jobs_flag, Username},
        vcs::{self, VcsInfo},
        FieldProvider,
    },
    segment::Segment,
};

/// Everything the providers produced for one render. Optional fields are
/// `None` when their provider had nothing to show.
#[derive(Clone, Debug)]
pub struct Fields {
    pub user: Segment,
    pub jobs: Segment,
    pub host: Segment,
    pub dir: Directory,
    pub clock: Segment,
    pub battery: Option<Segment>,
    pub kerberos: Option<Segment>,
    pub midway: Option<Segment>,
    pub exit_code: Option<Segment>,
    pub vcs: Option<VcsInfo>,
}

impl Fields {
    pub fn gather(ctx: &RenderContext) -> Self {
        Fields {
            user: Username.segment(ctx),
            jobs: jobs_flag(ctx),
            host: HostLoad.segment(ctx),
            dir: Directory::gather(ctx),
            clock: clock(&ctx.palette),
            battery: Battery::default().segment(ctx).non_empty(),
            kerberos: KERBEROS.segment(ctx).non_empty(),
            midway: MIDWAY.segment(ctx).non_empty(),
            exit_code: exit_code(ctx.exit_code, &ctx.palette),
            vcs: vcs::gather(ctx),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// `-[user@host]----{dir}-`
    Identity,
    /// `--time<battery> [K] :1:   branch      files --`
    Status,
}

pub const LINES: [Line; 2] = [Line::Identity, Line::Status];

impl Line {
    pub fn compose(self, ctx: &RenderContext, fields: &Fields) -> ComposedLine {
        match self {
            Line::Identity => identity_line(ctx, fields),
            Line::Status => status_line(ctx, fields),
        }
    }
}

/// Cells left for the directory once the identity block, the `-{` `}-`
/// decorations and a one-cell filler are placed.
pub fn directory_budget(ctx: &RenderContext, fields: &Fields) -> usize {
    let mut budget = LineBudget::new(ctx.width);
    budget.consume(2 + fields.user.width() + fields.jobs.width() + fields.host.width() + 2);
    budget.consume(1 + 2 + 2);
    budget.remaining()
}

fn identity_line(ctx: &RenderContext, fields: &Fields) -> ComposedLine {
    let g = &ctx.glyphs;
    let dir = fields
        .dir
        .segment(directory_budget(ctx, fields), &ctx.palette);

    let plan: RenderPlan = vec![
        PlanItem::Fixed(&g.spacer),
        PlanItem::Fixed(&g.left_bracket),
        PlanItem::Fixed(&fields.user),
        PlanItem::Fixed(&fields.jobs),
        PlanItem::Fixed(&fields.host),
        PlanItem::Fixed(&g.right_bracket),
        PlanItem::Fixed(&g.spacer),
        PlanItem::Filler(&g.spacer),
        PlanItem::Fixed(&g.spacer),
        PlanItem::Fixed(&g.left_brace),
        PlanItem::Fixed(&dir),
        PlanItem::Fixed(&g.right_brace),
        PlanItem::Fixed(&g.spacer),
    ];
    compose(ctx.width, &plan)
}

fn status_line(ctx: &RenderContext, fields: &Fields) -> ComposedLine {
    let g = &ctx.glyphs;
    let mut plan: RenderPlan = vec![
        PlanItem::Fixed(&g.spacer),
        PlanItem::Fixed(&g.spacer),
        PlanItem::Fixed(&fields.clock),
    ];
    let optional = [
        &fields.battery,
        &fields.kerberos,
        &fields.midway,
        &fields.exit_code,
    ];
    plan.extend(optional.into_iter().flatten().map(PlanItem::Fixed));

    match &fields.vcs {
        Some(vcs) => plan.extend([
            PlanItem::Fixed(&vcs.branch),
            PlanItem::Filler(&g.blank),
            PlanItem::Fixed(&vcs.files),
        ]),
        None => plan.push(PlanItem::Filler(&g.blank)),
    }

    plan.extend([
        PlanItem::Fixed(&g.blank),
        PlanItem::Fixed(&g.spacer),
        PlanItem::Fixed(&g.spacer),
    ]);
    compose(ctx.width, &plan)
}

pub fn render(ctx: &RenderContext, fields: &Fields) -> Vec<ComposedLine> {
    LINES.iter().map(|line| line.compose(ctx, fields)).collect()
}

pub fn write_prompt(ctx: &RenderContext, fields: &Fields, out: &mut impl Write) -> io::Result<()> {
    for line in render(ctx, fields) {
        writeln!(out, "{}", line.decorated)?;
    }
    out.flush()
}
