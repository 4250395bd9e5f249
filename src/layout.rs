use crate::segment::Segment;

/// Width accounting for one line. `consumed` may run past `total` on narrow
/// terminals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineBudget {
    pub total: usize,
    pub consumed: usize,
}

impl LineBudget {
    pub fn new(total: usize) -> Self {
        LineBudget { total, consumed: 0 }
    }

    pub fn consume(&mut self, width: usize) {
        self.consumed += width;
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.consumed)
    }

    /// Repeat count for a single filler absorbing what is left. Never zero.
    pub fn filler(&self) -> usize {
        self.remaining().max(1)
    }
}

pub enum PlanItem<'a> {
    Fixed(&'a Segment),
    /// A one-cell glyph repeated to absorb the slack.
    Filler(&'a Segment),
}

pub type RenderPlan<'a> = Vec<PlanItem<'a>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposedLine {
    pub plain: String,
    pub decorated: String,
}

fn fixed_width(plan: &[PlanItem]) -> usize {
    plan.iter()
        .map(|item| match item {
            PlanItem::Fixed(segment) => segment.width(),
            PlanItem::Filler(_) => 0,
        })
        .sum()
}

/// Repeat counts for each filler in the plan, left to right. The slack is
/// split evenly with the remainder going to the leftmost fillers; every count
/// is at least one.
fn filler_counts(total_width: usize, plan: &[PlanItem]) -> Vec<usize> {
    let fillers = plan
        .iter()
        .filter(|item| matches!(item, PlanItem::Filler(_)))
        .count();
    if fillers == 0 {
        return Vec::new();
    }

    let mut budget = LineBudget::new(total_width);
    budget.consume(fixed_width(plan));
    let slack = budget.remaining();
    let (share, extra) = (slack / fillers, slack % fillers);
    (0..fillers)
        .map(|i| (share + usize::from(i < extra)).max(1))
        .collect()
}

/// Lay out `plan` to fill `total_width` cells. Content wider than the line is
/// never cut here; the line overflows instead.
pub fn compose(total_width: usize, plan: &[PlanItem]) -> ComposedLine {
    let mut counts = filler_counts(total_width, plan).into_iter();
    let mut line = ComposedLine::default();

    for item in plan {
        match item {
            PlanItem::Fixed(segment) => {
                line.plain.push_str(&segment.plain);
                line.decorated.push_str(&segment.decorated);
            }
            PlanItem::Filler(glyph) => {
                let n = counts.next().unwrap_or(1);
                line.plain.push_str(&glyph.plain.repeat(n));
                line.decorated.push_str(&glyph.decorated.repeat(n));
            }
        }
    }

    line
}

#[cfg(test)]
mod tests {
    use super::{compose, filler_counts, LineBudget, PlanItem};
    use crate::{
        colors::{Palette, Tone},
        segment::{Glyphs, Segment},
        width::{strip_ansi, visible_width},
    };

    #[test]
    fn budget_clamps_filler() {
        let mut budget = LineBudget::new(10);
        budget.consume(4);
        assert_eq!(budget.remaining(), 6);
        assert_eq!(budget.filler(), 6);
        budget.consume(20);
        assert_eq!(budget.remaining(), 0);
        assert_eq!(budget.filler(), 1);
    }

    #[test]
    fn single_filler_fills_line() {
        let palette = Palette::new(true);
        let glyphs = Glyphs::new(&palette);
        let name = Segment::painted("alice", Tone::Cyan, &palette);
        let plan = vec![
            PlanItem::Fixed(&glyphs.left_bracket),
            PlanItem::Fixed(&name),
            PlanItem::Fixed(&glyphs.right_bracket),
            PlanItem::Filler(&glyphs.spacer),
        ];
        let line = compose(20, &plan);
        assert_eq!(line.plain, "[alice]-------------");
        assert_eq!(visible_width(&line.decorated), 20);
        assert_eq!(strip_ansi(&line.decorated), line.plain);
    }

    #[test]
    fn overflow_keeps_one_filler() {
        let palette = Palette::new(false);
        let glyphs = Glyphs::new(&palette);
        let long = Segment::raw("a-very-long-segment");
        let plan = vec![
            PlanItem::Fixed(&long),
            PlanItem::Filler(&glyphs.spacer),
            PlanItem::Fixed(&glyphs.right_brace),
        ];
        let line = compose(5, &plan);
        assert_eq!(line.plain, "a-very-long-segment-}");
    }

    #[test]
    fn exact_fit_still_gets_one_filler() {
        let glyphs = Glyphs::new(&Palette::new(false));
        let fits = Segment::raw("12345");
        let plan = vec![PlanItem::Fixed(&fits), PlanItem::Filler(&glyphs.blank)];
        assert_eq!(compose(5, &plan).plain, "12345 ");
    }

    #[test]
    fn right_block_is_flush_with_margin() {
        let palette = Palette::new(true);
        let glyphs = Glyphs::new(&palette);
        let branch = Segment::raw("   main");
        let files = Segment::painted("M:2", Tone::Green, &palette);
        let margin = Segment::concat(&[&glyphs.blank, &glyphs.spacer, &glyphs.spacer]);
        let plan = vec![
            PlanItem::Fixed(&branch),
            PlanItem::Filler(&glyphs.blank),
            PlanItem::Fixed(&files),
            PlanItem::Fixed(&margin),
        ];
        let line = compose(20, &plan);
        assert_eq!(line.plain, "   main       M:2 --");
        assert_eq!(line.plain.len(), 20);
        assert_eq!(strip_ansi(&line.decorated), line.plain);
    }

    #[test]
    fn several_fillers_split_slack() {
        let glyphs = Glyphs::new(&Palette::new(false));
        let mid = Segment::raw("x");
        let plan = vec![
            PlanItem::Filler(&glyphs.spacer),
            PlanItem::Fixed(&mid),
            PlanItem::Filler(&glyphs.spacer),
        ];
        assert_eq!(filler_counts(8, &plan), vec![4, 3]);
        assert_eq!(compose(8, &plan).plain, "----x---");
        assert_eq!(filler_counts(1, &plan), vec![1, 1]);
    }

    #[test]
    fn plan_without_fillers_is_concatenated() {
        let a = Segment::raw("ab");
        let b = Segment::raw("cd");
        let plan = vec![PlanItem::Fixed(&a), PlanItem::Fixed(&b)];
        assert_eq!(compose(80, &plan).plain, "abcd");
    }

    #[test]
    fn narrow_widths_never_lose_fillers() {
        let palette = Palette::new(true);
        let glyphs = Glyphs::new(&palette);
        let host = Segment::painted("box(1.25)", Tone::Alarm, &palette);
        let plan = vec![
            PlanItem::Fixed(&glyphs.spacer),
            PlanItem::Fixed(&host),
            PlanItem::Filler(&glyphs.spacer),
            PlanItem::Fixed(&glyphs.spacer),
        ];
        for width in 0..30 {
            let line = compose(width, &plan);
            assert_eq!(strip_ansi(&line.decorated), line.plain);
            assert_eq!(visible_width(&line.plain), width.max(12));
        }
    }
}
