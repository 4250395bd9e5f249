use crate::{config::RenderContext, segment::Segment};

pub mod battery;
pub mod clock;
pub mod credentials;
pub mod dir;
pub mod host;
pub mod status;
pub mod user;
pub mod vcs;

mod git;

/// A collaborator that produces one field of the prompt. Failures never reach
/// the layout; they are replaced by the provider's sentinel.
pub trait FieldProvider {
    fn name(&self) -> &'static str;

    fn fetch(&self, ctx: &RenderContext) -> anyhow::Result<Segment>;

    fn sentinel(&self, ctx: &RenderContext) -> Segment;

    fn segment(&self, ctx: &RenderContext) -> Segment {
        match self.fetch(ctx) {
            Ok(segment) => segment,
            Err(err) => {
                log::debug!("{} provider failed: {:#}", self.name(), err);
                self.sentinel(ctx)
            }
        }
    }
}
