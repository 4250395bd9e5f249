use anyhow::Result;

use super::FieldProvider;
use crate::{colors::Tone, config::RenderContext, exec, segment::Segment};

/// A credential that should be present on this host. Shows a bracketed
/// marker when it is missing and nothing otherwise.
pub struct CredentialCheck {
    name: &'static str,
    marker: &'static str,
    command: &'static str,
    args: &'static [&'static str],
    enabled: fn(&RenderContext) -> bool,
    /// Whether the command's output has to be non-empty to count as valid.
    needs_output: bool,
}

fn kerberos_enabled(ctx: &RenderContext) -> bool {
    ctx.credentials.kerberos
}

fn midway_enabled(ctx: &RenderContext) -> bool {
    ctx.credentials.midway
}

pub const KERBEROS: CredentialCheck = CredentialCheck {
    name: "kerberos",
    marker: " [K]",
    command: "klist",
    args: &["-s"],
    enabled: kerberos_enabled,
    needs_output: false,
};

pub const MIDWAY: CredentialCheck = CredentialCheck {
    name: "midway",
    marker: " [M]",
    command: "mwinit",
    args: &["-l"],
    enabled: midway_enabled,
    needs_output: true,
};

impl CredentialCheck {
    fn valid(&self, code_ok: bool, stdout: &str) -> bool {
        code_ok && (!self.needs_output || !stdout.is_empty())
    }
}

impl FieldProvider for CredentialCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch(&self, ctx: &RenderContext) -> Result<Segment> {
        if !(self.enabled)(ctx) {
            return Ok(Segment::default());
        }
        let out = exec::run(self.command, None, self.args)?;
        if self.valid(out.success(), &out.stdout) {
            Ok(Segment::default())
        } else {
            Ok(self.sentinel(ctx))
        }
    }

    fn sentinel(&self, ctx: &RenderContext) -> Segment {
        Segment::painted(self.marker, Tone::BoldBrightRed, &ctx.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialCheck, KERBEROS, MIDWAY};
    use crate::{colors::Palette, config::RenderContext, providers::FieldProvider};

    #[test]
    fn disabled_checks_are_empty() {
        let ctx = RenderContext::new(80, Palette::new(true));
        assert!(KERBEROS.segment(&ctx).is_empty());
        assert!(MIDWAY.segment(&ctx).is_empty());
    }

    #[test]
    fn validity_rules() {
        assert!(KERBEROS.valid(true, ""));
        assert!(!KERBEROS.valid(false, "ticket"));
        assert!(MIDWAY.valid(true, "cookie"));
        assert!(!MIDWAY.valid(true, ""));
    }

    #[test]
    fn markers() {
        let ctx = RenderContext::new(80, Palette::new(true));
        assert_eq!(KERBEROS.sentinel(&ctx).plain, " [K]");
        assert_eq!(MIDWAY.sentinel(&ctx).decorated, "\x1b[91;1m [M]\x1b[0m");
    }

    #[test]
    fn failing_kerberos_check_shows_marker() {
        let mut ctx = RenderContext::new(80, Palette::new(false));
        ctx.credentials.kerberos = true;
        let expired = CredentialCheck {
            command: "false",
            args: &[],
            ..KERBEROS
        };
        assert_eq!(expired.segment(&ctx).plain, " [K]");

        let valid = CredentialCheck {
            command: "true",
            args: &[],
            ..KERBEROS
        };
        assert!(valid.segment(&ctx).is_empty());
    }

    #[test]
    fn midway_needs_a_cookie() {
        let mut ctx = RenderContext::new(80, Palette::new(false));
        ctx.credentials.midway = true;
        let silent = CredentialCheck {
            command: "true",
            args: &[],
            ..MIDWAY
        };
        assert_eq!(silent.segment(&ctx).plain, " [M]");

        let cookie = CredentialCheck {
            command: "echo",
            args: &["cookie"],
            ..MIDWAY
        };
        assert!(cookie.segment(&ctx).is_empty());
    }

    #[test]
    fn missing_tool_shows_marker() {
        let mut ctx = RenderContext::new(80, Palette::new(false));
        ctx.credentials.midway = true;
        let absent = CredentialCheck {
            command: "dashline-no-such-mwinit",
            ..MIDWAY
        };
        assert_eq!(absent.segment(&ctx).plain, " [M]");
    }
}
