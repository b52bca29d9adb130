/// Renders an artifact as a standalone Rust module.
///
/// The rendered resolver behaves exactly like the in-memory artifact: the
/// `(name, arity)` lookup becomes a `match` in arm order and member access
/// goes through the shared runtime helpers in [`super::artifact`].
use super::artifact::{AccessorArtifact, Arm, MemberKind};

pub fn render(artifact: &AccessorArtifact) -> String {
    let mut lines = vec![
        format!(
            "// Generated by accessorgen for `{}`. Do not edit.",
            artifact.target()
        ),
        String::new(),
        "use template_resolve::engine::{EvalContext, Resolved, Resolver};".to_string(),
        "use template_resolve::error::ResolveError;".to_string(),
        "use template_resolve::generator::artifact::{invoke_method, is_instance, read_field};"
            .to_string(),
        String::new(),
        "#[allow(non_camel_case_types)]".to_string(),
        format!("pub struct {};", artifact.name()),
        String::new(),
        "#[async_trait::async_trait]".to_string(),
        format!("impl Resolver for {} {{", artifact.name()),
        "    fn name(&self) -> &str {".to_string(),
        format!("        {:?}", artifact.name()),
        "    }".to_string(),
        String::new(),
        "    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {".to_string(),
        format!(
            "        is_instance(ctx, |ty| matches!(ty, {}))",
            quoted_alternatives(artifact.assignable().iter().map(String::as_str))
        ),
        "    }".to_string(),
        String::new(),
        "    #[allow(unreachable_patterns)]".to_string(),
        "    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {"
            .to_string(),
        "        let Some(base) = ctx.base_object() else {".to_string(),
        "            return Ok(Resolved::NotFound);".to_string(),
        "        };".to_string(),
        "        match (ctx.name(), ctx.param_count()) {".to_string(),
    ];

    lines.extend(artifact.arms().iter().map(render_arm));

    lines.extend(
        [
            "            _ => Ok(Resolved::NotFound),",
            "        }",
            "    }",
            "}",
            "",
        ]
        .map(str::to_string),
    );
    lines.join("\n")
}

fn render_arm(arm: &Arm) -> String {
    let names = quoted_alternatives(arm.keys().map(|(name, _)| name));
    let call = match arm.kind {
        MemberKind::Field => format!("read_field(base, {:?})", arm.member),
        MemberKind::Method => format!("invoke_method(ctx, base, {:?}).await", arm.member),
    };
    let note = if arm.returns_async {
        " // asynchronous result"
    } else {
        ""
    };
    format!("            ({names}, {}) => {call},{note}", arm.arity)
}

fn quoted_alternatives<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names
        .map(|name| format!("{name:?}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
