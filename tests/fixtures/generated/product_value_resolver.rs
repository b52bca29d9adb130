// Generated by accessorgen for `shop::Product`. Do not edit.

use template_resolve::engine::{EvalContext, Resolved, Resolver};
use template_resolve::error::ResolveError;
use template_resolve::generator::artifact::{invoke_method, is_instance, read_field};

#[allow(non_camel_case_types)]
pub struct ProductValueResolver;

#[async_trait::async_trait]
impl Resolver for ProductValueResolver {
    fn name(&self) -> &str {
        "ProductValueResolver"
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        is_instance(ctx, |ty| matches!(ty, "shop::Book" | "shop::Product"))
    }

    #[allow(unreachable_patterns)]
    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        let Some(base) = ctx.base_object() else {
            return Ok(Resolved::NotFound);
        };
        match (ctx.name(), ctx.param_count()) {
            ("price", 0) => read_field(base, "price"),
            ("isAvailable" | "available", 0) => invoke_method(ctx, base, "isAvailable").await,
            ("getURLThing" | "URLThing", 0) => invoke_method(ctx, base, "getURLThing").await,
            ("priceWith", 1) => invoke_method(ctx, base, "priceWith").await,
            ("quote", 2) => invoke_method(ctx, base, "quote").await, // asynchronous result
            ("fail", 0) => invoke_method(ctx, base, "fail").await,
            _ => Ok(Resolved::NotFound),
        }
    }
}
