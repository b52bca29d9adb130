use crate::engine::{EvalContext, Resolved, Resolver, Value, ValueMap};
use crate::error::ResolveError;
use async_trait::async_trait;

/// Resolves keys and the usual map accessors on [`Value::Map`].
///
/// A key equal to the accessor name shadows the built-in accessors, so a map
/// with a `"size"` entry yields that entry rather than its length.
pub struct MapResolver;

impl Default for MapResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MapResolver {
    pub fn new() -> Self {
        Self
    }

    async fn lookup(
        &self,
        map: &ValueMap,
        ctx: &EvalContext<'_>,
        contains: bool,
    ) -> Result<Resolved, ResolveError> {
        let key = ctx.evaluate(&ctx.params()[0]).await?;
        let value = key.value().and_then(|k| map.get(k));
        if contains {
            return Ok(Resolved::found(value.is_some()));
        }
        Ok(Resolved::Found(value.cloned().unwrap_or(Value::Null)))
    }
}

#[async_trait]
impl Resolver for MapResolver {
    fn name(&self) -> &str {
        "map"
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        matches!(ctx.base_value(), Some(Value::Map(_)))
    }

    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        let Some(Value::Map(map)) = ctx.base_value() else {
            return Ok(Resolved::NotFound);
        };

        if let Some(value) = map.get_str(ctx.name()) {
            return Ok(Resolved::Found(value.clone()));
        }

        // get/containsKey with the wrong number of params decline instead of
        // reporting an arity error.
        match ctx.name() {
            "keys" | "keySet" => Ok(Resolved::Found(Value::List(map.keys().cloned().collect()))),
            "values" => Ok(Resolved::Found(Value::List(
                map.values().cloned().collect(),
            ))),
            "size" => Ok(Resolved::found(map.len())),
            "empty" | "isEmpty" => Ok(Resolved::found(map.is_empty())),
            "get" if ctx.param_count() == 1 => self.lookup(map, ctx, false).await,
            "containsKey" if ctx.param_count() == 1 => self.lookup(map, ctx, true).await,
            _ => Ok(Resolved::NotFound),
        }
    }
}
