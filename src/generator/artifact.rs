/// The generated accessor: one resolver bound to one concrete type.
///
/// Everything that can be decided from metadata is decided when the artifact
/// is built: the set of runtime types it applies to, the member arms in
/// declaration order and the `(name, arity)` lookup into them. Resolution
/// then only matches, evaluates parameters and calls into the host object.
use super::naming;
use crate::engine::{EvalContext, HostObject, Invocation, Resolved, Resolver};
use crate::error::ResolveError;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Method,
}

/// One dispatch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arm {
    pub kind: MemberKind,
    pub member: String,
    pub arity: usize,
    /// Extra zero-arity names, i.e. the property name of a getter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// The declared return type is asynchronous.
    pub returns_async: bool,
}

impl Arm {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Field,
            member: name.into(),
            arity: 0,
            aliases: Vec::new(),
            returns_async: false,
        }
    }

    pub fn method(name: impl Into<String>, arity: usize, returns_async: bool) -> Self {
        let member = name.into();
        let aliases = if arity == 0 && naming::is_getter_name(&member) {
            vec![naming::property_name(&member)]
        } else {
            Vec::new()
        };
        Self {
            kind: MemberKind::Method,
            member,
            arity,
            aliases,
            returns_async,
        }
    }

    /// Every `(name, arity)` pair this arm answers to.
    pub fn keys(&self) -> impl Iterator<Item = (&str, usize)> {
        std::iter::once(self.member.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .map(move |name| (name, self.arity))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessorArtifact {
    name: String,
    namespace: String,
    target: String,
    assignable: BTreeSet<String>,
    arms: Vec<Arm>,
    #[serde(skip)]
    lookup: HashMap<(String, usize), usize>,
}

impl AccessorArtifact {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
        assignable: impl IntoIterator<Item = String>,
        arms: Vec<Arm>,
    ) -> Self {
        let target = target.into();
        let mut assignable: BTreeSet<String> = assignable.into_iter().collect();
        assignable.insert(target.clone());

        // Earlier arms shadow later ones with the same key.
        let mut lookup = HashMap::new();
        for (position, arm) in arms.iter().enumerate() {
            for (key, arity) in arm.keys() {
                lookup.entry((key.to_string(), arity)).or_insert(position);
            }
        }

        Self {
            name: name.into(),
            namespace: namespace.into(),
            target,
            assignable,
            arms,
            lookup,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `namespace::Name`, or just the name at the top level.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            return self.name.clone();
        }
        format!("{}{}{}", self.namespace, naming::SEPARATOR, self.name)
    }

    /// The type this artifact was generated for.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn assignable(&self) -> &BTreeSet<String> {
        &self.assignable
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn applies_to_type(&self, type_name: &str) -> bool {
        self.assignable.contains(type_name)
    }

    pub fn dispatch(&self, name: &str, arity: usize) -> Option<&Arm> {
        self.lookup
            .get(&(name.to_string(), arity))
            .map(|&position| &self.arms[position])
    }
}

#[async_trait]
impl Resolver for AccessorArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn applies_to(&self, ctx: &EvalContext<'_>) -> bool {
        is_instance(ctx, |type_name| self.applies_to_type(type_name))
    }

    async fn resolve(&self, ctx: &EvalContext<'_>) -> Result<Resolved, ResolveError> {
        let Some(base) = ctx.base_object() else {
            return Ok(Resolved::NotFound);
        };
        let Some(arm) = self.dispatch(ctx.name(), ctx.param_count()) else {
            return Ok(Resolved::NotFound);
        };
        match arm.kind {
            MemberKind::Field => read_field(base, &arm.member),
            MemberKind::Method => invoke_method(ctx, base, &arm.member).await,
        }
    }
}

/// Whether the base is a host object whose runtime type, or one of the
/// supertypes it reports, satisfies `accepts`.
pub fn is_instance(ctx: &EvalContext<'_>, accepts: impl Fn(&str) -> bool) -> bool {
    ctx.base_object().is_some_and(|base| {
        std::iter::once(base.type_name())
            .chain(base.supertypes().iter().copied())
            .any(|type_name| accepts(type_name))
    })
}

/// Reads a field the metadata declared; the host must expose it.
pub fn read_field(base: &Arc<dyn HostObject>, field: &str) -> Result<Resolved, ResolveError> {
    base.read_field(field)
        .map(Resolved::Found)
        .ok_or_else(|| ResolveError::missing_member(base.type_name(), field))
}

/// Evaluates all parameters concurrently, then invokes `method`.
///
/// The first failing parameter aborts the call. Parameters resolving to
/// `NotFound` are passed as null. An asynchronous result is awaited, so the
/// caller always sees exactly one level of asynchrony.
pub async fn invoke_method(
    ctx: &EvalContext<'_>,
    base: &Arc<dyn HostObject>,
    method: &str,
) -> Result<Resolved, ResolveError> {
    let args = if ctx.params().is_empty() {
        Vec::new()
    } else {
        try_join_all(ctx.params().iter().map(|param| ctx.evaluate(param)))
            .await?
            .into_iter()
            .map(Resolved::into_value)
            .collect()
    };

    match base.invoke(method, args) {
        Invocation::Ready(result) => result.map(Resolved::Found),
        Invocation::Pending(future) => future.await.map(Resolved::Found),
        Invocation::Missing => Err(ResolveError::missing_member(base.type_name(), method)),
    }
}
