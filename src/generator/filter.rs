/// Member filter pipeline.
///
/// Each stage can exclude a member; stages run in order and the first
/// exclusion wins. The baseline stage always runs, the others only when the
/// type's configuration asks for them.
use super::config::AccessorConfig;
use crate::error::GeneratorError;
use crate::metadata::{FieldInfo, MethodInfo};
use regex::Regex;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Field(&'a FieldInfo),
    Method(&'a MethodInfo),
}

impl<'a> Member<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Field(f) => &f.name,
            Self::Method(m) => &m.name,
        }
    }
}

pub trait MemberFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn accepts(&self, member: Member<'_>) -> bool;
}

/// Drops initializers, non-public, synthetic and static methods, void
/// methods and non-public fields.
///
/// Public static fields are kept: a type's index entry only lists the fields
/// it declares itself, so these are the target's own statics.
pub struct BaselineFilter;

impl MemberFilter for BaselineFilter {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn accepts(&self, member: Member<'_>) -> bool {
        match member {
            Member::Field(field) => field.modifiers.public && !field.modifiers.synthetic,
            Member::Method(method) => {
                !method.is_initializer()
                    && method.modifiers.public
                    && !method.modifiers.synthetic
                    && !method.modifiers.is_static
                    && !method.return_type.is_void()
            }
        }
    }
}

/// Drops members whose whole name matches one of the patterns.
pub struct IgnoreFilter {
    patterns: Vec<Regex>,
}

impl IgnoreFilter {
    pub fn new(type_name: &str, patterns: &[String]) -> Result<Self, GeneratorError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("^(?:{p})$")).map_err(|source| {
                    GeneratorError::InvalidIgnorePattern {
                        type_name: type_name.to_string(),
                        pattern: p.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl MemberFilter for IgnoreFilter {
    fn name(&self) -> &'static str {
        "ignore"
    }

    fn accepts(&self, member: Member<'_>) -> bool {
        let name = member.name();
        !self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// Keeps fields and methods without parameters.
pub struct PropertiesFilter;

impl MemberFilter for PropertiesFilter {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn accepts(&self, member: Member<'_>) -> bool {
        match member {
            Member::Field(_) => true,
            Member::Method(method) => method.params.is_empty(),
        }
    }
}

pub struct FilterPipeline {
    stages: Vec<Box<dyn MemberFilter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            stages: vec![Box::new(BaselineFilter)],
        }
    }

    pub fn for_config(
        type_name: &str,
        config: Option<&AccessorConfig>,
    ) -> Result<Self, GeneratorError> {
        let mut pipeline = Self::new();
        if let Some(config) = config {
            if !config.ignore.is_empty() {
                pipeline = pipeline.with_stage(IgnoreFilter::new(type_name, &config.ignore)?);
            }
            if config.properties {
                pipeline = pipeline.with_stage(PropertiesFilter);
            }
        }
        Ok(pipeline)
    }

    pub fn with_stage<F: MemberFilter + 'static>(mut self, stage: F) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn accepts(&self, member: Member<'_>) -> bool {
        for stage in &self.stages {
            if !stage.accepts(member) {
                trace!(member = member.name(), stage = stage.name(), "member excluded");
                return false;
            }
        }
        true
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
