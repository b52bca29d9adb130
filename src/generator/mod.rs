/// Build-time accessor generation.
///
/// For every requested type the generator reads its metadata and effective
/// configuration, filters the members and emits one [`AccessorArtifact`]
/// into a sink. It then walks up the superclass chain, so every ancestor
/// below the universal root gets its own artifact. Each type is analyzed at
/// most once per generator.
pub mod artifact;
pub mod codegen;
pub mod config;
pub mod filter;
pub mod naming;
pub mod sink;

pub use artifact::{AccessorArtifact, Arm, MemberKind};
pub use config::{AccessorConfig, ConfigTable, GeneratorSettings};
pub use sink::{AccessorSink, MemorySink, SourceDirSink};

use crate::error::GeneratorError;
use crate::metadata::loader::load_index;
use crate::metadata::{TypeIndex, TypeInfo, TypeRef};
use filter::{FilterPipeline, Member};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

pub struct AccessorGenerator {
    index: TypeIndex,
    settings: GeneratorSettings,
    configs: ConfigTable,
    analyzed: BTreeSet<String>,
    generated: Vec<String>,
}

impl AccessorGenerator {
    pub fn builder() -> AccessorGeneratorBuilder {
        AccessorGeneratorBuilder::default()
    }

    /// Loads the index (file or directory) and optional settings document,
    /// then builds the configuration table from both.
    pub fn from_files(index: &Path, settings: Option<&Path>) -> crate::Result<Self> {
        let index = load_index(index)?;
        let settings = match settings {
            Some(path) => GeneratorSettings::load(path)?,
            None => GeneratorSettings::default(),
        };
        Ok(Self::builder().index(index).settings(settings).build()?)
    }

    pub fn index(&self) -> &TypeIndex {
        &self.index
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn configs(&self) -> &ConfigTable {
        &self.configs
    }

    /// Generates artifacts for `type_name` and its ancestors.
    ///
    /// The requested type must be in the index. Ancestors missing from the
    /// index are skipped with a warning.
    pub fn generate(
        &mut self,
        type_name: &str,
        sink: &mut dyn AccessorSink,
    ) -> Result<(), GeneratorError> {
        if !self.index.contains(type_name) {
            return Err(GeneratorError::unknown_type(type_name));
        }

        let mut next = Some(type_name.to_string());
        while let Some(name) = next.take() {
            if self.analyzed.contains(&name) {
                break;
            }
            let Some(info) = self.index.get(&name) else {
                break;
            };

            let artifact = self.build_artifact(info)?;
            self.analyzed.insert(name.clone());
            self.generated.push(artifact.qualified_name());
            sink.accept(artifact)?;

            next = self.next_ancestor(info);
        }
        Ok(())
    }

    /// Generates every type in `type_names`, in order.
    pub fn generate_all<I, S>(
        &mut self,
        type_names: I,
        sink: &mut dyn AccessorSink,
    ) -> Result<(), GeneratorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in type_names {
            self.generate(name.as_ref(), sink)?;
        }
        Ok(())
    }

    /// Types analyzed so far, sorted.
    pub fn analyzed_types(&self) -> impl Iterator<Item = &str> {
        self.analyzed.iter().map(String::as_str)
    }

    /// Qualified names of the generated artifacts, in generation order.
    pub fn generated_names(&self) -> &[String] {
        &self.generated
    }

    /// The nearest indexed superclass below the root. Superclasses missing
    /// from the index are skipped with a warning; the walk continues with the
    /// ancestors recorded on the type.
    fn next_ancestor(&self, info: &TypeInfo) -> Option<String> {
        for superclass in info.superclasses() {
            if superclass == self.settings.root_type {
                return None;
            }
            if self.index.contains(superclass) {
                return Some(superclass.to_string());
            }
            warn!(
                type_name = %info.name,
                superclass = %superclass,
                "skipping superclass not found in the index"
            );
        }
        None
    }

    fn build_artifact(&self, info: &TypeInfo) -> Result<AccessorArtifact, GeneratorError> {
        debug!(type_name = %info.name, "analyzing");

        let (namespace, name) = naming::artifact_name(info, &self.settings)?;
        let config = self.configs.lookup(&info.name);
        let filters = FilterPipeline::for_config(&info.name, config.as_ref())?;

        let mut arms = Vec::new();
        for field in info
            .fields
            .iter()
            .filter(|field| filters.accepts(Member::Field(field)))
        {
            debug!(type_name = %info.name, field = %field.name, "field added");
            arms.push(Arm::field(&field.name));
        }
        for method in info
            .methods
            .iter()
            .filter(|method| filters.accepts(Member::Method(method)))
        {
            debug!(type_name = %info.name, method = %method.name, "method added");
            arms.push(Arm::method(
                &method.name,
                method.param_count(),
                self.returns_async(&method.return_type),
            ));
        }

        Ok(AccessorArtifact::new(
            namespace,
            name,
            &info.name,
            self.index.subtypes_of(&info.name),
            arms,
        ))
    }

    fn returns_async(&self, return_type: &TypeRef) -> bool {
        return_type
            .type_name()
            .is_some_and(|name| self.index.has_in_closure(name, &self.settings.async_type))
    }
}

#[derive(Default)]
pub struct AccessorGeneratorBuilder {
    index: Option<TypeIndex>,
    settings: Option<GeneratorSettings>,
    configs: Option<ConfigTable>,
}

impl AccessorGeneratorBuilder {
    pub fn index(mut self, index: TypeIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn configs(mut self, configs: ConfigTable) -> Self {
        self.configs = Some(configs);
        self
    }

    /// Without explicit configs, the table is built from the index and the
    /// settings' side-table records.
    pub fn build(self) -> Result<AccessorGenerator, GeneratorError> {
        let index = self.index.unwrap_or_default();
        let settings = self.settings.unwrap_or_default();
        let configs = match self.configs {
            Some(configs) => configs,
            None => ConfigTable::build(&index, &settings.uncontrolled)?,
        };
        Ok(AccessorGenerator {
            index,
            settings,
            configs,
            analyzed: BTreeSet::new(),
            generated: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::metadata::{FieldInfo, MethodInfo, Modifiers};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn string() -> TypeRef {
        TypeRef::named("String")
    }

    fn index() -> TypeIndex {
        [
            TypeInfo::interface("core::future::Future"),
            TypeInfo::new("shop::Base")
                .with_superclass("Object")
                .with_field(FieldInfo::new("id", string(), Modifiers::public())),
            TypeInfo::new("shop::Mid")
                .with_superclass("shop::Base")
                .with_method(MethodInfo::new("getLabel", vec![], string(), Modifiers::public())),
            TypeInfo::new("shop::Leaf")
                .with_superclass("shop::Mid")
                .with_field(FieldInfo::new("secret", string(), Modifiers::default()))
                .with_method(MethodInfo::new(
                    "fetch",
                    vec![string()],
                    TypeRef::named("core::future::Future"),
                    Modifiers::public(),
                ))
                .with_method(MethodInfo::new("reset", vec![], TypeRef::Void, Modifiers::public())),
            TypeInfo::new("shop::Orphan").with_superclass("vendor::Gone"),
        ]
        .into_iter()
        .collect()
    }

    fn generator() -> AccessorGenerator {
        AccessorGenerator::builder().index(index()).build().unwrap()
    }

    #[test]
    fn test_generates_every_ancestor_below_root() {
        let mut generator = generator();
        let mut sink = MemorySink::new();
        generator.generate("shop::Leaf", &mut sink).unwrap();

        let targets: Vec<&str> = sink.artifacts().iter().map(|a| a.target()).collect();
        assert_eq!(targets, vec!["shop::Leaf", "shop::Mid", "shop::Base"]);
        assert_eq!(
            generator.generated_names(),
            &[
                "shop::LeafValueResolver".to_string(),
                "shop::MidValueResolver".to_string(),
                "shop::BaseValueResolver".to_string(),
            ]
        );
    }

    #[test]
    fn test_each_type_analyzed_once() {
        let mut generator = generator();
        let mut sink = MemorySink::new();
        generator.generate("shop::Leaf", &mut sink).unwrap();
        generator.generate("shop::Mid", &mut sink).unwrap();
        assert_eq!(sink.artifacts().len(), 3);
        assert_eq!(
            generator.analyzed_types().collect::<Vec<_>>(),
            vec!["shop::Base", "shop::Leaf", "shop::Mid"]
        );
    }

    #[test]
    fn test_missing_superclass_is_skipped() {
        let mut generator = generator();
        let mut sink = MemorySink::new();
        generator.generate("shop::Orphan", &mut sink).unwrap();
        assert_eq!(sink.artifacts().len(), 1);
    }

    #[test]
    fn test_missing_mid_level_is_stepped_over() {
        let index: TypeIndex = [
            TypeInfo::new("a::Root").with_superclass("Object"),
            TypeInfo::new("a::Leaf")
                .with_superclass("a::Mid")
                .with_ancestor("a::Root")
                .with_ancestor("Object"),
        ]
        .into_iter()
        .collect();
        let mut generator = AccessorGenerator::builder().index(index).build().unwrap();
        let mut sink = MemorySink::new();
        generator.generate("a::Leaf", &mut sink).unwrap();

        let targets: Vec<&str> = sink.artifacts().iter().map(|a| a.target()).collect();
        assert_eq!(targets, vec!["a::Leaf", "a::Root"]);
        assert!(sink.artifacts()[1].applies_to_type("a::Leaf"));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let mut generator = generator();
        let mut sink = MemorySink::new();
        assert!(matches!(
            generator.generate("shop::Nope", &mut sink),
            Err(GeneratorError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_arms_and_async_flag() {
        let mut generator = generator();
        let mut sink = MemorySink::new();
        generator.generate("shop::Leaf", &mut sink).unwrap();

        let leaf = &sink.artifacts()[0];
        assert_eq!(leaf.arms(), &[Arm::method("fetch", 1, true)]);

        let mid = &sink.artifacts()[1];
        assert_eq!(mid.arms(), &[Arm::method("getLabel", 0, false)]);
        assert!(mid.dispatch("label", 0).is_some());
    }

    #[test]
    fn test_assignable_set_covers_subtypes() {
        let mut generator = generator();
        let mut sink = MemorySink::new();
        generator.generate("shop::Leaf", &mut sink).unwrap();

        let base = &sink.artifacts()[2];
        assert!(base.applies_to_type("shop::Leaf"));
        assert!(base.applies_to_type("shop::Mid"));
        assert!(!sink.artifacts()[0].applies_to_type("shop::Base"));
    }

    #[test]
    fn test_configured_filters_apply() {
        let mut configs = ConfigTable::new();
        configs.declare("shop::Leaf", AccessorConfig::new().properties(true));
        let mut generator = AccessorGenerator::builder()
            .index(index())
            .configs(configs)
            .build()
            .unwrap();
        let mut sink = MemorySink::new();
        generator.generate("shop::Leaf", &mut sink).unwrap();
        assert!(sink.artifacts()[0].arms().is_empty());
    }

    #[test]
    fn test_side_table_from_settings() {
        let settings = GeneratorSettings {
            uncontrolled: vec![AccessorConfig::for_target("shop::Base").ignore("id")],
            ..GeneratorSettings::default()
        };
        let mut generator = AccessorGenerator::builder()
            .index(index())
            .settings(settings)
            .build()
            .unwrap();
        let mut sink = MemorySink::new();
        generator.generate("shop::Base", &mut sink).unwrap();
        assert!(sink.artifacts()[0].arms().is_empty());
    }

    #[test]
    fn test_from_files() {
        let dir = TempDir::new().unwrap();
        let index = dir.path().join("index.yaml");
        let settings = dir.path().join("settings.yaml");
        fs::write(&index, "types:\n  - name: shop::Item\n").unwrap();
        fs::write(
            &settings,
            "suffix: Accessor\nuncontrolled:\n  - target: shop::Item\n    properties: true\n",
        )
        .unwrap();

        let generator = AccessorGenerator::from_files(&index, Some(&settings)).unwrap();
        assert!(generator.index().contains("shop::Item"));
        assert_eq!(generator.settings().suffix, "Accessor");
        assert_eq!(generator.configs().configured_types(), vec!["shop::Item"]);
    }

    #[test]
    fn test_from_files_reports_each_failure_kind() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            AccessorGenerator::from_files(&missing, None),
            Err(Error::Io(_))
        ));

        let index = dir.path().join("index.json");
        let settings = dir.path().join("settings.json");
        fs::write(&index, r#"{"types": []}"#).unwrap();
        fs::write(&settings, r#"{"uncontrolled": [{"properties": true}]}"#).unwrap();
        assert!(matches!(
            AccessorGenerator::from_files(&index, Some(&settings)),
            Err(Error::Generator(GeneratorError::MissingTarget { .. }))
        ));
    }
}
