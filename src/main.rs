use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use template_resolve::cli::{self, OutputFormat};
use template_resolve::generator::{
    AccessorGenerator, ConfigTable, GeneratorSettings, MemorySink, SourceDirSink,
};
use template_resolve::logging::{self, Verbosity};
use template_resolve::metadata::TypeIndex;
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let mut generator = AccessorGenerator::from_files(&args.index, args.settings.as_deref())
        .with_context(|| format!("Failed to prepare generator: {}", args.index.display()))?;

    let requested = requested_types(
        &args.types,
        generator.settings(),
        generator.configs(),
        generator.index(),
    );
    info!(
        requested = requested.len(),
        indexed = generator.index().len(),
        format = args.format.as_str(),
        "generating accessors"
    );

    match args.format {
        OutputFormat::Json => {
            let mut sink = MemorySink::new();
            generator.generate_all(&requested, &mut sink)?;
            let summary = serde_json::to_string_pretty(sink.artifacts())
                .context("Failed to serialize artifact summary")?;
            println!("{summary}");
        }
        OutputFormat::Rust => {
            let out = args
                .out
                .as_deref()
                .context("--out is required with --format rust")?;
            let mut sink = SourceDirSink::new(out);
            generator.generate_all(&requested, &mut sink)?;
            let written = sink.finish()?;
            info!(written = written.len(), dir = %out.display(), "sources written");
        }
    }

    Ok(())
}

/// Explicit types, then the settings' list, then every configured type that
/// the index knows about. Duplicates keep their first position.
fn requested_types(
    explicit: &[String],
    settings: &GeneratorSettings,
    configs: &ConfigTable,
    index: &TypeIndex,
) -> Vec<String> {
    let configured = configs.configured_types().into_iter().filter(|name| {
        let known = index.contains(name);
        if !known {
            warn!(type_name = %name, "skipping configured type not found in the index");
        }
        known
    });

    let mut requested: Vec<String> = Vec::new();
    for name in explicit
        .iter()
        .chain(settings.types.iter())
        .cloned()
        .chain(configured)
    {
        if !requested.contains(&name) {
            requested.push(name);
        }
    }
    requested
}
