//! Overlap check command
//!
//! Usage: apiregions overlap --region <REGION>... [OPTIONS] [FEATURES]...

use std::path::PathBuf;

use apiregions_core::errors::ApiRegionsError;
use apiregions_core::overlap::render_human_summary;
use apiregions_core::{check_overlaps, fail_on_overlap, CheckConfig, ResolveConfig};
use apiregions_core_types::RunContext;
use clap::Args;

use super::{load_features, manifest_source, OutputFormat, ResolveArgs};
use crate::config::{load_config, CliConfig};
use crate::selection::select_feature_files;

#[derive(Debug, Args)]
pub struct OverlapArgs {
    /// Region whose exports must not overlap (repeatable)
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// YAML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Feature files or globs
    pub features: Vec<String>,
}

/// Execute overlap command
pub fn execute(args: OverlapArgs) -> Result<(), Box<dyn std::error::Error>> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };

    let regions = if args.regions.is_empty() {
        file.regions.clone()
    } else {
        args.regions.clone()
    };
    // checked before any feature is read
    if regions.is_empty() {
        return Err(ApiRegionsError::NoRegionsSpecified.into());
    }

    let (include, exclude) = file.feature_globs(&args.features);
    let paths = select_feature_files(&include, &exclude)?;
    let features = load_features(&paths)?;

    let config = CheckConfig::new(regions).with_resolve(resolve_config(&args.resolve, &file));
    let repository = args.resolve.repository.clone().or(file.repository);
    let manifests = manifest_source(repository.as_deref());

    let ctx = RunContext::new().with_origin("cli:overlap");
    let report = check_overlaps(&features, &config, manifests.as_ref(), &ctx)?;

    match args.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "run_id": ctx.run_id.as_str(),
                "digest": report.digest()?,
                "report": &report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text if report.is_empty() => {
            print!("{}", render_human_summary(&report));
        }
        // the failure message carries the summary
        OutputFormat::Text => {}
    }

    fail_on_overlap(report)?;
    Ok(())
}

fn resolve_config(args: &ResolveArgs, file: &CliConfig) -> ResolveConfig {
    let mut config = ResolveConfig::default();

    if !args.include_regions.is_empty() {
        config.include = args.include_regions.clone();
    } else if let Some(include) = &file.include_regions {
        config.include = include.clone();
    }

    if !args.exclude_regions.is_empty() {
        config.exclude = args.exclude_regions.clone();
    } else if let Some(exclude) = &file.exclude_regions {
        config.exclude = exclude.clone();
    }

    config.inheritance_enabled = !args.no_inheritance && file.inheritance.unwrap_or(true);
    config
}
