//! Region report command
//!
//! Usage: apiregions regions <FEATURE> [OPTIONS]

use std::path::PathBuf;

use apiregions_core::descriptor::read_feature_file;
use apiregions_core::model::PROPERTY_FILTER;
use apiregions_core::{resolve, RegionSet, Resolution, ResolveConfig};
use clap::Args;

use super::{manifest_source, OutputFormat, ResolveArgs};

#[derive(Debug, Args)]
pub struct RegionsArgs {
    /// Feature file to resolve
    pub feature: PathBuf,

    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute regions command
pub fn execute(args: RegionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let feature = read_feature_file(&args.feature)?;
    let feature_id = feature
        .label()
        .unwrap_or_else(|| args.feature.display().to_string());

    let mut config = ResolveConfig::default();
    if !args.resolve.include_regions.is_empty() {
        config.include = args.resolve.include_regions.clone();
    }
    config.exclude = args.resolve.exclude_regions.clone();
    config.inheritance_enabled = !args.resolve.no_inheritance;

    let manifests = manifest_source(args.resolve.repository.as_deref());
    let resolution = resolve(&feature_id, &feature, &config, manifests.as_ref())?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&feature_id, &resolution)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "feature_id": feature_id,
                "outcome": outcome(&resolution),
                "regions": resolution.regions().cloned().unwrap_or_default(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn outcome(resolution: &Resolution) -> &'static str {
    match resolution {
        Resolution::Resolved(_) => "resolved",
        Resolution::OptedOut => "opted_out",
        Resolution::NoRegionsIncluded => "no_regions_included",
    }
}

fn render_text(feature_id: &str, resolution: &Resolution) -> String {
    let mut out = format!("Feature: {}\n", feature_id);
    match resolution {
        Resolution::OptedOut => out.push_str("Opted out: empty api-regions extension\n"),
        Resolution::NoRegionsIncluded => out.push_str("No regions included\n"),
        Resolution::Resolved(regions) => render_regions(&mut out, regions),
    }
    out
}

fn render_regions(out: &mut String, regions: &RegionSet) {
    for region in regions {
        out.push_str(&format!("Region: {}", region.name));
        if let Some(parent) = &region.parent {
            out.push_str(&format!(" (parent: {})", parent));
        }
        out.push_str(&format!(" [{} export(s)]\n", region.len()));

        for export in region.exports() {
            match export.properties.get(PROPERTY_FILTER) {
                Some(filter) => {
                    out.push_str(&format!("  {} {}={}\n", export.name, PROPERTY_FILTER, filter))
                }
                None => out.push_str(&format!("  {}\n", export.name)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiregions_core::model::{ApiExport, Region};

    #[test]
    fn test_render_opted_out() {
        assert_eq!(
            render_text("g:f:1", &Resolution::OptedOut),
            "Feature: g:f:1\nOpted out: empty api-regions extension\n"
        );
    }

    #[test]
    fn test_render_regions_with_filter() {
        let mut region = Region::new("internal").with_parent("global");
        let mut export = ApiExport::new("com.a");
        export
            .properties
            .insert(PROPERTY_FILTER.to_string(), "*/com/a/*".to_string());
        region.add_export(export);

        let mut regions = RegionSet::new();
        regions.insert(region).unwrap();

        assert_eq!(
            render_text("g:f:1", &Resolution::Resolved(regions)),
            "Feature: g:f:1\nRegion: internal (parent: global) [1 export(s)]\n  com.a apis-jar.filter=*/com/a/*\n"
        );
    }
}
