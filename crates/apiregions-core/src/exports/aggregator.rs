use std::collections::BTreeSet;

use crate::errors::Result;
use crate::exports::header::export_names;
use crate::exports::source::BundleManifestSource;
use crate::model::{ArtifactId, Region};

/// Fold bundle `Export-Package` headers into one export set
///
/// `None` entries are bundles without the header and contribute nothing.
///
/// # Errors
/// * `MalformedExportHeader` - a header does not parse
pub fn aggregate_from_bundles<'a, I>(headers: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut exports = BTreeSet::new();
    for header in headers.into_iter().flatten() {
        exports.extend(export_names(header)?);
    }
    Ok(exports)
}

/// Fill a synthetic `global` region from the manifests of a feature's bundles
///
/// Any failure of the manifest source aborts the whole aggregation.
///
/// # Errors
/// * Whatever `source` reports for a bundle
/// * `MalformedExportHeader` - a header does not parse
pub fn populate_global_region(
    region: &mut Region,
    bundles: &[ArtifactId],
    source: &dyn BundleManifestSource,
) -> Result<()> {
    for bundle in bundles {
        let header = source.export_header(bundle)?;
        let Some(header) = header else {
            tracing::debug!(bundle_id = %bundle, "bundle has no Export-Package header");
            continue;
        };

        let names = export_names(&header)?;
        tracing::debug!(bundle_id = %bundle, exports = names.len(), "read bundle exports");
        for name in names {
            region.export_or_insert(&name);
        }
    }
    Ok(())
}
