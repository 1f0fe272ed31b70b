//! Human-readable rendering of overlap reports.

use crate::overlap::detector::join;
use crate::overlap::model::OverlapReport;

/// Render a plain-text summary of an [`OverlapReport`]
///
/// One line per overlapping pair, followed by a count. Used for terminal
/// output and as the body of the overlap failure message.
pub fn render_human_summary(report: &OverlapReport) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str(&format!(
            "No overlapping exports across {} feature region(s).\n",
            report.compared.len()
        ));
        return out;
    }

    for overlap in report {
        out.push_str(&format!(
            "Overlap found between {} and {}. Both export: [{}]\n",
            overlap.first,
            overlap.second,
            join(&overlap.shared)
        ));
    }

    let packages: usize = report.iter().map(|o| o.shared.len()).sum();
    out.push_str(&format!(
        "{} overlapping pair(s), {} shared export(s) across {} feature region(s).\n",
        report.len(),
        packages,
        report.compared.len()
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureRegionKey;
    use crate::overlap::model::Overlap;

    #[test]
    fn test_clean_report() {
        let report = OverlapReport {
            compared: vec![FeatureRegionKey::new("f1", "global")],
            overlaps: vec![],
        };
        assert_eq!(
            render_human_summary(&report),
            "No overlapping exports across 1 feature region(s).\n"
        );
    }

    #[test]
    fn test_names_every_pair() {
        let report = OverlapReport {
            compared: vec![
                FeatureRegionKey::new("f1", "foo"),
                FeatureRegionKey::new("f2", "foo"),
            ],
            overlaps: vec![Overlap {
                first: FeatureRegionKey::new("f1", "foo"),
                second: FeatureRegionKey::new("f2", "foo"),
                shared: ["com.b".to_string()].into_iter().collect(),
            }],
        };

        let summary = render_human_summary(&report);
        assert!(summary.contains(
            "Overlap found between Feature: f1, Region: foo and Feature: f2, Region: foo. Both export: [com.b]"
        ));
        assert!(summary.ends_with("1 overlapping pair(s), 1 shared export(s) across 2 feature region(s).\n"));
    }
}
