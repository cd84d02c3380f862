//! BiasCluster normalization.

use serde_json::Value;

use crate::coerce::{clamp_i64, coerce_i64, coerce_str, non_empty, unique_strings};
use crate::enums::ImpactLevel;
use crate::records::{BiasCluster, BiasClusterReport};

/// Maximum clusters in one report.
const MAX_CLUSTERS: usize = 10;

/// Maximum characters in a bias name.
const MAX_BIAS_LEN: usize = 80;

/// Maximum representative quotes per cluster.
const MAX_QUOTES: usize = 3;

/// Maximum characters per quote.
const MAX_QUOTE_LEN: usize = 200;

/// Maximum countermeasures per cluster.
const MAX_COUNTERMEASURES: usize = 4;

/// Maximum characters per countermeasure.
const MAX_COUNTERMEASURE_LEN: usize = 160;

/// Upper bound on a stored occurrence count.
const MAX_OCCURRENCES: i64 = 9_999;

/// Normalize a raw bias-cluster report.
///
/// Zero valid clusters means the record is absent, mirroring the
/// persona-focus rule.
#[must_use]
pub fn normalize_bias_clusters(raw: &Value) -> Option<BiasClusterReport> {
    let obj = raw.as_object()?;
    let clusters: Vec<BiasCluster> = obj
        .get("clusters")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(normalize_cluster)
                .take(MAX_CLUSTERS)
                .collect()
        })
        .unwrap_or_default();

    if clusters.is_empty() {
        None
    } else {
        Some(BiasClusterReport { clusters })
    }
}

/// One cluster entry. A usable bias name is required.
fn normalize_cluster(raw: &Value) -> Option<BiasCluster> {
    let obj = raw.as_object()?;
    let bias = coerce_str(obj.get("bias"), MAX_BIAS_LEN)?;

    Some(BiasCluster {
        bias,
        occurrences: clamp_i64(
            coerce_i64(obj.get("occurrences")).unwrap_or(1),
            1,
            MAX_OCCURRENCES,
        ) as u32,
        quotes: unique_strings(obj.get("quotes"), MAX_QUOTES, MAX_QUOTE_LEN),
        impact: ImpactLevel::parse_or_default(coerce_str(obj.get("impact"), 16).as_deref()),
        countermeasures: non_empty(unique_strings(
            obj.get("countermeasures"),
            MAX_COUNTERMEASURES,
            MAX_COUNTERMEASURE_LEN,
        )),
    })
}
