use std::sync::LazyLock;

use kuchiki::NodeRef;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::dom::{self, IdPattern};

pub const CHART_CONTAINER_IDS: [IdPattern<'static>; 2] =
    [IdPattern::Suffix("-plot"), IdPattern::Prefix("plotly-")];

const PLOT_CALL: &str = "Plotly.newPlot";

static PLOT_CALL_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Plotly\.newPlot\(\s*['"]([^'"]+)['"]"#).expect("plot call pattern is valid")
});

/// A chart container and the script that initializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartScript {
    pub container_id: String,
    pub script: String,
}

/// Pairs every chart container with the first following sibling `<script>`
/// that calls `Plotly.newPlot`. Containers without one are skipped.
pub fn paired_charts(document: &NodeRef) -> Vec<ChartScript> {
    let containers = dom::find_all_by_id_pattern(document, Some("div"), &CHART_CONTAINER_IDS);
    let mut charts = Vec::new();

    for container in containers {
        let Some(container_id) = dom::attr(&container, "id") else {
            continue;
        };
        let script = dom::following_element_siblings(&container)
            .into_iter()
            .find(|sibling| dom::is_tag(sibling, "script"))
            .map(|script| dom::raw_text(&script))
            .filter(|body| body.contains(PLOT_CALL));

        match script {
            Some(script) => charts.push(ChartScript {
                container_id,
                script,
            }),
            None => debug!(container = %container_id, "chart container without init script"),
        }
    }

    charts
}

/// Recovers chart ids from the first argument of every `Plotly.newPlot` call.
pub fn scanned_charts(document: &NodeRef) -> Vec<ChartScript> {
    dom::find_all(document, "script", None)
        .iter()
        .map(dom::raw_text)
        .filter_map(|script| {
            let container_id = PLOT_CALL_TARGET.captures(&script)?.get(1)?.as_str().to_string();
            Some(ChartScript {
                container_id,
                script,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanned_charts_take_the_first_plot_call_argument() {
        let document = dom::parse_document(
            r#"<html><body>
<script>Plotly.newPlot('spectra-lamp-a', data, layout);</script>
<script>var config = {};</script>
<script>Plotly.newPlot( "pca-scores", traces);</script>
</body></html>"#,
        )
        .expect("chart document should parse");

        let ids: Vec<String> = scanned_charts(&document)
            .into_iter()
            .map(|chart| chart.container_id)
            .collect();
        assert_eq!(ids, ["spectra-lamp-a", "pca-scores"]);
    }
}
