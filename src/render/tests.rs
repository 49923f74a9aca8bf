use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use kuchiki::traits::TendrilSink;

use super::*;
use crate::fixtures;
use crate::pipeline::{self, ReportSet};

const TRICKY_ORIGINAL: &str = "<html><body><p title=\"a &quot;quoted&quot; value\">Tom &amp; Jerry &lt;3 \"raw\" & ñandú</p>\n<script>var s = '</iframe>';</script></body></html>\r\n";

fn load(inputs: &[(ReportKind, &str)]) -> ReportSet {
    let mut reports = ReportSet::new();
    for (kind, raw) in inputs {
        reports
            .load_str(*kind, raw.to_string())
            .expect("fixture should load");
    }
    reports
}

fn full_set() -> ReportSet {
    let predictions = fixtures::predictions(&fixtures::FIVE_PRODUCTS, true);
    load(&[
        (ReportKind::Baseline, fixtures::BASELINE),
        (ReportKind::Validation, fixtures::VALIDATION),
        (ReportKind::Predictions, predictions.as_str()),
    ])
}

fn render_with(embed: Box<dyn EmbedStrategy>, reports: &ReportSet, generated_at: Option<&str>) -> String {
    Renderer::new(embed)
        .with_options(RenderOptions {
            generated_at: generated_at.map(str::to_string),
            ..RenderOptions::default()
        })
        .render(&ServiceMetadata::default(), reports, pipeline::reconcile(reports))
}

fn attribute_after<'a>(html: &'a str, marker: &str) -> &'a str {
    let start = html.find(marker).expect("marker should be present") + marker.len();
    let end = html[start..].find('"').expect("attribute should be closed");
    &html[start..start + end]
}

fn recover_srcdoc(html: &str, kind: ReportKind) -> String {
    let document = kuchiki::parse_html().one(html);
    let frame = document
        .select_first(&format!("iframe#original-{}", kind.section_id()))
        .expect("frame should be present");
    let attributes = frame.attributes.borrow();
    attributes
        .get("srcdoc")
        .expect("frame should carry srcdoc")
        .to_string()
}

fn recover_data_uri(html: &str, kind: ReportKind) -> String {
    let marker = format!("id=\"original-{}\"", kind.section_id());
    let link = &html[html.find(&marker).expect("link should be present")..];
    let encoded = attribute_after(link, &format!("href=\"{}", embed::DATA_URI_PREFIX));
    let bytes = STANDARD.decode(encoded).expect("payload should be valid base64");
    String::from_utf8(bytes).expect("payload should be UTF-8")
}

fn mask_timestamp(html: &str) -> String {
    let open = "<span id=\"generated-at\">";
    match html.find(open) {
        Some(start) => {
            let content = start + open.len();
            let end = content + html[content..].find("</span>").expect("span should close");
            format!("{}{}", &html[..content], &html[end..])
        }
        None => html.to_string(),
    }
}

#[test]
fn srcdoc_escaping_touches_only_attribute_sensitive_characters() {
    assert_eq!(
        embed::escape_srcdoc(r#"<a href="x?a=1&b=2">'ok'</a>"#),
        "<a href=&quot;x?a=1&amp;b=2&quot;>'ok'</a>"
    );
    assert_eq!(embed::escape_srcdoc("a\r\nb\rc\0"), "a&#13;\nb&#13;c&#0;");
}

#[test]
fn inline_frame_keeps_carriage_returns() {
    let original = "<html><body>\r\n<p>line one</p>\r\n<p>line two</p>\r<p>three</p>\n</body></html>\r\n";
    let reports = load(&[(ReportKind::Baseline, original)]);

    let html = render_with(Box::new(InlineFrame), &reports, None);

    let recovered = recover_srcdoc(&html, ReportKind::Baseline);
    assert_eq!(recovered, original);
    assert_eq!(recovered.matches('\r').count(), 4);
}

#[test]
fn inline_frame_preserves_originals_byte_for_byte() {
    let mut reports = full_set();
    reports
        .load_str(ReportKind::Validation, TRICKY_ORIGINAL.to_string())
        .expect("tricky original should load");

    let html = render_with(Box::new(InlineFrame), &reports, None);

    for kind in ReportKind::ALL {
        let original = reports.raw(kind).expect("report should be present");
        assert_eq!(recover_srcdoc(&html, kind), original, "{kind} original");
    }
}

#[test]
fn detached_window_preserves_originals_byte_for_byte() {
    let mut reports = full_set();
    reports
        .load_str(ReportKind::Baseline, TRICKY_ORIGINAL.to_string())
        .expect("tricky original should load");

    let html = render_with(Box::new(DetachedWindow), &reports, None);

    for kind in ReportKind::ALL {
        let original = reports.raw(kind).expect("report should be present");
        assert_eq!(recover_data_uri(&html, kind), original, "{kind} original");
    }
    assert!(html.contains("data-open-original=\"baseline\""));
}

#[test]
fn rendering_is_deterministic_apart_from_timestamp() {
    let reports = full_set();

    let first = render_with(Box::new(DetachedWindow), &reports, None);
    let second = render_with(Box::new(DetachedWindow), &reports, None);
    assert_eq!(first, second);
    assert!(!first.contains("generated-at"));

    let morning = render_with(Box::new(InlineFrame), &reports, Some("2025-03-16T08:00:00Z"));
    let evening = render_with(Box::new(InlineFrame), &reports, Some("2025-03-16T20:30:00Z"));
    assert_ne!(morning, evening);
    assert_eq!(mask_timestamp(&morning), mask_timestamp(&evening));
}

#[test]
fn global_banner_reflects_reconciled_status() {
    let html = render_with(Box::new(DetachedWindow), &full_set(), None);

    assert!(html.contains("id=\"global-status\" data-status=\"FAIL\""));
    assert!(html.contains(Status::Fail.banner_text()));
    assert!(html.contains("<div class=\"metric-value\">3</div>\n<div class=\"metric-label\">Informes Consolidados</div>"));
    assert!(html.contains("<section class=\"report-section\" id=\"validation\" data-status=\"FAIL\">"));
    assert!(html.contains("<section class=\"report-section\" id=\"baseline\" data-status=\"OK\">"));
}

#[test]
fn sections_follow_the_fixed_order() {
    let html = render_with(Box::new(DetachedWindow), &full_set(), Some("2025-03-16T08:00:00Z"));

    let positions: Vec<usize> = [
        "class=\"sidebar\"",
        "class=\"report-header\"",
        "class=\"about-report\"",
        "id=\"resumen-ejecutivo\"",
        "id=\"baseline\"",
        "id=\"validation\"",
        "id=\"predictions\"",
        "id=\"generated-at\"",
    ]
    .iter()
    .map(|marker| html.find(marker).unwrap_or_else(|| panic!("{marker} missing")))
    .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{positions:?}");
}

#[test]
fn predictions_preview_lists_three_products_and_a_notice() {
    let predictions = fixtures::predictions(&fixtures::FIVE_PRODUCTS, true);
    let reports = load(&[(ReportKind::Predictions, predictions.as_str())]);

    let html = render_with(Box::new(DetachedWindow), &reports, None);

    for shown in &fixtures::FIVE_PRODUCTS[..3] {
        assert!(html.contains(&format!("<h4 class=\"product-name\">{shown}</h4>")), "{shown}");
    }
    for hidden in &fixtures::FIVE_PRODUCTS[3..] {
        assert!(!html.contains(&format!("<h4 class=\"product-name\">{hidden}</h4>")), "{hidden}");
    }
    assert!(html.contains("... y 2 productos más"));
    assert!(html.contains("<th>Humedad|(%)</th><th>Proteína|(%)</th>"));
}

#[test]
fn unknown_verdict_is_visible() {
    let reports = load(&[(ReportKind::Baseline, fixtures::BASELINE_WITHOUT_CONCLUSION)]);

    let html = render_with(Box::new(DetachedWindow), &reports, None);

    let badge = format!("{} {}", Status::Unknown.icon(), Status::Unknown.as_str());
    assert!(html.contains(&badge));
    assert!(html.contains("data-status=\"UNKNOWN\""));
    assert!(html.contains(Status::Unknown.banner_text()));
}

#[test]
fn partial_input_renders_only_present_sections() {
    let reports = load(&[(ReportKind::Validation, fixtures::VALIDATION_ALL_PASSED)]);

    let html = render_with(Box::new(InlineFrame), &reports, None);

    assert!(html.contains("<a href=\"#validation\">"));
    assert!(!html.contains("<a href=\"#baseline\">"));
    assert!(!html.contains("id=\"predictions\""));
    assert!(html.contains("<div class=\"metric-value\">1</div>\n<div class=\"metric-label\">Informes Consolidados</div>"));
    assert!(html.contains("data-status=\"OK\""));
}

#[test]
fn empty_set_still_renders_a_document() {
    let html = render(&ServiceMetadata::default(), &ReportSet::new(), Status::Unknown);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("data-status=\"UNKNOWN\""));
    assert!(!html.contains("class=\"report-section\""));
}

#[test]
fn metadata_is_escaped_and_optional_blocks_appear() {
    let metadata = ServiceMetadata {
        sensor_id: "91-7".to_string(),
        notes: "Revisar <script>alert(1)</script> & limpiar".to_string(),
        baseline_adjusted: true,
        reference_lamp: "L1".to_string(),
        ..ServiceMetadata::default()
    };

    let html = Renderer::default().render(&metadata, &ReportSet::new(), Status::Unknown);

    assert!(html.contains("<title>Informe Consolidado - 91-7</title>"));
    assert!(html.contains("Revisar &lt;script&gt;alert(1)&lt;/script&gt; &amp; limpiar"));
    assert!(html.contains("✔ Ajuste de baseline"));
    assert!(html.contains("<td><strong>Técnico</strong></td><td>N/A</td>"));
    assert!(!html.contains("class=\"context-box\""));
}

#[test]
fn embed_strategy_names() {
    assert_eq!(Renderer::new(Box::new(InlineFrame)).embed_strategy(), "inline");
    assert_eq!(Renderer::default().embed_strategy(), "detached");
}
