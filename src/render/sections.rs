use super::escape_html as esc;
use crate::extract::baseline::BaselineRecord;
use crate::extract::predictions::{PredictionsRecord, ProductResult};
use crate::extract::validation::{FAILED_KEY, REVIEW_KEY, TOTAL_KEY, VALIDATED_KEY, ValidationRecord};
use crate::metadata::ServiceMetadata;
use crate::model::{FieldMap, ReportKind};
use crate::pipeline::ReportSet;
use crate::status::Status;

const MISSING: &str = "N/A";
const COUNT_KEYS: [&str; 4] = [TOTAL_KEY, VALIDATED_KEY, REVIEW_KEY, FAILED_KEY];

/// Service metadata is plain text; blank means it was never supplied.
fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        esc(value)
    }
}

/// Extracted values render as found, even when empty; only an absent one is N/A.
fn opt_or_missing(value: Option<&str>) -> String {
    value.map(esc).unwrap_or_else(|| MISSING.to_string())
}

fn status_badge(status: Status) -> String {
    format!(
        r#"<span class="status-badge status-{class}">{icon} {label}</span>"#,
        class = status.css_class(),
        icon = status.icon(),
        label = status.as_str(),
    )
}

fn field_table(fields: &FieldMap) -> String {
    if fields.is_empty() {
        return "<p class=\"empty-section\">Sin datos en el informe original.</p>\n".to_string();
    }
    let mut out = String::from("<table class=\"kv-table\">\n");
    for (label, value) in fields.iter() {
        out.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            esc(label),
            esc(value)
        ));
    }
    out.push_str("</table>\n");
    out
}

fn grid_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", esc(header)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", esc(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn subheading(title: &str) -> String {
    format!("<h3>{}</h3>\n", esc(title))
}

pub fn sidebar(kinds: &[ReportKind]) -> String {
    let mut out = String::from(
        "<nav class=\"sidebar\">\n<h2>📋 Índice</h2>\n<ul>\n<li><a href=\"#resumen-ejecutivo\">📊 Resumen Ejecutivo</a></li>\n",
    );
    for kind in kinds {
        out.push_str(&format!(
            "<li><a href=\"#{id}\">{icon} {title}</a></li>\n",
            id = kind.section_id(),
            icon = kind.icon(),
            title = esc(kind.title()),
        ));
    }
    out.push_str("</ul>\n</nav>\n");
    out
}

pub fn header(metadata: &ServiceMetadata) -> String {
    let mut out = String::from(
        "<header class=\"report-header\">\n<h1>Informe Consolidado de Mantenimiento Preventivo NIR</h1>\n<h3>Información del Servicio</h3>\n<table class=\"service-info\">\n",
    );
    let rows = [
        ("ID del Sensor", &metadata.sensor_id, "Cliente", &metadata.client),
        ("Fecha", &metadata.date, "Técnico", &metadata.technician),
        ("Ubicación", &metadata.location, "Modelo", &metadata.model),
    ];
    for (left_label, left, right_label, right) in rows {
        out.push_str(&format!(
            "<tr><td><strong>{left_label}</strong></td><td>{}</td><td><strong>{right_label}</strong></td><td>{}</td></tr>\n",
            or_missing(left),
            or_missing(right),
        ));
    }
    out.push_str("</table>\n");

    if metadata.has_maintenance_context() {
        out.push_str(&maintenance_context(metadata));
    }
    if !metadata.context.trim().is_empty() {
        out.push_str(&format!(
            "<div class=\"context-box\">\n<h4>📋 Contexto del Experimento / Mantenimiento</h4>\n<p class=\"free-text\">{}</p>\n</div>\n",
            esc(&metadata.context)
        ));
    }
    if !metadata.notes.trim().is_empty() {
        out.push_str(&format!(
            "<div class=\"notes-box\">\n<strong>📝 Notas Adicionales:</strong>\n<p class=\"free-text\">{}</p>\n</div>\n",
            esc(&metadata.notes)
        ));
    }
    out.push_str("</header>\n");
    out
}

fn maintenance_context(metadata: &ServiceMetadata) -> String {
    let flags = [
        ("Mantenimiento preventivo realizado", metadata.maintenance_performed),
        ("Ajuste de baseline", metadata.baseline_adjusted),
        ("Validación óptica", metadata.optical_validation_performed),
        ("Predicciones con muestras reales", metadata.predictions_performed),
    ];
    let mut out = String::from("<div class=\"maintenance-box\">\n<h4>🔧 Procedimientos Realizados</h4>\n<ul>\n");
    for (label, done) in flags {
        let mark = if done { "✔" } else { "✘" };
        out.push_str(&format!("<li>{mark} {label}</li>\n"));
    }
    out.push_str("</ul>\n");
    if !metadata.reference_lamp.is_empty() || !metadata.new_lamp.is_empty() {
        out.push_str(&format!(
            "<p><strong>Lámpara de referencia:</strong> {} &nbsp;→&nbsp; <strong>Lámpara nueva:</strong> {}</p>\n",
            or_missing(&metadata.reference_lamp),
            or_missing(&metadata.new_lamp),
        ));
    }
    out.push_str("</div>\n");
    out
}

pub const ABOUT_BLOCK: &str = r#"<details class="about-report">
<summary><span class="about-title">📖 Acerca de Este Informe</span></summary>
<div class="about-body">
<p>Este informe consolida los resultados de los procedimientos de mantenimiento preventivo y validación
realizados en el espectrómetro NIR. Los procedimientos incluidos garantizan el correcto funcionamiento
del equipo y la fiabilidad de las mediciones analíticas.</p>
<h4>🔧 Procedimientos Incluidos:</h4>
<p><strong>📐 Baseline Adjustment (Ajuste de Línea Base)</strong>: corrección del baseline del espectrómetro
tras el cambio de lámpara. El White Standard Reference (WSTD) diagnostica desviaciones y se genera un archivo
de corrección (COREF) que compensa las diferencias espectrales entre la lámpara anterior y la nueva.</p>
<p><strong>✅ Validación con Standards Ópticos</strong>: verificación de la alineación óptica mediante un kit
de standards certificados. Se evalúan la correlación espectral, la diferencia máxima (Max Δ) y el RMS entre
mediciones de referencia y actuales.</p>
<p><strong>🔬 Predicciones con Muestras Reales</strong>: comparación de las predicciones de múltiples parámetros
entre la lámpara de referencia y la nueva sobre muestras reales del proceso productivo.</p>
<p class="about-hint"><strong>💡 Cómo usar este informe:</strong> cada sección puede expandirse para ver el
resumen con tablas y métricas clave. El informe original completo, con todos sus gráficos interactivos, está
disponible dentro de cada sección.</p>
</div>
</details>
"#;

fn metric_card(class: &str, label: &str, value: &str, sublabel: &str, status: Status) -> String {
    format!(
        "<div class=\"metric-card {class}\">\n<div class=\"metric-label\">{label}</div>\n<div class=\"metric-value\">{value}</div>\n<div class=\"metric-sublabel\">{sublabel}</div>\n<div class=\"metric-status\">{badge}</div>\n</div>\n",
        badge = status_badge(status),
    )
}

pub fn executive_summary(reports: &ReportSet, status: Status) -> String {
    let mut cards = format!(
        "<div class=\"metric-card total\">\n<div class=\"metric-value\">{}</div>\n<div class=\"metric-label\">Informes Consolidados</div>\n</div>\n",
        reports.len()
    );

    if let Some(source) = &reports.baseline {
        let record = &source.record;
        let mut sublabel = "Corrección Máxima".to_string();
        if let Some(state) = record.verification.state {
            sublabel.push_str(&format!(" | Verificación: {}", state.label()));
        }
        cards.push_str(&metric_card(
            record.verdict().css_class(),
            ReportKind::Baseline.title(),
            &opt_or_missing(record.max_correction()),
            &sublabel,
            record.verdict(),
        ));
    }

    if let Some(source) = &reports.validation {
        let record = &source.record;
        let metrics = &record.executive_summary.metrics;
        let count = |key: &str| opt_or_missing(metrics.get(key));
        cards.push_str(&metric_card(
            record.verdict().css_class(),
            ReportKind::Validation.title(),
            &format!("{}/{}", count(VALIDATED_KEY), count(TOTAL_KEY)),
            &format!(
                "Validados (⚠️{} | ❌{})",
                count(REVIEW_KEY),
                count(FAILED_KEY)
            ),
            record.verdict(),
        ));
    }

    if let Some(source) = &reports.predictions {
        let record = &source.record;
        let lamps = record
            .general
            .lamp_count()
            .map(esc)
            .unwrap_or_else(|| record.general.lamps.len().to_string());
        cards.push_str(&metric_card(
            record.verdict().css_class(),
            ReportKind::Predictions.title(),
            &record.products.len().to_string(),
            &format!("Productos ({lamps} lámparas)"),
            record.verdict(),
        ));
    }

    format!(
        "<section class=\"info-box\" id=\"resumen-ejecutivo\">\n<h2>📊 Resumen Ejecutivo</h2>\n<div class=\"metrics-grid\">\n{cards}</div>\n<div class=\"info-box status-box-{class}\" id=\"global-status\" data-status=\"{code}\">\n<h3>{icon} {text}</h3>\n<p>{description}</p>\n</div>\n</section>\n",
        class = status.css_class(),
        code = status.as_str(),
        icon = status.icon(),
        text = status.banner_text(),
        description = status.banner_description(),
    )
}

pub fn report_section(kind: ReportKind, verdict: Status, summary: &str, original: &str) -> String {
    format!(
        "<section class=\"report-section\" id=\"{id}\" data-status=\"{code}\">\n<details open>\n<summary class=\"section-header\"><h2>{icon} {title}</h2>{badge}</summary>\n<div class=\"parsed-content\">\n{summary}</div>\n{original}\n</details>\n</section>\n",
        id = kind.section_id(),
        code = verdict.as_str(),
        icon = kind.icon(),
        title = esc(kind.title()),
        badge = status_badge(verdict),
    )
}

pub fn baseline_summary(record: &BaselineRecord) -> String {
    let mut out = String::new();

    out.push_str(&subheading("Información del Cliente y Equipo"));
    out.push_str(&field_table(&record.client_info));

    out.push_str(&subheading("Diagnóstico WSTD Inicial"));
    out.push_str(&format!(
        "<p>Estado: <strong>{}</strong></p>\n",
        opt_or_missing(record.wstd.status.as_deref())
    ));
    if !record.wstd.metrics.is_empty() {
        out.push_str(&field_table(&record.wstd.metrics));
    }

    out.push_str(&subheading("Detalles del Proceso"));
    out.push_str(&field_table(&record.process_details));

    out.push_str(&subheading("Estadísticas de la Corrección"));
    out.push_str(&field_table(&record.correction_stats));

    out.push_str(&subheading("Baseline Generado"));
    out.push_str(&field_table(&record.baseline_info));

    let verification = &record.verification;
    out.push_str(&subheading("Verificación Post-Ajuste"));
    if !verification.metrics.is_empty() {
        out.push_str(&field_table(&verification.metrics));
    }
    if let Some(state) = verification.state {
        out.push_str(&format!(
            "<p>Estado de verificación: <strong>{}</strong></p>\n",
            state.label()
        ));
    }
    out.push_str(&format!(
        "<div class=\"conclusion status-{}\"><p>{}</p></div>\n",
        record.verdict().css_class(),
        opt_or_missing(verification.conclusion.as_deref())
    ));
    if !verification.recommendations.is_empty() {
        out.push_str("<ul class=\"recommendations\">\n");
        for item in &verification.recommendations {
            out.push_str(&format!("<li>{}</li>\n", esc(item)));
        }
        out.push_str("</ul>\n");
    }

    out
}

pub fn validation_summary(record: &ValidationRecord) -> String {
    let mut out = String::new();
    let summary = &record.executive_summary;

    out.push_str(&subheading("Información del Servicio"));
    out.push_str(&field_table(&record.service_info));

    out.push_str(&subheading("Resumen de Resultados"));
    out.push_str("<div class=\"metrics-grid\">\n");
    let cards = [
        ("total", TOTAL_KEY, "Total"),
        ("ok", VALIDATED_KEY, "✅ Validados"),
        ("warning", REVIEW_KEY, "⚠️ Revisar"),
        ("fail", FAILED_KEY, "❌ Fallidos"),
    ];
    for (class, key, label) in cards {
        out.push_str(&format!(
            "<div class=\"metric-card {class}\">\n<div class=\"metric-value\">{}</div>\n<div class=\"metric-label\">{label}</div>\n</div>\n",
            opt_or_missing(summary.metrics.get(key))
        ));
    }
    out.push_str("</div>\n");

    let extra: FieldMap = summary
        .metrics
        .iter()
        .filter(|(label, _)| !COUNT_KEYS.contains(label))
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .collect();
    if !extra.is_empty() {
        out.push_str(&field_table(&extra));
    }

    if let Some(conclusion) = &summary.conclusion {
        out.push_str(&format!(
            "<div class=\"conclusion status-{}\">\n<h4>{}</h4>\n<p>{}</p>\n</div>\n",
            record.verdict().css_class(),
            esc(conclusion),
            opt_or_missing(summary.description.as_deref())
        ));
    }

    if !record.criteria.is_empty() {
        out.push_str(&subheading("Criterios de Validación"));
        let rows: Vec<Vec<String>> = record
            .criteria
            .iter()
            .map(|row| vec![row.parameter.clone(), row.threshold.clone(), row.description.clone()])
            .collect();
        out.push_str(&grid_table(&["Parámetro", "Umbral", "Descripción"], &rows));
    }

    if !record.global_stats.aggregates.is_empty() {
        out.push_str(&subheading("Estadísticas Globales"));
        let rows: Vec<Vec<String>> = record
            .global_stats
            .aggregates
            .iter()
            .map(|row| {
                vec![
                    row.metric.clone(),
                    row.min.clone(),
                    row.max.clone(),
                    row.mean.clone(),
                    row.std_dev.clone(),
                ]
            })
            .collect();
        out.push_str(&grid_table(&["Métrica", "Mínimo", "Máximo", "Media", "Desv. Est."], &rows));
    }

    if !record.global_stats.key_metrics.is_empty() {
        out.push_str(&subheading("Métricas Clave"));
        let rows: Vec<Vec<String>> = record
            .global_stats
            .key_metrics
            .iter()
            .map(|row| vec![row.metric.clone(), row.value.clone(), row.evaluation.clone()])
            .collect();
        out.push_str(&grid_table(&["Métrica", "Valor", "Evaluación"], &rows));
    }

    out.push_str(&subheading("Resultados por Estándar"));
    if record.results.is_empty() {
        out.push_str("<p class=\"empty-section\">Sin resultados por estándar en el informe original.</p>\n");
    } else {
        let with_shift = record.results.iter().any(|row| row.shift.is_some());
        let mut headers = vec!["Estado", "ID Estándar", "Lámpara Ref.", "Lámpara Nueva", "Correlación", "Max Δ", "RMS"];
        if with_shift {
            headers.push("Desplazamiento");
        }
        let rows: Vec<Vec<String>> = record
            .results
            .iter()
            .map(|row| {
                let mut cells = vec![
                    format!("{} {}", row.status.icon(), row.status.as_str()),
                    row.standard_id.clone(),
                    row.reference_lamp.clone(),
                    row.new_lamp.clone(),
                    row.correlation.clone(),
                    row.max_diff.clone(),
                    row.rms.clone(),
                ];
                if with_shift {
                    cells.push(row.shift.clone().unwrap_or_default());
                }
                cells
            })
            .collect();
        out.push_str(&grid_table(&headers, &rows));
    }

    out
}

pub fn predictions_summary(record: &PredictionsRecord, preview: usize) -> String {
    let mut out = String::new();

    out.push_str(&subheading("Información General"));
    out.push_str(&field_table(&record.general.fields));
    if !record.general.lamps.is_empty() {
        out.push_str("<p><strong>Lámparas:</strong></p>\n<ul class=\"lamp-list\">\n");
        for lamp in &record.general.lamps {
            out.push_str(&format!("<li>{}</li>\n", esc(lamp)));
        }
        out.push_str("</ul>\n");
    }

    out.push_str(&subheading("Resultados por Producto (Vista previa)"));
    if record.products.is_empty() {
        out.push_str("<p class=\"empty-section\">Sin productos en el informe original.</p>\n");
        return out;
    }
    for product in record.products.iter().take(preview) {
        out.push_str(&product_table(product));
    }

    let hidden = record.products.len().saturating_sub(preview);
    if hidden > 0 {
        out.push_str(&format!(
            "<p class=\"more-products\"><em>... y {hidden} productos más (ver informe completo)</em></p>\n"
        ));
    }

    out
}

fn product_table(product: &ProductResult) -> String {
    let mut headers = vec!["Lámpara", "N"];
    headers.extend(product.parameters.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = product
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.lamp.clone(), row.samples.clone()];
            cells.extend(
                product
                    .parameters
                    .iter()
                    .map(|parameter| row.values.get(parameter).unwrap_or_default().to_string()),
            );
            cells
        })
        .collect();

    format!(
        "<h4 class=\"product-name\">{}</h4>\n{}",
        esc(&product.name),
        grid_table(&headers, &rows)
    )
}

pub fn footer(generated_at: Option<&str>) -> String {
    let stamp = generated_at
        .map(|stamp| {
            format!(
                "<p>Generado: <span id=\"generated-at\">{}</span></p>\n",
                esc(stamp)
            )
        })
        .unwrap_or_default();
    format!(
        "<footer class=\"report-footer\">\n<p><strong>NIR Maintenance Consolidator</strong></p>\n<p>Informe consolidado generado automáticamente</p>\n{stamp}</footer>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_values_render_as_found() {
        let mut fields = FieldMap::new();
        fields.insert("Modelo", "");
        fields.insert("Serie", "A&B");

        let table = field_table(&fields);
        assert!(table.contains("<tr><th>Modelo</th><td></td></tr>"));
        assert!(table.contains("<tr><th>Serie</th><td>A&amp;B</td></tr>"));

        let grid = grid_table(&["Estándar"], &[vec![String::new()]]);
        assert!(grid.contains("<tr><td></td></tr>"));
    }

    #[test]
    fn only_absent_values_show_as_missing() {
        assert_eq!(opt_or_missing(Some("")), "");
        assert_eq!(opt_or_missing(Some("0,8")), "0,8");
        assert_eq!(opt_or_missing(None), MISSING);
        assert_eq!(or_missing("  "), MISSING);
    }
}
