//! Report documents shaped like the ones produced by the upstream tools.

pub const BASELINE: &str = r##"<!DOCTYPE html>
<html lang="es">
<head><meta charset="UTF-8"><title>Informe Baseline</title></head>
<body>
<div class="sidebar"><ul><li><a href="#info-cliente">Cliente</a></li></ul></div>
<div class="main-content">
<div class="info-box" id="info-cliente">
<h2>Información del Cliente</h2>
<table>
<tr><td><strong>Cliente:</strong></td><td>ACME Feeds</td></tr>
<tr><td><strong>ID del Sensor:</strong></td><td>91-7</td></tr>
<tr><td><strong>Fecha:</strong></td><td>2025-03-14</td></tr>
<tr><td><strong>Técnico:</strong></td><td>J. Pérez</td></tr>
</table>
</div>
<div class="info-box" id="wstd-section">
<h2>Diagnóstico WSTD Inicial</h2>
<table>
<tr><th>Métrica</th><th>Valor</th></tr>
<tr><td>Desviación Máxima</td><td>0.0123</td></tr>
</table>
<p>Estado: <span class="status-warning">⚠️ REVISAR</span></p>
</div>
<div class="info-box" id="process-details">
<table>
<tr><td>Configuración</td><td>Estándar</td></tr>
<tr><td>Archivo de Referencia</td><td>ref_2024.ref</td></tr>
</table>
</div>
<div class="info-box" id="correction-stats">
<table>
<tr><th>Métrica</th><th>Valor</th></tr>
<tr><td>Corrección Máxima</td><td>0.004512</td></tr>
<tr><td>RMS de la Corrección</td><td>0.001200</td></tr>
</table>
</div>
<div class="info-box" id="baseline-info">
<table><tr><td>Archivo Generado</td><td>baseline_91-7.ref</td></tr></table>
</div>
<div id="correction-plot"></div>
<script>Plotly.newPlot('correction-plot', [{"x": [1, 2], "y": [3, 4]}], {});</script>
<div class="info-box" id="verification-section">
<h2>Verificación Post-Ajuste</h2>
<div class="status-good">
<p><strong>✅ Ajuste completado correctamente</strong></p>
<p>El baseline corregido coincide con la referencia.</p>
<ul><li>Guardar el archivo COREF</li><li>Repetir la validación en 6 meses</li></ul>
</div>
</div>
<div class="info-box">
<h2>📊 Métricas de Verificación</h2>
<table>
<tr><th>Métrica</th><th>Valor</th></tr>
<tr><td>Correlación</td><td>0.999876</td></tr>
<tr><td>RMS</td><td>0,0008</td></tr>
<tr><td>Diferencia Máxima</td><td>0.0021</td></tr>
</table>
</div>
</div>
</body>
</html>
"##;

/// Conclusion block follows the verification section instead of nesting in it,
/// metrics use the English label variant.
pub const BASELINE_SIBLING_CONCLUSION: &str = r##"<html><body>
<div id="info-cliente"><table><tr><td>Sensor ID:</td><td>A-22</td></tr></table></div>
<div class="info-box" id="verification-section"><h2>Verification</h2></div>
<div class="info-box"><h2>Verification Metrics</h2>
<table>
<tr><th>Metric</th><th>Value</th></tr>
<tr><td>RMS</td><td>0.012</td></tr>
<tr><td>Maximum Difference</td><td>0.025</td></tr>
</table>
</div>
<div class="status-warning"><p>Adjustment finished, please review the correction.</p></div>
</body></html>
"##;

/// No verification block at all.
pub const BASELINE_WITHOUT_CONCLUSION: &str = r##"<html><body>
<div id="info-cliente"><table><tr><td>ID del Sensor:</td><td>91-7</td></tr></table></div>
<div id="correction-stats"><table><tr><th>Métrica</th><th>Valor</th></tr><tr><td>Corrección Máxima</td><td>0.0031</td></tr></table></div>
</body></html>
"##;

pub const VALIDATION: &str = r##"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Validación Óptica</title></head>
<body>
<div class="info-box" id="info-servicio">
<h2>Información del Servicio</h2>
<table>
<tr><td>Cliente:</td><td>ACME Feeds</td></tr>
<tr><td>ID del Sensor:</td><td>91-7</td></tr>
<tr><td>Fecha del Informe:</td><td>2025-03-15</td></tr>
<tr><td>Modelo del Equipo:</td><td>NIR-Online X-One</td></tr>
</table>
</div>
<div class="info-box" id="resumen-ejecutivo">
<h2>Resumen Ejecutivo</h2>
<div class="metrics-grid">
<div class="metric-card"><div class="metric-value">10</div><div class="metric-label">Total Estándares</div></div>
<div class="metric-card ok"><div class="metric-value">7</div><div class="metric-label">✅ Validados</div></div>
<div class="metric-card warning"><div class="metric-value">1</div><div class="metric-label">⚠️ Revisar</div></div>
<div class="metric-card fail"><div class="metric-value">2</div><div class="metric-label">❌ Fallidos</div></div>
<div class="metric-card"><div class="metric-value">70.0%</div><div class="metric-label">Tasa de Éxito</div></div>
</div>
<div class="status-box">
<h3>Resumen de estándares</h3>
<h3>❌ VALIDACIÓN FALLIDA</h3>
</div>
<p>2 estándares no cumplen los criterios de aceptación.</p>
</div>
<div class="info-box" id="criterios-validacion">
<table>
<tr><th>Parámetro</th><th>Umbral</th><th>Descripción</th></tr>
<tr><td>Correlación</td><td>≥ 0.999</td><td>Similitud espectral</td></tr>
<tr><td>Max Δ</td><td>≤ 0.02</td><td>Diferencia máxima</td></tr>
</table>
</div>
<div class="info-box" id="estadisticas-globales">
<table>
<tr><th>Métrica</th><th>Mínimo</th><th>Máximo</th><th>Media</th><th>Desv. Est.</th></tr>
<tr><td>Correlación</td><td>0.9971</td><td>0.9999</td><td>0.9990</td><td>0.0008</td></tr>
</table>
<table>
<tr><th>Métrica</th><th>Valor</th><th>Evaluación</th></tr>
<tr><td>Offset Global</td><td>0.0012</td><td>Aceptable</td></tr>
<tr><td>Correlación Media</td><td>0.9990</td><td>Excelente</td></tr>
</table>
</div>
<div class="info-box" id="resultados-detallados">
<table>
<tr><th>Estado</th><th>ID</th><th>Ref</th><th>Nueva</th><th>Corr</th><th>Max Δ</th><th>RMS</th><th>Pico</th></tr>
<tr><td>✅</td><td>STD-01</td><td>L1</td><td>L2</td><td>0.9999</td><td>0.004</td><td>0.001</td><td>0.2 nm</td></tr>
<tr><td>OK</td><td>STD-02</td><td>L1</td><td>L2</td><td>0.9998</td><td>0.006</td><td>0.002</td><td>0.1 nm</td></tr>
<tr><td>⚠️ Revisar</td><td>STD-03</td><td>L1</td><td>L2</td><td>0.9990</td><td>0.015</td><td>0.006</td><td>0.8 nm</td></tr>
<tr><td>FAIL</td><td>STD-04</td><td>L1</td><td>L2</td><td>0.9971</td><td>0.031</td><td>0.012</td><td>1.9 nm</td></tr>
<tr><td>❌</td><td>STD-05</td><td>L1</td><td>L2</td><td>0.9975</td><td>0.028</td><td>0.011</td><td>1.5 nm</td></tr>
<tr><td>??</td><td>STD-06</td><td>L1</td><td>L2</td><td>0.9995</td><td>0.008</td><td>0.003</td><td>0.3 nm</td></tr>
<tr><td>incompleta</td><td>STD-07</td></tr>
</table>
</div>
<div class="plot-container"><div id="plotly-overlay"></div>
<script>Plotly.newPlot("plotly-overlay", [], {});</script></div>
</body>
</html>
"##;

/// Only the service info table; every other section is absent.
pub const VALIDATION_SPARSE: &str = r##"<html><body>
<div id="info-servicio"><table><tr><td>ID del Sensor:</td><td>55-3</td></tr></table></div>
</body></html>
"##;

pub const VALIDATION_ALL_PASSED: &str = r##"<html><body>
<div id="resumen-ejecutivo">
<div class="metric-card"><div class="metric-value">4</div><div class="metric-label">Total Estándares</div></div>
<div class="metric-card"><div class="metric-value">4</div><div class="metric-label">✅ Validados</div></div>
<div class="metric-card"><div class="metric-value">0</div><div class="metric-label">⚠️ Revisar</div></div>
<div class="metric-card"><div class="metric-value">0</div><div class="metric-label">❌ Fallidos</div></div>
<h3>✅ VALIDACIÓN EXITOSA</h3>
<p>Todos los estándares cumplen los criterios.</p>
</div>
</body></html>
"##;

fn product_section(name: &str, with_thead: bool) -> String {
    let header = "<tr><th>Lámpara</th><th>N</th><th>Humedad<br>(%)<br>(Media ± SD)</th><th>Proteína<br>(%)<br>(Media ± SD)</th></tr>";
    let rows = "<tr><td>L1 (ref)</td><td>12</td><td>10.2 ± 0.3</td><td>35.1 ± 0.4</td></tr>\
                <tr><td>L2 (nueva)</td><td>12</td><td>10.4 ± 0.2</td><td>35.0 ± 0.5</td></tr>";
    let table = if with_thead {
        format!("<table><thead>{header}</thead><tbody>{rows}</tbody></table>")
    } else {
        format!("<table>{header}{rows}</table>")
    };
    format!("<div class=\"section\"><h3>{name}</h3>{table}</div>\n")
}

/// A predictions report with `names` as product sections.
pub fn predictions(names: &[&str], with_thead: bool) -> String {
    let mut sections = String::new();
    for name in names {
        sections.push_str(&product_section(name, with_thead));
    }
    format!(
        r##"<!DOCTYPE html>
<html><head><meta charset="UTF-8"><title>Predicciones</title></head>
<body>
<div class="info-box">
<div class="info-item"><span class="info-label">🔬 Sensor NIR:</span><span class="info-value">91-7</span></div>
<div class="info-item"><span class="info-label">📅 Fecha del Reporte:</span><span class="info-value">2025-03-16</span></div>
<div class="info-item"><span class="info-label">📦 Productos Analizados:</span><span class="info-value">{count}</span></div>
<div class="info-item"><span class="info-label">💡 Lámparas Comparadas:</span><span class="info-value">2</span></div>
<ul><li>L1 (ref)</li><li>L2 (nueva)</li></ul>
</div>
{sections}<div id="pred-plot"></div>
<script>Plotly.newPlot('pred-plot', [], {{}});</script>
<script>var layout = {{}}; Plotly.newPlot('scan-only', [], layout);</script>
</body></html>
"##,
        count = names.len(),
    )
}

pub const FIVE_PRODUCTS: [&str; 5] = ["Harina de Soja", "Maíz", "Trigo", "Cebada", "Colza"];
