//! Strategies for carrying an original report inside the consolidated page.
//!
//! Both keep the original text byte-for-byte and isolate it from the outer
//! page: either inside a sandboxed `srcdoc` frame, or base64-encoded and only
//! reconstructed into its own browsing context on demand.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::escape_html;
use crate::model::ReportKind;

pub const DATA_URI_PREFIX: &str = "data:text/html;charset=utf-8;base64,";

pub trait EmbedStrategy {
    fn name(&self) -> &'static str;

    /// Markup that gives the reader access to `raw`, the untouched original.
    fn embed(&self, kind: ReportKind, raw: &str) -> String;
}

/// Renders the original inline in a sandboxed frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFrame;

/// Carries the original as a base64 data link; a button reopens it in a new tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedWindow;

/// Escapes what a double-quoted attribute value needs so the browser decodes
/// it back to the original text. Carriage returns become character
/// references since input preprocessing would fold them into `\n`. NUL is
/// written as `&#0;`; parsers decode it to U+FFFD, so only the detached
/// strategy carries it intact.
pub fn escape_srcdoc(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 16);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\r' => out.push_str("&#13;"),
            '\0' => out.push_str("&#0;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn encode_data_uri(raw: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(raw.as_bytes()))
}

fn open_button(kind: ReportKind, source: &str) -> String {
    format!(
        r#"<button type="button" class="open-full-report-btn" data-open-original="{id}" data-source="{source}">📄 Abrir Informe Completo en Nueva Pestaña</button>"#,
        id = kind.section_id(),
    )
}

impl EmbedStrategy for InlineFrame {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn embed(&self, kind: ReportKind, raw: &str) -> String {
        let id = kind.section_id();
        format!(
            r#"<div class="full-report-link">
<div class="iframe-container">
<iframe id="original-{id}" class="original-frame" title="{title}" sandbox="allow-scripts allow-popups" loading="lazy" srcdoc="{srcdoc}"></iframe>
</div>
{button}
<p class="report-link-description">Informe original completo, sin modificaciones, con todos los gráficos interactivos.</p>
</div>"#,
            title = escape_html(kind.title()),
            srcdoc = escape_srcdoc(raw),
            button = open_button(kind, "frame"),
        )
    }
}

impl EmbedStrategy for DetachedWindow {
    fn name(&self) -> &'static str {
        "detached"
    }

    fn embed(&self, kind: ReportKind, raw: &str) -> String {
        let id = kind.section_id();
        format!(
            r#"<div class="full-report-link">
{button}
<p class="report-link-description">Se abrirá el informe original completo con todos los gráficos interactivos y detalles.
Si el botón no responde, use el enlace: <a id="original-{id}" class="original-report" href="{href}" download="{id}-original.html" target="_blank" rel="noopener">descargar informe original</a>.</p>
</div>"#,
            button = open_button(kind, "link"),
            href = encode_data_uri(raw),
        )
    }
}

/// Page-level script behind every "open original" button. Emitted once.
pub const OPEN_ORIGINAL_SCRIPT: &str = r#"<script>
(function () {
    function originalHtml(button) {
        var target = document.getElementById('original-' + button.getAttribute('data-open-original'));
        if (!target) {
            return null;
        }
        if (button.getAttribute('data-source') === 'frame') {
            return target.getAttribute('srcdoc');
        }
        var href = target.getAttribute('href') || '';
        var binary = atob(href.substring(href.indexOf(',') + 1));
        var bytes = new Uint8Array(binary.length);
        for (var i = 0; i < binary.length; i++) {
            bytes[i] = binary.charCodeAt(i);
        }
        return new TextDecoder('utf-8').decode(bytes);
    }

    document.querySelectorAll('button[data-open-original]').forEach(function (button) {
        button.addEventListener('click', function () {
            try {
                var html = originalHtml(button);
                if (html === null) {
                    return;
                }
                var blob = new Blob([html], { type: 'text/html;charset=utf-8' });
                var url = URL.createObjectURL(blob);
                window.open(url, '_blank');
                setTimeout(function () { URL.revokeObjectURL(url); }, 5000);
            } catch (error) {
                console.error('No se pudo abrir el informe original:', error);
                alert('No se pudo abrir el informe. Use el enlace de descarga de la sección.');
            }
        });
    });
})();
</script>"#;
