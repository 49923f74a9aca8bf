pub const STYLES: &str = r#"
body {
    font-family: Helvetica, Arial, sans-serif;
    margin: 0;
    background-color: #ffffff;
    color: #000000;
    font-size: 14px;
}

.sidebar {
    position: fixed;
    left: 0;
    top: 0;
    width: 250px;
    height: 100%;
    background-color: #093A34;
    padding: 20px;
    overflow-y: auto;
    z-index: 1000;
    box-sizing: border-box;
}
.sidebar h2 { color: white; font-size: 16px; text-align: center; }
.sidebar ul { list-style: none; padding: 0; }
.sidebar ul li { margin-bottom: 10px; }
.sidebar ul li a {
    color: white;
    text-decoration: none;
    display: block;
    padding: 8px;
    border-radius: 5px;
    font-weight: bold;
}
.sidebar ul li a:hover { background-color: #289A93; }

.main-content { margin-left: 270px; padding: 40px; }

h1, h2, h3, h4 { color: #000000; }

.report-header {
    background-color: #f8f9fa;
    padding: 30px;
    border-radius: 10px;
    margin-bottom: 30px;
    border: 1px solid #ddd;
}
.report-header h1 { margin: 0; }
.context-box, .maintenance-box {
    margin-top: 20px;
    padding: 20px;
    background-color: #e3f2fd;
    border-left: 4px solid #2196f3;
    border-radius: 5px;
}
.notes-box {
    margin-top: 15px;
    padding: 15px;
    background-color: #fff3e0;
    border-left: 4px solid #ff9800;
    border-radius: 5px;
}
.free-text { line-height: 1.6; white-space: pre-line; }

.about-report summary {
    cursor: pointer;
    padding: 20px;
    border-radius: 8px;
    border: 1px solid #dee2e6;
}
.about-title { font-size: 1.2em; font-weight: bold; }
.about-body { padding: 25px; border: 1px solid #dee2e6; border-top: none; line-height: 1.6; }
.about-hint { color: #6c757d; background-color: #f8f9fa; padding: 15px; border-radius: 5px; }

.info-box, .report-section {
    background-color: #ffffff;
    padding: 25px;
    margin: 25px 0;
    border-radius: 10px;
    border: 1px solid #ddd;
}
.report-section > details > summary {
    cursor: pointer;
    list-style: none;
    padding: 15px;
    background-color: #f8f9fa;
    border-radius: 8px;
}
.report-section > details > summary::-webkit-details-marker { display: none; }
.section-header h2 { display: inline; margin: 0 15px 0 0; font-size: 1.5em; }
.parsed-content { padding: 20px 0; }
.empty-section { color: #6c757d; font-style: italic; }

.full-report-link {
    margin-top: 30px;
    padding: 20px;
    border-top: 2px solid #e9ecef;
    text-align: center;
}
.iframe-container { width: 100%; height: 800px; margin-bottom: 20px; }
.original-frame { width: 100%; height: 100%; border: 1px solid #ddd; border-radius: 8px; }
.open-full-report-btn {
    padding: 15px 30px;
    background: linear-gradient(135deg, #64B445 0%, #289A93 100%);
    color: white;
    border-radius: 8px;
    font-weight: bold;
    font-size: 1.1em;
    border: none;
    cursor: pointer;
}
.report-link-description { margin-top: 10px; color: #6c757d; font-size: 0.9em; font-style: italic; }

table { border-collapse: collapse; margin: 20px 0; width: 100%; }
table, th, td { border: 1px solid #ddd; }
th { padding: 12px 10px; text-align: left; background-color: #f8f9fa; }
td { padding: 10px; text-align: left; font-size: 13px; }
.kv-table th { width: 35%; }

.metrics-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 20px;
    margin: 20px 0;
}
.metric-card { padding: 20px; border-radius: 8px; text-align: center; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.metric-card.ok { background-color: #e8f5e9; border-left: 4px solid #4caf50; }
.metric-card.warning { background-color: #fff3e0; border-left: 4px solid #ff9800; }
.metric-card.fail { background-color: #ffebee; border-left: 4px solid #f44336; }
.metric-card.total { background-color: #e3f2fd; border-left: 4px solid #2196f3; }
.metric-card.info { background-color: #f8f9fa; border-left: 4px solid #64B445; }
.metric-value { font-size: 36px; font-weight: bold; margin-bottom: 5px; }
.metric-label { font-size: 14px; color: #666; font-weight: bold; }
.metric-sublabel { font-size: 12px; color: #999; margin-top: 5px; }
.metric-status { margin-top: 10px; }

.status-badge { display: inline-block; padding: 4px 10px; border-radius: 12px; font-weight: bold; font-size: 0.9em; }
.status-badge.status-ok { background-color: #e8f5e9; color: #2e7d32; }
.status-badge.status-warning { background-color: #fff3e0; color: #e65100; }
.status-badge.status-fail { background-color: #ffebee; color: #c62828; }
.status-badge.status-info { background-color: #e3f2fd; color: #1565c0; }

.status-box-ok { background-color: #e8f5e9; border-left: 4px solid #4caf50; }
.status-box-warning { background-color: #fff3e0; border-left: 4px solid #ff9800; }
.status-box-fail { background-color: #ffebee; border-left: 4px solid #f44336; }
.status-box-info { background-color: #e3f2fd; border-left: 4px solid #2196f3; }

.conclusion { padding: 15px; border-radius: 5px; margin: 15px 0; }
.conclusion.status-ok { background-color: #e8f5e9; }
.conclusion.status-warning { background-color: #fff3e0; }
.conclusion.status-fail { background-color: #ffebee; }
.conclusion.status-info { background-color: #f8f9fa; }

.report-footer {
    text-align: center;
    margin-top: 50px;
    padding: 20px;
    border-top: 2px solid #f8f9fa;
    color: #6c757d;
}

@media print {
    .sidebar, .full-report-link { display: none; }
    .main-content { margin-left: 0; padding: 0; }
    .report-section > details > .parsed-content { display: block; }
    .report-section { page-break-inside: avoid; }
}
"#;
