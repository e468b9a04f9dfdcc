use html_escape::encode_text;
use serde::Serialize;
use serde_json::json;

use crate::cases::fields::{CaseTuple, FIELD_NAMES};

const COL_WIDTHS: [u32; 7] = [92, 88, 243, 529, 148, 125, 206];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub col_headers: Vec<&'static str>,
    pub renderers: serde_json::Value,
    pub col_widths: Vec<u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            col_headers: FIELD_NAMES.to_vec(),
            renderers: json!({
                "front": "markdownRenderer",
                "back": "markdownRenderer"
            }),
            col_widths: COL_WIDTHS.to_vec(),
        }
    }
}

/// JSON for an inline `<script>`; `</` must not close the tag early.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

pub fn render_index(title: &str, config: &GridConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 1rem; }}
        table {{ border-collapse: collapse; }}
        td, th {{ border: 1px solid #ccc; padding: 4px; vertical-align: top; white-space: pre-wrap; }}
        #pager button {{ margin-right: 4px; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <form id="search"><input name="q" placeholder="Search"><button>Search</button></form>
    <div id="pager"></div>
    <table id="grid"></table>
    <script id="config" type="application/json">{config}</script>
    <script>
        const config = JSON.parse(document.getElementById('config').textContent);
        const state = {{ page: 1, q: '' }};

        async function load() {{
            const url = state.q ? `/api/search/${{state.page}}` : `/api/all/${{state.page}}`;
            const res = state.q
                ? await fetch(url, {{ method: 'POST', headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify({{ q: state.q }}) }})
                : await fetch(url);
            const body = await res.json();
            const grid = document.getElementById('grid');
            grid.replaceChildren();
            const head = grid.insertRow();
            config.colHeaders.forEach((h, i) => {{
                const th = document.createElement('th');
                th.textContent = h;
                th.style.width = config.colWidths[i] + 'px';
                head.appendChild(th);
            }});
            body.data.forEach(row => {{
                const tr = grid.insertRow();
                config.colHeaders.forEach(h => {{ tr.insertCell().textContent = row[h] ?? ''; }});
            }});
            const p = body.pages;
            document.getElementById('pager').textContent = `${{p.from}}-${{p.to}} of ${{p.total}}`;
        }}

        document.getElementById('search').addEventListener('submit', e => {{
            e.preventDefault();
            state.q = new FormData(e.target).get('q');
            state.page = 1;
            load();
        }});
        load();
    </script>
</body>
</html>"#,
        title = encode_text(title),
        config = script_json(config),
    )
}

pub fn render_card(card: &CaseTuple, show: bool) -> String {
    let back = if show {
        format!(
            r#"<hr>
        <div class="back">{}</div>"#,
            encode_text(&card.back)
        )
    } else {
        match card.id {
            Some(id) => format!(r#"<a href="/card/{id}/show">Show answer</a>"#),
            None => String::new(),
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Case {id}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 800px; margin: 2rem auto; }}
        .card {{ background: white; border-radius: 8px; padding: 2rem; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        .front, .back {{ white-space: pre-wrap; }}
        .tags {{ color: #666; }}
    </style>
</head>
<body>
    <div class="card">
        <div class="front">{front}</div>
        {back}
        <div class="tags">{tags}</div>
    </div>
</body>
</html>"#,
        id = card.id.map(|id| id.to_string()).unwrap_or_default(),
        front = encode_text(&card.front),
        back = back,
        tags = encode_text(&card.tags),
    )
}
