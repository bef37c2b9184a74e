//! HTML rendering for the generator page and the legal pages.

use std::fmt::Write as _;

use crate::catalog::{DEFAULT_SIZE_ID, ErrorCorrection};
use crate::generate::GenerationResult;
use crate::input::DEFAULT_COLOR;

use super::state::AppState;

/// Values echoed back into the form.
#[derive(Debug, Clone)]
pub struct FormValues {
    pub data: String,
    pub size: String,
    pub color: String,
    pub error_correction: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            data: String::new(),
            size: DEFAULT_SIZE_ID.to_string(),
            color: DEFAULT_COLOR.to_string(),
            error_correction: ErrorCorrection::default().code().to_string(),
        }
    }
}

/// Everything the index page can show.
#[derive(Default)]
pub struct IndexView<'a> {
    pub form: FormValues,
    pub result: Option<&'a GenerationResult>,
    pub error: Option<String>,
}

/// Escape text for HTML body and attribute context.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared layout.
pub fn layout(state: &AppState, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/style.css?v={v}">
</head>
<body>
    <div class="container">
{content}
        <footer>
            <a href="/">Генератор</a>
            <a href="/privacy-policy">Конфиденциальность</a>
            <a href="/terms-of-service">Условия</a>
            <a href="/cookie-policy">Cookies</a>
            <a href="/dmca-policy">DMCA</a>
        </footer>
    </div>
    <script src="/static/app.js?v={v}"></script>
</body>
</html>"#,
        title = escape_html(title),
        v = state.boot_time,
        content = content,
    )
}

/// Render the generator page.
pub fn index_page(state: &AppState, view: &IndexView<'_>) -> String {
    let mut body = String::new();
    let form = &view.form;

    body.push_str("        <h1>Генератор QR-кодов</h1>\n");
    body.push_str(
        "        <p class=\"subtitle\">Ссылки, email, телефоны и любой текст</p>\n",
    );

    if let Some(error) = &view.error {
        let _ = writeln!(body, "        <div class=\"error\">{}</div>", escape_html(error));
    }
    if let Some(warning) = view.result.and_then(|r| r.warning.as_deref()) {
        let _ = writeln!(body, "        <div class=\"warning\">{}</div>", escape_html(warning));
    }

    body.push_str("        <form method=\"post\" action=\"/\">\n");

    let _ = writeln!(
        body,
        r#"            <div class="form-group">
                <label for="data">Данные</label>
                <textarea id="data" name="data" required>{}</textarea>
                <div class="hint" id="char-count"></div>
            </div>"#,
        escape_html(&form.data)
    );

    body.push_str(
        "            <div class=\"form-group\">\n                <label for=\"size\">Размер</label>\n                <select id=\"size\" name=\"size\">\n",
    );
    for profile in state.sizes {
        let _ = writeln!(
            body,
            "                    <option value=\"{}\"{}>{} ({})</option>",
            profile.id,
            selected(profile.id == form.size),
            profile.name,
            profile.description
        );
    }
    body.push_str("                </select>\n            </div>\n");

    let _ = writeln!(
        body,
        r#"            <div class="form-group">
                <label for="color">Цвет</label>
                <input type="text" id="color" name="color" value="{}">
                <div class="palette">"#,
        escape_html(&form.color)
    );
    for color in state.palette {
        let _ = writeln!(
            body,
            "                    <span class=\"swatch\" data-color=\"{c}\" title=\"{c}\" style=\"background: {c}\"></span>",
            c = color
        );
    }
    body.push_str("                </div>\n            </div>\n");

    body.push_str(
        "            <div class=\"form-group\">\n                <label for=\"error_correction\">Коррекция ошибок</label>\n                <select id=\"error_correction\" name=\"error_correction\">\n",
    );
    for level in ErrorCorrection::ALL {
        let _ = writeln!(
            body,
            "                    <option value=\"{}\"{}>{}</option>",
            level.code(),
            selected(level.code() == form.error_correction),
            level.display_name()
        );
    }
    body.push_str("                </select>\n            </div>\n");

    body.push_str("            <button type=\"submit\">Создать QR-код</button>\n        </form>\n");

    if let Some(result) = view.result {
        body.push_str(&result_panel(result));
    }

    layout(state, "Генератор QR-кодов", &body)
}

fn result_panel(result: &GenerationResult) -> String {
    format!(
        r#"        <div class="result">
            <img src="{uri}" alt="QR-код" width="{px}" height="{px}">
            <p><a href="{uri}" download="qr-code.png">Скачать PNG</a></p>
            <dl class="meta">
                <dt>Закодировано</dt><dd>{encoded}</dd>
                <dt>Длина</dt><dd>{len} символов (рекомендуется {max})</dd>
                <dt>Размер</dt><dd>{size} ({px}×{px} px)</dd>
                <dt>Версия</dt><dd>{version}</dd>
                <dt>Цвет</dt><dd>{color}</dd>
                <dt>Коррекция</dt><dd>{level}</dd>
            </dl>
        </div>
"#,
        uri = result.data_uri(),
        px = result.size_px,
        encoded = escape_html(&result.encoded_data),
        len = result.data_length,
        max = result.max_chars,
        size = result.profile.name,
        version = result.version,
        color = escape_html(&result.color),
        level = result.error_correction.display_name(),
    )
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected { " selected" } else { "" }
}
