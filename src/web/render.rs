//! HTML building blocks shared by the pages.

use crate::flash::Flash;
use crate::forms::FieldErrors;
use crate::pagination::Page;

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; max-width: 1100px; margin: 0 auto; padding: 20px; color: #222; }
nav a { margin-right: 16px; }
h1 { color: #333; }
table { border-collapse: collapse; width: 100%; margin-top: 16px; }
th, td { border-bottom: 1px solid #ddd; padding: 6px 8px; text-align: left; vertical-align: top; }
label { display: block; margin-top: 10px; font-weight: bold; }
input, select, textarea { padding: 6px; margin-top: 4px; box-sizing: border-box; }
.field input[type="text"], .field input[type="email"], .field textarea { width: 100%; }
.filters { display: flex; flex-wrap: wrap; gap: 8px; align-items: flex-end; }
.filters label { margin-top: 0; }
.flash { padding: 10px; margin: 12px 0; border-left: 4px solid; }
.flash.success { background: #e8f6ec; border-color: #28a745; }
.flash.error { background: #fdecea; border-color: #dc3545; }
ul.errors { color: #dc3545; margin: 4px 0; padding-left: 18px; }
button { padding: 8px 16px; background-color: #007bff; color: white; border: none; cursor: pointer; }
button.danger { background-color: #dc3545; }
.pagination { margin-top: 16px; }
.muted { color: #666; }
"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<div class="flash {}">{}</div>"#,
                f.css_class(),
                html_escape(&f.text)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title} - Placement Desk</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>
        <a href="/trainers">Trainers</a>
        <a href="/companies">Companies</a>
        <a href="/interviews">Interviews</a>
        <a href="/courses">Courses</a>
        <a href="/students">Students</a>
    </nav>
    {flash_html}
    <h1>{title}</h1>
    {body}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn field_errors(errors: &FieldErrors, field: &str) -> String {
    let messages = errors.get(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", html_escape(m)))
        .collect();
    format!(r#"<ul class="errors">{items}</ul>"#)
}

/// Banner listing every field that failed, shown above a rejected form.
pub fn error_summary(errors: &FieldErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|(field, messages)| {
            format!(
                "<li>{}: {}</li>",
                html_escape(&field.replace('_', " ")),
                html_escape(&messages.join(" "))
            )
        })
        .collect();
    format!(
        r#"<div class="flash error">Please correct the errors below.<ul class="errors">{items}</ul></div>"#
    )
}

/// A labelled form row wrapping an already-rendered input.
pub fn field(label: &str, name: &str, input: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label>{input}{errs}</div>"#,
        name = html_escape(name),
        label = html_escape(label),
        errs = field_errors(errors, name),
    )
}

pub fn text_input(name: &str, value: &str, kind: &str) -> String {
    format!(
        r#"<input type="{kind}" id="{name}" name="{name}" value="{value}">"#,
        name = html_escape(name),
        value = html_escape(value),
    )
}

pub fn textarea(name: &str, value: &str) -> String {
    format!(
        r#"<textarea id="{name}" name="{name}" rows="3">{value}</textarea>"#,
        name = html_escape(name),
        value = html_escape(value),
    )
}

/// Single select; `blank` adds a leading empty option with that text.
pub fn select(
    name: &str,
    options: &[(String, String)],
    selected: &str,
    blank: Option<&str>,
) -> String {
    let mut html = format!(
        r#"<select id="{name}" name="{name}">"#,
        name = html_escape(name)
    );
    if let Some(blank) = blank {
        html.push_str(&format!(r#"<option value="">{}</option>"#, html_escape(blank)));
    }
    for (value, label) in options {
        html.push_str(&option(value, label, value == selected));
    }
    html.push_str("</select>");
    html
}

pub fn multi_select(name: &str, options: &[(String, String)], selected: &[String]) -> String {
    let mut html = format!(
        r#"<select id="{name}" name="{name}" multiple size="6">"#,
        name = html_escape(name)
    );
    for (value, label) in options {
        html.push_str(&option(value, label, selected.contains(value)));
    }
    html.push_str("</select>");
    html
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        html_escape(value),
        if selected { " selected" } else { "" },
        html_escape(label)
    )
}

/// `Choice::options()` with owned labels, as `select` expects.
pub fn owned(options: Vec<(String, &'static str)>) -> Vec<(String, String)> {
    options
        .into_iter()
        .map(|(value, label)| (value, label.to_string()))
        .collect()
}

/// Previous/next links that keep `query` (the filters, without `page`).
pub fn pagination_nav<T>(page: &Page<T>, query: &str) -> String {
    let link = |number: u64, text: &str| {
        let href = if query.is_empty() {
            format!("?page={number}")
        } else {
            format!("?{query}&page={number}")
        };
        format!(r#"<a href="{}">{}</a>"#, html_escape(&href), text)
    };

    let mut parts = Vec::new();
    if page.has_previous() {
        parts.push(link(1, "&laquo; first"));
        parts.push(link(page.number - 1, "previous"));
    }
    parts.push(format!(
        r#"<span class="muted">Page {} of {} ({} records)</span>"#,
        page.number, page.num_pages, page.total
    ));
    if page.has_next() {
        parts.push(link(page.number + 1, "next"));
        parts.push(link(page.num_pages, "last &raquo;"));
    }
    format!(r#"<div class="pagination">{}</div>"#, parts.join(" "))
}

/// Confirmation page body for a delete.
pub fn confirm_delete(what: &str, action: &str, cancel: &str) -> String {
    format!(
        r#"<p>Are you sure you want to delete {what}?</p>
<form method="POST" action="{action}">
    <button type="submit" class="danger">Yes, delete</button>
    <a href="{cancel}">Cancel</a>
</form>"#,
        what = html_escape(what),
        action = html_escape(action),
        cancel = html_escape(cancel),
    )
}
