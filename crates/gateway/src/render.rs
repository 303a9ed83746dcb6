//! Server-side HTML rendering.
//!
//! Every page shares one layout: the live banner, the sidebar with the seven
//! sections, the section body and the footer. All dynamic text goes through
//! [`escape`].

use chrono::NaiveDate;
use parkguide_catalog::{Block, FOOTER, Page, PageKey, SITE_CAPTION, SITE_TITLE};
use parkguide_config::{CredentialReport, SecretStoreStatus};
use parkguide_core::ParkInfo;
use std::fmt::Write;

/// Inputs shared by every page.
pub struct PageContext<'a> {
    pub active: PageKey,
    pub info: &'a ParkInfo,
    pub date: NaiveDate,
}

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape `text`, then turn `**bold**` spans into `<strong>`.
fn rich(text: &str) -> String {
    let escaped = escape(text);
    let mut out = String::with_capacity(escaped.len());
    for (i, part) in escaped.split("**").enumerate() {
        if i % 2 == 1 {
            let _ = write!(out, "<strong>{part}</strong>");
        } else {
            out.push_str(part);
        }
    }
    out
}

/// The banner line, e.g. `Today (Oct 18, 2026): 9:00 AM – 9:00 PM | Fireworks: …`.
pub fn banner_text(info: &ParkInfo, date: NaiveDate) -> String {
    format!(
        "Today ({}): {} | Fireworks: {}",
        date.format("%b %d, %Y"),
        info.hours,
        info.fireworks
    )
}

fn banner(info: &ParkInfo, date: NaiveDate) -> String {
    format!(
        r#"<div class="banner" data-origin="{origin}">🏰 {line}<br><small>{notes}</small></div>"#,
        origin = if info.is_fallback() { "fallback" } else { "live" },
        line = escape(&banner_text(info, date)),
        notes = escape(&info.notes),
    )
}

fn sidebar(active: PageKey) -> String {
    let mut out = String::from(r#"<nav class="sidebar"><h2>Quick Navigation</h2><ul>"#);
    for key in PageKey::ALL {
        let class = if key == active { r#" class="active""# } else { "" };
        let _ = write!(
            out,
            r#"<li{class}><a href="/pages/{slug}">{title}</a></li>"#,
            slug = key.slug(),
            title = escape(key.title()),
        );
    }
    out.push_str("</ul></nav>");
    out
}

/// Wrap a section body in the shared layout.
pub fn layout(ctx: &PageContext<'_>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{site} · {section}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
{banner}
<div class="layout">
{sidebar}
<main>
<h1>{site}</h1>
<p class="caption">{caption}</p>
{body}
</main>
</div>
<footer><hr><p>{footer}</p></footer>
<script src="/static/app.js"></script>
</body>
</html>
"#,
        site = escape(SITE_TITLE),
        section = escape(ctx.active.title()),
        banner = banner(ctx.info, ctx.date),
        sidebar = sidebar(ctx.active),
        caption = escape(SITE_CAPTION),
        footer = escape(FOOTER),
    )
}

/// Body of a static catalog page.
pub fn static_page(page: &Page, info: &ParkInfo) -> String {
    let mut out = format!("<h2>{}</h2>", escape(page.title));
    for block in page.blocks {
        render_block(&mut out, block, info);
    }
    out
}

fn render_block(out: &mut String, block: &Block, info: &ParkInfo) {
    match block {
        Block::Heading { text } => {
            let _ = write!(out, "<h3>{}</h3>", rich(text));
        }
        Block::Text { text } => {
            let _ = write!(out, "<p>{}</p>", rich(text));
        }
        Block::Bullets { items } => {
            out.push_str("<ul>");
            for item in *items {
                let _ = write!(out, "<li>{}</li>", rich(item));
            }
            out.push_str("</ul>");
        }
        Block::Columns { columns } => {
            out.push_str(r#"<div class="columns">"#);
            for column in *columns {
                let _ = write!(out, r#"<div class="column"><h3>{}</h3>"#, rich(column.heading));
                for inner in column.blocks {
                    render_block(out, inner, info);
                }
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
        Block::Tabs { tabs } => {
            out.push_str(r#"<div class="tabs">"#);
            for (i, tab) in tabs.iter().enumerate() {
                let _ = write!(
                    out,
                    r#"<details class="tab" id="land-{slug}"{open}><summary>{land}</summary><p><strong>{title}</strong> - {text}</p></details>"#,
                    slug = tab.land.slug(),
                    open = if i == 0 { " open" } else { "" },
                    land = escape(tab.land.title()),
                    title = escape(tab.title),
                    text = rich(tab.text),
                );
            }
            out.push_str("</div>");
        }
        Block::Callout { text } => {
            let _ = write!(out, r#"<div class="callout">{}</div>"#, rich(text));
        }
        Block::LiveHours { label } => {
            let _ = write!(
                out,
                r#"<p class="live-hours"><strong>{}:</strong> {}</p>"#,
                escape(label),
                escape(&info.hours)
            );
        }
    }
}

/// Body of the assistant section.
pub fn assistant_page(title: &str, report: &CredentialReport) -> String {
    if report.is_available() {
        return format!(
            r#"<h2>🤖 {title}</h2>
<div id="chat" class="chat" data-sessions="/api/assistant/sessions">
<div id="chat-log" class="chat-log"></div>
<p id="chat-error" class="chat-error" hidden></p>
<form id="chat-form" class="chat-form">
<input id="chat-input" name="question" autocomplete="off" placeholder="Ask anything about Shanghai Disney...">
<button type="submit">Send</button>
</form>
</div>"#,
            title = escape(title)
        );
    }

    let mut out = format!(
        r#"<h2>🤖 {}</h2><div class="error">AI Assistant is currently unavailable. Please check your API key configuration.</div>"#,
        escape(title)
    );
    out.push_str(r#"<details class="diagnostics"><summary>Debug Information</summary><ul>"#);
    let _ = write!(
        out,
        "<li><strong>Environment Variable ({var}):</strong> {state}</li>",
        var = parkguide_config::API_KEY_VAR,
        state = if report.env_set { "✅ Set" } else { "❌ Not set" },
    );
    let _ = write!(
        out,
        "<li><strong>Secret store ({var}):</strong> {state}</li>",
        var = parkguide_config::API_KEY_VAR,
        state = escape(&secret_store_line(&report.secret_store)),
    );
    out.push_str("</ul></details>");
    let _ = write!(
        out,
        r#"<div class="callout">💡 <strong>Setup Required:</strong> Get a Gemini API key from Google AI Studio and set it as <code>{var}</code> in the environment or in the secret store file.</div>"#,
        var = parkguide_config::API_KEY_VAR,
    );
    out
}

/// One-line description of the secret store lookup.
pub fn secret_store_line(status: &SecretStoreStatus) -> String {
    match status {
        SecretStoreStatus::Available { path } => format!("✅ Available ({})", path.display()),
        SecretStoreStatus::Missing { path } => format!("❌ No file at {}", path.display()),
        SecretStoreStatus::NoKey { path } => format!("❌ No key in {}", path.display()),
        SecretStoreStatus::Error { path, reason } => {
            format!("❌ Error reading {}: {reason}", path.display())
        }
    }
}
