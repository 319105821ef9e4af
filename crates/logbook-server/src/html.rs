//! Server-rendered dashboard and error page.
//!
//! Both pages are self-contained: inline CSS, and a small script that polls
//! `/api/features` and reloads when the data changes.

use logbook_core::snapshot::Stats;
use logbook_core::{FeatureRecord, FeatureStatus, ProjectSource, Snapshot};
use std::fmt::Write as _;

const EM_DASH: &str = "\u{2014}";
const UNKNOWN_COLOR: &str = "#8b949e";

const STYLE: &str = r#"
  :root { --bg: #0d1117; --surface: #161b22; --border: #30363d; --text: #e6edf3; --dim: #8b949e; --accent: #58a6ff; }
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; background: var(--bg); color: var(--text); padding: 2rem; }
  h1 { font-size: 1.5rem; font-weight: 600; margin-bottom: 0.25rem; }
  .subtitle { color: var(--dim); font-size: 0.875rem; margin-bottom: 1.5rem; }
  .live-dot { display: inline-block; width: 8px; height: 8px; background: #10b981; border-radius: 50%; margin-right: 6px; animation: pulse 2s infinite; }
  @keyframes pulse { 0%,100% { opacity: 1; } 50% { opacity: 0.4; } }
  .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
  .stat-card { background: var(--surface); border: 1px solid var(--border); border-radius: 8px; padding: 1rem; }
  .stat-card .label { font-size: 0.75rem; color: var(--dim); text-transform: uppercase; letter-spacing: 0.05em; }
  .stat-card .value { font-size: 1.75rem; font-weight: 700; margin-top: 0.25rem; }
  .stat-detail { font-size: 0.7rem; color: var(--dim); margin-top: 0.25rem; }
  .progress-bar { width: 100%; height: 8px; background: var(--border); border-radius: 4px; margin-bottom: 2rem; overflow: hidden; }
  .progress-fill { height: 100%; border-radius: 4px; transition: width 0.5s ease; background: linear-gradient(90deg,#10b981,#34d399); }
  .filter-bar { margin-bottom: 1rem; display: flex; align-items: center; gap: 0.5rem; }
  .filter-label { font-size: 0.75rem; color: var(--dim); text-transform: uppercase; }
  .filter-btn { background: var(--surface); border: 1px solid var(--border); border-radius: 6px; color: var(--dim); padding: 4px 12px; font-size: 0.8rem; cursor: pointer; }
  .filter-btn:hover { border-color: var(--accent); color: var(--text); }
  .filter-btn.active { background: var(--accent); color: var(--bg); border-color: var(--accent); }
  table { width: 100%; border-collapse: collapse; background: var(--surface); border: 1px solid var(--border); border-radius: 8px; overflow: hidden; }
  thead { background: #1c2128; }
  th { text-align: left; padding: 0.75rem 1rem; font-size: 0.75rem; color: var(--dim); text-transform: uppercase; letter-spacing: 0.05em; border-bottom: 1px solid var(--border); }
  td { padding: 0.625rem 1rem; border-bottom: 1px solid var(--border); font-size: 0.875rem; }
  tr:last-child td { border-bottom: none; }
  tr:hover { background: #1c212855; }
  .id { font-family: monospace; color: var(--accent); white-space: nowrap; }
  .project { font-family: monospace; font-size: 0.8rem; color: var(--dim); }
  .title { font-weight: 500; }
  .pri { text-align: center; font-family: monospace; color: var(--dim); }
  .deps { font-family: monospace; font-size: 0.8rem; color: var(--dim); }
  .note { font-size: 0.8rem; color: var(--dim); max-width: 300px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
  .status-badge { display: inline-block; padding: 2px 8px; border-radius: 12px; font-size: 0.75rem; font-weight: 500; white-space: nowrap; }
  .empty { text-align: center; padding: 3rem; color: var(--dim); }
  .file-path { font-family: monospace; font-size: 0.75rem; color: var(--dim); }
"#;

/// Runs after `lastData` is declared with the snapshot the page was rendered
/// from, so an edit that lands before the first poll still reloads.
const POLL_SCRIPT: &str = r#"
  async function poll() {
    try {
      const res = await fetch("/api/snapshot");
      const text = await res.text();
      if (lastData && text !== lastData) { location.reload(); }
      lastData = text;
    } catch {}
  }
  poll();
  setInterval(poll, 2000);

  function filterProject(name, button) {
    document.querySelectorAll(".filter-btn").forEach(b => b.classList.remove("active"));
    button.classList.add("active");
    document.querySelectorAll("tbody tr").forEach(row => {
      if (name === "all") { row.style.display = ""; return; }
      const cell = row.querySelector(".project");
      row.style.display = cell && cell.textContent.trim() === name ? "" : "none";
    });
  }
"#;

const ERROR_STYLE: &str = r#"
  :root { --bg: #0d1117; --surface: #161b22; --border: #30363d; --text: #e6edf3; --dim: #8b949e; }
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; background: var(--bg); color: var(--text); padding: 2rem; display: flex; align-items: center; justify-content: center; min-height: 100vh; }
  .error-card { background: var(--surface); border: 1px solid #ef444450; border-radius: 8px; padding: 2rem; max-width: 640px; width: 100%; }
  h1 { font-size: 1.25rem; color: #ef4444; margin-bottom: 1rem; }
  .message { font-family: monospace; font-size: 0.875rem; color: var(--text); background: var(--bg); border: 1px solid var(--border); border-radius: 4px; padding: 1rem; white-space: pre-wrap; word-break: break-word; margin-bottom: 1.5rem; }
  .hint { font-size: 0.875rem; color: var(--dim); line-height: 1.5; }
  .hint code { background: var(--bg); padding: 2px 6px; border-radius: 3px; font-size: 0.8rem; }
"#;

const ERROR_SCRIPT: &str = r#"
  setInterval(() => fetch("/api/snapshot").then(r => { if (r.ok) location.reload(); }).catch(() => {}), 2000);
"#;

// ---------------------------------------------------------------------------
// Status presentation
// ---------------------------------------------------------------------------

fn status_icon(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::New => "\u{25cb}",
        FeatureStatus::InProgress => "\u{25d4}",
        FeatureStatus::Complete => "\u{25cf}",
        FeatureStatus::Blocked => "\u{25a0}",
    }
}

fn status_color(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::New => "#6b7280",
        FeatureStatus::InProgress => "#f59e0b",
        FeatureStatus::Complete => "#10b981",
        FeatureStatus::Blocked => "#ef4444",
    }
}

fn status_badge(feature: &FeatureRecord) -> String {
    let (color, icon, label) = match feature.status() {
        Some(status) => (status_color(status), status_icon(status), status.label().to_string()),
        None => (
            UNKNOWN_COLOR,
            "?",
            escape(feature.status_str().unwrap_or("unknown")),
        ),
    };
    format!(
        r#"<span class="status-badge" style="background:{color}15;color:{color};border:1px solid {color}30">{icon} {label}</span>"#
    )
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Render the full dashboard. Project columns, cards and filters only appear
/// when there is more than one source.
pub fn render_dashboard(snapshot: &Snapshot, sources: &[ProjectSource]) -> String {
    let multi = sources.len() > 1;
    let stats = &snapshot.stats;
    let title = if multi {
        "Workspace Roadmap"
    } else {
        "Logbook Roadmap"
    };

    let source_info = if multi {
        format!("{} projects", sources.len())
    } else {
        let path = sources
            .first()
            .map(|s| s.features_path.display().to_string())
            .unwrap_or_default();
        format!(r#"<span class="file-path">{}</span>"#, escape(&path))
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<h1>{title}</h1>
  <div class="subtitle"><span class="live-dot"></span>Live &middot; {source_info}</div>
  {cards}
"#,
        cards = summary_cards(stats),
    );

    if multi && !snapshot.per_project.is_empty() {
        body.push_str(r#"<div class="stats">"#);
        for entry in &snapshot.per_project {
            body.push_str(&project_card(&entry.project, &entry.stats));
        }
        body.push_str("</div>\n");
    }

    let _ = write!(
        body,
        r#"<div class="progress-bar"><div class="progress-fill" style="width:{pct}%"></div></div>
"#,
        pct = stats.completion_pct,
    );

    if multi {
        body.push_str(&filter_bar(sources));
    }

    if stats.total > 0 {
        body.push_str(&feature_table(&snapshot.features, multi));
    } else {
        body.push_str(
            r#"<div class="empty">No features tracked yet. Run <code>/logbook:init</code> and <code>/logbook:backlog</code> to get started.</div>"#,
        );
    }

    let script = format!(
        "\n  let lastData = {};{}",
        js_string(&snapshot_text(snapshot)),
        POLL_SCRIPT
    );
    page(title, STYLE, &body, &script)
}

/// The exact body `GET /api/snapshot` returns for `snapshot`.
fn snapshot_text(snapshot: &Snapshot) -> String {
    serde_json::to_string(snapshot).unwrap_or_default()
}

/// Quote `text` as a JavaScript string literal that is safe inside `<script>`.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn summary_cards(stats: &Stats) -> String {
    let by = &stats.by_status;
    let cards = [
        ("Total", stats.total.to_string(), None),
        ("Complete", by.complete.to_string(), Some(FeatureStatus::Complete)),
        ("In Progress", by.in_progress.to_string(), Some(FeatureStatus::InProgress)),
        ("Blocked", by.blocked.to_string(), Some(FeatureStatus::Blocked)),
        ("New", by.new.to_string(), Some(FeatureStatus::New)),
        ("Progress", format!("{}%", stats.completion_pct), None),
    ];

    let mut out = String::from(r#"<div class="stats">"#);
    for (label, value, status) in cards {
        let style = status
            .map(|s| format!(r#" style="color:{}""#, status_color(s)))
            .unwrap_or_default();
        let _ = write!(
            out,
            r#"<div class="stat-card"><div class="label">{label}</div><div class="value"{style}>{value}</div></div>"#
        );
    }
    out.push_str("</div>");
    out
}

fn project_card(name: &str, stats: &Stats) -> String {
    let by = &stats.by_status;
    format!(
        r#"<div class="stat-card"><div class="label">{name}</div><div class="value">{pct}%</div><div class="stat-detail">{done}/{total} done &middot; {active} active &middot; {blocked} blocked</div></div>"#,
        name = escape(name),
        pct = stats.completion_pct,
        done = by.complete,
        total = stats.total,
        active = by.in_progress,
        blocked = by.blocked,
    )
}

fn filter_bar(sources: &[ProjectSource]) -> String {
    let mut out = String::from(
        r#"<div class="filter-bar"><span class="filter-label">Filter:</span><button class="filter-btn active" onclick="filterProject('all', this)">All</button>"#,
    );
    for source in sources {
        let name = escape(&source.name);
        let _ = write!(
            out,
            r#"<button class="filter-btn" data-project="{name}" onclick="filterProject(this.dataset.project, this)">{name}</button>"#
        );
    }
    out.push_str("</div>\n");
    out
}

fn feature_table(features: &[FeatureRecord], multi: bool) -> String {
    let mut out = String::from("<table>\n<thead><tr><th>ID</th>");
    if multi {
        out.push_str("<th>Project</th>");
    }
    out.push_str("<th>Status</th><th>Title</th><th>Pri</th><th>Deps</th><th>Last Note</th></tr></thead>\n<tbody>\n");

    for feature in features {
        let deps = feature.dependencies().join(", ");
        let deps = if deps.is_empty() { EM_DASH.to_string() } else { deps };
        let note = feature.last_note().unwrap_or_else(|| EM_DASH.to_string());
        let priority = feature
            .priority()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());

        out.push_str("<tr>");
        let _ = write!(
            out,
            r#"<td class="id">{}</td>"#,
            escape(&feature.id().unwrap_or_default())
        );
        if multi {
            let _ = write!(
                out,
                r#"<td class="project">{}</td>"#,
                escape(feature.project().unwrap_or_default())
            );
        }
        let _ = write!(
            out,
            r#"<td>{badge}</td><td class="title">{title}</td><td class="pri">P{priority}</td><td class="deps">{deps}</td><td class="note">{note}</td>"#,
            badge = status_badge(feature),
            title = escape(&feature.title().unwrap_or_default()),
            deps = escape(&deps),
            note = escape(&note),
        );
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}

// ---------------------------------------------------------------------------
// Error page
// ---------------------------------------------------------------------------

pub fn render_error_page(message: &str) -> String {
    let body = format!(
        r#"<div class="error-card">
    <h1>Failed to load features</h1>
    <div class="message">{message}</div>
    <div class="hint">
      Expected format: a JSON array of feature objects, e.g.<br>
      <code>[{{ "id": "F001", "title": "...", "status": "new", ... }}]</code><br><br>
      Fix the file and this page will auto-reload.
    </div>
  </div>"#,
        message = escape(message),
    );
    page("Logbook \u{2014} Error", ERROR_STYLE, &body, ERROR_SCRIPT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn page(title: &str, style: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
  {body}
  <script>{script}</script>
</body>
</html>
"#
    )
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
