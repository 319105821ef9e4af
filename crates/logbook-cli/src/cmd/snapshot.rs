use crate::output::{print_json, print_table, truncate};
use anyhow::Result;
use logbook_core::{FeatureRecord, FeatureStatus, Roadmap, Snapshot};

const TITLE_WIDTH: usize = 48;

pub fn run(roadmap: &Roadmap, json: bool) -> Result<()> {
    let snap = roadmap.snapshot()?;

    if json {
        return print_json(&snap);
    }

    print_summary(&snap);

    if snap.features.is_empty() {
        println!();
        println!("No features tracked yet.");
        return Ok(());
    }

    let multi = roadmap.is_multi();
    println!();
    if multi {
        let rows: Vec<Vec<String>> = snap
            .per_project
            .iter()
            .map(|p| {
                vec![
                    p.project.clone(),
                    p.stats.total.to_string(),
                    p.stats.by_status.complete.to_string(),
                    format!("{}%", p.stats.completion_pct),
                ]
            })
            .collect();
        print_table(&["PROJECT", "TOTAL", "DONE", "PROGRESS"], &rows);
        println!();
    }

    let rows: Vec<Vec<String>> = snap
        .features
        .iter()
        .map(|f| feature_row(f, multi))
        .collect();
    let headers: &[&str] = if multi {
        &["PRI", "ID", "PROJECT", "TITLE", "STATUS", "DEPENDS ON"]
    } else {
        &["PRI", "ID", "TITLE", "STATUS", "DEPENDS ON"]
    };
    print_table(headers, &rows);

    Ok(())
}

fn print_summary(snap: &Snapshot) {
    let stats = &snap.stats;
    println!(
        "Features: {}  ({}% complete)",
        stats.total, stats.completion_pct
    );
    let parts: Vec<String> = FeatureStatus::all()
        .iter()
        .map(|s| format!("{}: {}", s.label(), stats.by_status.get(*s)))
        .collect();
    println!("  {}", parts.join("  "));
    if stats.unrecognized > 0 {
        println!("  Unrecognized status: {}", stats.unrecognized);
    }
}

fn feature_row(f: &FeatureRecord, multi: bool) -> Vec<String> {
    let dash = || "-".to_string();
    let priority = f
        .priority()
        .map(|p| format!("P{p}"))
        .unwrap_or_else(|| "P?".to_string());
    let status = match f.status() {
        Some(s) => s.label().to_string(),
        None => f.status_str().map(str::to_string).unwrap_or_else(dash),
    };
    let deps = f.dependencies();

    let mut row = vec![priority, f.id().unwrap_or_else(dash)];
    if multi {
        row.push(f.project().map(str::to_string).unwrap_or_else(dash));
    }
    row.push(
        f.title()
            .map(|t| truncate(&t, TITLE_WIDTH))
            .unwrap_or_else(dash),
    );
    row.push(status);
    row.push(if deps.is_empty() { dash() } else { deps.join(", ") });
    row
}
