use crate::output::{print_json, print_table};
use anyhow::Result;
use logbook_core::Roadmap;
use serde::Serialize;

#[derive(Serialize)]
struct SourceInfo<'a> {
    name: &'a str,
    features_path: String,
    exists: bool,
}

pub fn run(roadmap: &Roadmap, json: bool) -> Result<()> {
    let infos: Vec<SourceInfo> = roadmap
        .sources()
        .iter()
        .map(|s| SourceInfo {
            name: &s.name,
            features_path: s.features_path.display().to_string(),
            exists: s.features_path.exists(),
        })
        .collect();

    if json {
        let mode = if roadmap.is_multi() { "multi" } else { "single" };
        return print_json(&serde_json::json!({ "mode": mode, "sources": infos }));
    }

    if infos.is_empty() {
        println!("No feature sources found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = infos
        .iter()
        .map(|i| {
            vec![
                i.name.to_string(),
                if i.exists { "yes" } else { "no" }.to_string(),
                i.features_path.clone(),
            ]
        })
        .collect();
    print_table(&["NAME", "EXISTS", "FEATURES FILE"], &rows);
    Ok(())
}
