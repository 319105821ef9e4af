use crate::feature::FeatureRecord;
use crate::locator::ProjectSource;
use crate::types::FeatureStatus;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// StatusCounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub in_progress: usize,
    pub complete: usize,
    pub blocked: usize,
}

impl StatusCounts {
    pub fn get(&self, status: FeatureStatus) -> usize {
        match status {
            FeatureStatus::New => self.new,
            FeatureStatus::InProgress => self.in_progress,
            FeatureStatus::Complete => self.complete,
            FeatureStatus::Blocked => self.blocked,
        }
    }

    pub fn sum(&self) -> usize {
        self.new + self.in_progress + self.complete + self.blocked
    }

    fn bump(&mut self, status: FeatureStatus) {
        match status {
            FeatureStatus::New => self.new += 1,
            FeatureStatus::InProgress => self.in_progress += 1,
            FeatureStatus::Complete => self.complete += 1,
            FeatureStatus::Blocked => self.blocked += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counts over one set of records.
///
/// `unrecognized` holds records whose status is missing or outside the four
/// canonical values, so `by_status.sum() + unrecognized == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub unrecognized: usize,
    pub completion_pct: u32,
}

impl Stats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FeatureRecord>) -> Self {
        let mut stats = Stats::default();
        for record in records {
            stats.add(record);
        }
        stats
    }

    fn add(&mut self, record: &FeatureRecord) {
        self.total += 1;
        match record.status() {
            Some(status) => self.by_status.bump(status),
            None => self.unrecognized += 1,
        }
        self.completion_pct = completion_pct(self.by_status.complete, self.total);
    }
}

/// `round(100 * complete / total)`, rounding halves up; 0 for an empty set.
pub fn completion_pct(complete: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * complete + total) / (2 * total)) as u32
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    pub project: String,
    #[serde(flatten)]
    pub stats: Stats,
}

/// Everything the dashboard shows, computed from one read of every source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub stats: Stats,
    /// Per-source stats keyed by project name, in order of first appearance.
    #[serde(serialize_with = "per_project_as_map")]
    pub per_project: Vec<ProjectStats>,
    /// All records, sorted by effective priority.
    pub features: Vec<FeatureRecord>,
}

impl Snapshot {
    /// Aggregate records already tagged by [`combine`]. Pure and infallible:
    /// malformed records are counted under `unrecognized`, never rejected.
    pub fn from_features(mut features: Vec<FeatureRecord>) -> Self {
        let stats = Stats::from_records(&features);

        let mut per_project: Vec<ProjectStats> = Vec::new();
        for record in &features {
            let Some(project) = record.project() else {
                continue;
            };
            match per_project.iter_mut().find(|p| p.project == project) {
                Some(entry) => entry.stats.add(record),
                None => {
                    let mut stats = Stats::default();
                    stats.add(record);
                    per_project.push(ProjectStats {
                        project: project.to_string(),
                        stats,
                    });
                }
            }
        }

        // Stable: equal priorities keep their combined order.
        features.sort_by_key(FeatureRecord::effective_priority);

        Self {
            stats,
            per_project,
            features,
        }
    }

    pub fn project(&self, name: &str) -> Option<&Stats> {
        self.per_project
            .iter()
            .find(|p| p.project == name)
            .map(|p| &p.stats)
    }
}

/// Tag every record with its source name and flatten in source order.
pub fn combine<'a>(
    batches: impl IntoIterator<Item = (&'a ProjectSource, Vec<FeatureRecord>)>,
) -> Vec<FeatureRecord> {
    let mut combined = Vec::new();
    for (source, records) in batches {
        combined.extend(records.into_iter().map(|mut record| {
            record.tag_project(&source.name);
            record
        }));
    }
    combined
}

fn per_project_as_map<S: Serializer>(
    per_project: &[ProjectStats],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(per_project.len()))?;
    for entry in per_project {
        map.serialize_entry(&entry.project, &entry.stats)?;
    }
    map.end()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(values: Value) -> Vec<FeatureRecord> {
        match values {
            Value::Array(items) => items.into_iter().map(FeatureRecord::from_value).collect(),
            _ => panic!("expected array"),
        }
    }

    fn ids(snapshot: &Snapshot) -> Vec<String> {
        snapshot.features.iter().filter_map(|f| f.id()).collect()
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let snap = Snapshot::from_features(Vec::new());
        assert_eq!(snap.stats, Stats::default());
        assert_eq!(snap.stats.completion_pct, 0);
        assert!(snap.features.is_empty());
        assert!(snap.per_project.is_empty());
    }

    #[test]
    fn completion_pct_rounds() {
        assert_eq!(completion_pct(0, 0), 0);
        assert_eq!(completion_pct(3, 7), 43);
        assert_eq!(completion_pct(1, 8), 13);
        assert_eq!(completion_pct(2, 3), 67);
        assert_eq!(completion_pct(1, 3), 33);
        assert_eq!(completion_pct(4, 4), 100);
    }

    #[test]
    fn unrecognized_statuses_are_not_bucketed() {
        let snap = Snapshot::from_features(records(json!([
            {"status": "new"},
            {"status": "done"},
            {"status": "complete"},
            {},
            {"status": 3},
        ])));
        assert_eq!(snap.stats.total, 5);
        assert_eq!(snap.stats.by_status.sum(), 2);
        assert_eq!(snap.stats.unrecognized, 3);
        assert_eq!(snap.stats.completion_pct, 20);
        // They still appear in the ordered list.
        assert_eq!(snap.features.len(), 5);
    }

    #[test]
    fn bucket_sum_equals_total_when_all_canonical() {
        let snap = Snapshot::from_features(records(json!([
            {"status": "new"},
            {"status": "in_progress"},
            {"status": "complete"},
            {"status": "blocked"},
            {"status": "complete"},
            {"status": "complete"},
            {"status": "new"},
        ])));
        assert_eq!(snap.stats.by_status.sum(), snap.stats.total);
        assert_eq!(snap.stats.by_status.get(FeatureStatus::Complete), 3);
        assert_eq!(snap.stats.completion_pct, 43);
    }

    #[test]
    fn features_sorted_by_priority_stably() {
        let snap = Snapshot::from_features(records(json!([
            {"id": "a"},
            {"id": "b", "priority": 2},
            {"id": "c", "priority": 1},
            {"id": "d", "priority": 2},
            {"id": "e", "priority": 99},
            {"id": "f", "priority": 100},
            {"id": "g", "priority": 0},
            {"id": "h", "priority": 1.0},
        ])));
        // a, e and g all sort as 99 and keep their order; 1.0 ranks as 1.
        assert_eq!(ids(&snap), vec!["c", "h", "b", "d", "a", "e", "g", "f"]);
    }

    #[test]
    fn combine_tags_and_preserves_order() {
        let alpha = ProjectSource::new("alpha", "/a.json");
        let beta = ProjectSource::new("beta", "/b.json");
        let combined = combine(vec![
            (&alpha, records(json!([{"id": "a1"}, {"id": "a2"}]))),
            (&beta, records(json!([{"id": "b1"}]))),
        ]);
        let tagged: Vec<(String, &str)> = combined
            .iter()
            .map(|f| (f.id().unwrap(), f.project().unwrap()))
            .collect();
        assert_eq!(
            tagged,
            vec![
                ("a1".to_string(), "alpha"),
                ("a2".to_string(), "alpha"),
                ("b1".to_string(), "beta"),
            ]
        );
    }

    #[test]
    fn per_project_stats_partition_records() {
        let alpha = ProjectSource::new("alpha", "/a.json");
        let beta = ProjectSource::new("beta", "/b.json");
        let combined = combine(vec![
            (
                &alpha,
                records(json!([
                    {"status": "complete"},
                    {"status": "complete"},
                    {"status": "blocked"},
                ])),
            ),
            (&beta, records(json!([{"status": "new"}]))),
        ]);
        let snap = Snapshot::from_features(combined);

        assert_eq!(snap.stats.total, 4);
        assert_eq!(
            snap.stats.by_status,
            StatusCounts {
                new: 1,
                in_progress: 0,
                complete: 2,
                blocked: 1
            }
        );
        assert_eq!(snap.stats.completion_pct, 50);
        assert_eq!(snap.project("alpha").unwrap().total, 3);
        assert_eq!(snap.project("alpha").unwrap().completion_pct, 67);
        assert_eq!(snap.project("beta").unwrap().total, 1);
        assert!(snap.project("gamma").is_none());
    }

    #[test]
    fn serializes_per_project_as_ordered_map() {
        let zeta = ProjectSource::new("zeta", "/z.json");
        let alpha = ProjectSource::new("alpha", "/a.json");
        let snap = Snapshot::from_features(combine(vec![
            (&zeta, records(json!([{"status": "new", "priority": 5}]))),
            (&alpha, records(json!([{"status": "complete", "priority": 1}]))),
        ]));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["completion_pct"], 50);
        assert_eq!(json["by_status"]["complete"], 1);
        assert_eq!(json["per_project"]["zeta"]["total"], 1);
        assert_eq!(json["per_project"]["alpha"]["by_status"]["complete"], 1);
        assert_eq!(json["features"][0]["_project"], "alpha");

        let text = serde_json::to_string(&snap).unwrap();
        assert!(text.find("\"zeta\"").unwrap() < text.find("\"alpha\"").unwrap());
    }
}
