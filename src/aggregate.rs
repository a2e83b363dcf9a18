//! Grouping of run records per map and per `(scenario, agent count)` key.

use crate::record::{RunRecord, Value};
use crate::Result;
use indexmap::IndexMap;

/// How a configured map name is matched against the `map_name` field of a
/// record. The harness writes full asset paths (e.g.
/// `assets/room-64-64-8.map`), so [MatchPolicy::Substring] is the default;
/// [MatchPolicy::Exact] avoids merging maps whose names share a prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    #[default]
    Substring,
    Exact,
}

impl MatchPolicy {
    pub fn matches(&self, map: &str, record_map_name: &str) -> bool {
        match self {
            MatchPolicy::Substring => record_map_name.contains(map),
            MatchPolicy::Exact => record_map_name == map,
        }
    }
}

/// Grouping key within one map. The scenario is kept as the raw cell
/// [Value] since harnesses write either an index or a file name there.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub scen: Value,
    pub num_agents: i64,
}

/// Map name -> key -> record. Both levels keep insertion order, so iteration
/// follows the configured map list and the result file respectively.
pub type GroupedResults = IndexMap<String, IndexMap<GroupKey, RunRecord>>;

/// Groups records under each configured map. A record lands in every map
/// bucket whose name it matches under `policy`. Key collisions within a map
/// are resolved last-write-wins: a later row for the same
/// `(scen, num_agents)` pair replaces the earlier one.
pub fn group_by_map(
    records: &[RunRecord],
    maps: &[String],
    policy: MatchPolicy,
) -> Result<GroupedResults> {
    let mut grouped = GroupedResults::new();
    for map in maps {
        let mut per_map: IndexMap<GroupKey, RunRecord> = IndexMap::new();
        for record in records {
            if policy.matches(map, record.map_name()?) {
                let key = GroupKey {
                    scen: record.scen()?.clone(),
                    num_agents: record.num_agents()?,
                };
                per_map.insert(key, record.clone());
            }
        }
        grouped.insert(map.clone(), per_map);
    }
    Ok(grouped)
}

/// Entries of one map's group, sorted ascending by agent count. The sort is
/// stable: equal counts keep their insertion order.
pub fn sorted_by_agents(
    group: &IndexMap<GroupKey, RunRecord>,
) -> Vec<(&GroupKey, &RunRecord)> {
    let mut entries: Vec<(&GroupKey, &RunRecord)> = group.iter().collect();
    entries.sort_by_key(|(key, _)| key.num_agents);
    entries
}

/// Congestion percentage of `num_agents` agents on a map with
/// `num_open_vertices` traversable vertices, rounded to two decimals.
pub fn congestion_pct(num_agents: i64, num_open_vertices: i64) -> f64 {
    let pct = 100.0 * num_agents as f64 / num_open_vertices as f64;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize_rows;

    const HEADER: [&str; 5] = ["map_name", "scen", "num_agents", "solved", "soc"];

    fn records(rows: &[[&str; 5]]) -> Vec<RunRecord> {
        let header: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        normalize_rows(&header, &rows)
    }

    fn maps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn substring_policy_matches_asset_paths() {
        let recs = records(&[
            ["assets/room-64-64-8.map", "1", "10", "1", "5"],
            ["assets/random-32-32-20.map", "1", "10", "1", "7"],
        ]);
        let grouped =
            group_by_map(&recs, &maps(&["room-64-64-8"]), MatchPolicy::Substring).unwrap();
        assert_eq!(grouped["room-64-64-8"].len(), 1);
    }

    #[test]
    fn exact_policy_rejects_prefix_collisions() {
        let recs = records(&[
            ["room-64", "1", "10", "1", "5"],
            ["room-64-64-8", "1", "10", "1", "7"],
        ]);
        let grouped = group_by_map(&recs, &maps(&["room-64"]), MatchPolicy::Exact).unwrap();
        assert_eq!(grouped["room-64"].len(), 1);
        assert_eq!(grouped["room-64"].values().next().unwrap().int("soc").unwrap(), 5);

        // The substring policy would have merged both rows under room-64.
        let merged =
            group_by_map(&recs, &maps(&["room-64"]), MatchPolicy::Substring).unwrap();
        assert_eq!(merged["room-64"].len(), 2);
    }

    #[test]
    fn duplicate_keys_resolve_last_write_wins() {
        let recs = records(&[
            ["mapA", "s1", "10", "1", "1"],
            ["mapA", "s1", "10", "1", "2"],
        ]);
        let grouped = group_by_map(&recs, &maps(&["mapA"]), MatchPolicy::Substring).unwrap();
        let group = &grouped["mapA"];
        assert_eq!(group.len(), 1);
        assert_eq!(group.values().next().unwrap().int("soc").unwrap(), 2);
    }

    #[test]
    fn sort_by_agents_is_stable() {
        let recs = records(&[
            ["mapA", "s2", "20", "1", "1"],
            ["mapA", "s1", "10", "1", "2"],
            ["mapA", "s2", "10", "1", "3"],
            ["mapA", "s1", "20", "1", "4"],
        ]);
        let grouped = group_by_map(&recs, &maps(&["mapA"]), MatchPolicy::Substring).unwrap();
        let sorted = sorted_by_agents(&grouped["mapA"]);
        let order: Vec<(i64, Value)> = sorted
            .iter()
            .map(|(k, _)| (k.num_agents, k.scen.clone()))
            .collect();
        let scen = |s: &str| Value::Text(s.to_owned());
        // Within each agent count, the file order is kept: s1 before s2 for
        // n=10, s2 before s1 for n=20.
        assert_eq!(
            order,
            vec![
                (10, scen("s1")),
                (10, scen("s2")),
                (20, scen("s2")),
                (20, scen("s1")),
            ]
        );
    }

    #[test]
    fn congestion_rounds_to_two_decimals() {
        assert_eq!(congestion_pct(10, 300), 3.33);
        assert_eq!(congestion_pct(1, 3), 33.33);
        assert_eq!(congestion_pct(50, 200), 25.0);
        assert_eq!(congestion_pct(2, 3), 66.67);
    }
}
