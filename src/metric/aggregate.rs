use std::collections::{HashMap, HashSet};

use crate::data::CountryRecord;

/// Countries sharing a region, collapsed into one point
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAggregate {
    pub region: String,
    pub lat: f64,
    pub lng: f64,
    pub count: usize,
}

/// Running sums for one region
struct Accumulator<'a> {
    region: &'a str,
    total_lat: f64,
    total_lng: f64,
    members: usize,
    timezones: HashSet<&'a str>,
}

/// Group records that have a region and a coordinate pair, keeping
/// first-seen region order so equal counts sort predictably.
fn accumulate(records: &[CountryRecord]) -> Vec<Accumulator<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Accumulator<'_>> = Vec::new();

    for record in records {
        let (Some(region), Some((lat, lng))) = (record.region_name(), record.coordinates()) else {
            continue;
        };

        let slot = *index.entry(region).or_insert_with(|| {
            groups.push(Accumulator {
                region,
                total_lat: 0.0,
                total_lng: 0.0,
                members: 0,
                timezones: HashSet::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total_lat += lat;
        group.total_lng += lng;
        group.members += 1;
        if let Some(zones) = &record.timezones {
            group.timezones.extend(zones.iter().map(String::as_str));
        }
    }

    groups
}

fn finish<'a>(
    groups: Vec<Accumulator<'a>>,
    count: impl Fn(&Accumulator<'a>) -> usize,
) -> Vec<RegionAggregate> {
    let mut aggregates: Vec<RegionAggregate> = groups
        .iter()
        .filter_map(|g| {
            let n = count(g);
            (n > 0).then(|| RegionAggregate {
                region: g.region.to_string(),
                lat: g.total_lat / g.members as f64,
                lng: g.total_lng / g.members as f64,
                count: n,
            })
        })
        .collect();

    aggregates.sort_by(|a, b| b.count.cmp(&a.count));
    aggregates
}

/// Mean position and member count per region, largest first
pub fn by_region_count(records: &[CountryRecord]) -> Vec<RegionAggregate> {
    finish(accumulate(records), |g| g.members)
}

/// Mean position and number of distinct timezones per region, largest first.
/// Regions whose members list no timezones at all are left out.
pub fn by_region_timezones(records: &[CountryRecord]) -> Vec<RegionAggregate> {
    finish(accumulate(records), |g| g.timezones.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(region: &str, latlng: &[f64], timezones: &[&str]) -> CountryRecord {
        CountryRecord {
            name: format!("{region}-{}", latlng.first().copied().unwrap_or_default()),
            region: Some(region.to_string()),
            latlng: Some(latlng.to_vec()),
            timezones: Some(timezones.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_timezone_example() {
        let records = vec![
            country("X", &[10.0, 20.0], &["A", "B"]),
            country("X", &[30.0, 40.0], &["B", "C"]),
        ];
        let aggregates = by_region_timezones(&records);
        assert_eq!(
            aggregates,
            vec![RegionAggregate { region: "X".into(), lat: 20.0, lng: 30.0, count: 3 }]
        );
    }

    #[test]
    fn test_count_sorted_descending() {
        let records = vec![
            country("Oceania", &[-25.0, 135.0], &[]),
            country("Europe", &[50.0, 10.0], &[]),
            country("Europe", &[60.0, 20.0], &[]),
            country("Asia", &[30.0, 100.0], &[]),
            country("Europe", &[40.0, 0.0], &[]),
            country("Asia", &[20.0, 80.0], &[]),
        ];
        let aggregates = by_region_count(&records);
        let summary: Vec<_> = aggregates.iter().map(|a| (a.region.as_str(), a.count)).collect();
        assert_eq!(summary, vec![("Europe", 3), ("Asia", 2), ("Oceania", 1)]);
        assert_eq!(aggregates[0].lat, 50.0);
        assert_eq!(aggregates[0].lng, 10.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            country("B", &[0.0, 0.0], &[]),
            country("A", &[0.0, 0.0], &[]),
        ];
        let regions: Vec<_> = by_region_count(&records).into_iter().map(|a| a.region).collect();
        assert_eq!(regions, vec!["B", "A"]);
    }

    #[test]
    fn test_skips_records_without_region_or_coordinates() {
        let mut no_region = country("", &[1.0, 1.0], &["A"]);
        no_region.region = None;
        let records = vec![
            no_region,
            country("", &[1.0, 1.0], &["A"]),
            country("Americas", &[5.0], &["B"]),
            country("Americas", &[], &["C"]),
            country("Africa", &[1.0, 2.0], &["D"]),
        ];

        let counts = by_region_count(&records);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].region, "Africa");

        let total: usize = counts.iter().map(|a| a.count).sum();
        let eligible = records
            .iter()
            .filter(|r| r.region_name().is_some() && r.coordinates().is_some())
            .count();
        assert_eq!(total, eligible);
    }

    #[test]
    fn test_timezone_cardinality_bounded_by_entries() {
        let records = vec![
            country("Asia", &[0.0, 0.0], &["UTC+05:00", "UTC+06:00"]),
            country("Asia", &[0.0, 0.0], &["UTC+06:00", "UTC+06:00"]),
            country("Europe", &[0.0, 0.0], &["UTC+01:00"]),
            country("Europe", &[0.0, 0.0], &["UTC+02:00"]),
        ];
        let aggregates = by_region_timezones(&records);
        for aggregate in &aggregates {
            let entries: usize = records
                .iter()
                .filter(|r| r.region_name() == Some(aggregate.region.as_str()))
                .map(|r| r.timezones.as_ref().map_or(0, Vec::len))
                .sum();
            assert!(aggregate.count <= entries);
            let all_distinct = aggregate.region == "Europe";
            assert_eq!(aggregate.count == entries, all_distinct);
        }
    }

    #[test]
    fn test_region_without_timezones_is_dropped() {
        let mut silent = country("Antarctic", &[-75.0, 0.0], &[]);
        silent.timezones = None;
        let records = vec![silent, country("Europe", &[50.0, 10.0], &["UTC+01:00"])];

        let zones = by_region_timezones(&records);
        assert_eq!(zones.len(), 1);
        assert!(zones.iter().all(|a| a.count >= 1));
        assert_eq!(by_region_count(&records).len(), 2);
    }
}
