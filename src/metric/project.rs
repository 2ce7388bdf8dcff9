use serde::Serialize;
use std::cmp::Ordering;

use super::aggregate::{by_region_count, by_region_timezones, RegionAggregate};
use super::path::FieldPath;
use super::scale::scale;
use super::{Metric, MetricKind};
use crate::data::CountryRecord;
use crate::error::MetricError;

/// One bubble: position, radius and what the tooltip/table show for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
    pub r: f64,
    pub name: String,
    pub flag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    pub header: String,
    pub value: f64,
}

/// Project records into plot points for `metric`.
pub fn project(metric: Metric, records: &[CountryRecord]) -> Result<Vec<PlotPoint>, MetricError> {
    let header = metric.header();
    let points = match metric.kind() {
        MetricKind::Country {
            path,
            radius_multiplier,
        } => project_countries(records, FieldPath::parse(path)?, header, radius_multiplier),
        MetricKind::RegionCount => project_regions(by_region_count(records), header),
        MetricKind::RegionTimezones => project_regions(by_region_timezones(records), header),
    };
    Ok(points)
}

/// Absent values order below every number
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn project_countries(
    records: &[CountryRecord],
    path: FieldPath,
    header: &str,
    radius_multiplier: f64,
) -> Vec<PlotPoint> {
    let mut ranked: Vec<(&CountryRecord, Option<f64>)> =
        records.iter().map(|r| (r, path.resolve(r))).collect();
    ranked.sort_by(|a, b| descending(a.1, b.1));

    let (Some(first), Some(last)) = (ranked.first(), ranked.last()) else {
        return Vec::new();
    };
    let largest = first.1.unwrap_or(0.0);
    let smallest = last.1.unwrap_or(0.0);

    ranked
        .iter()
        .filter_map(|&(record, value)| {
            let (lat, lng) = record.coordinates()?;
            let value = value.unwrap_or(0.0);
            Some(PlotPoint {
                x: lng,
                y: lat,
                r: scale(value, smallest, largest) * radius_multiplier,
                name: record.name.clone(),
                flag: record.flag().unwrap_or_default(),
                region: record.region.clone(),
                subregion: record.subregion.clone(),
                header: header.to_string(),
                value,
            })
        })
        .collect()
}

fn project_regions(aggregates: Vec<RegionAggregate>, header: &str) -> Vec<PlotPoint> {
    let (Some(first), Some(last)) = (aggregates.first(), aggregates.last()) else {
        return Vec::new();
    };
    let largest = first.count as f64;
    let smallest = last.count as f64;

    aggregates
        .into_iter()
        .map(|a| PlotPoint {
            x: a.lng,
            y: a.lat,
            r: scale(a.count as f64, smallest, largest),
            name: a.region,
            flag: String::new(),
            region: None,
            subregion: None,
            header: header.to_string(),
            value: a.count as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MIN_RADIUS;

    fn country(name: &str, code: &str, latlng: [f64; 2], population: Option<u64>, borders: usize) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            alpha2_code: Some(code.to_string()),
            region: Some("Europe".to_string()),
            subregion: Some("Northern Europe".to_string()),
            latlng: Some(latlng.to_vec()),
            borders: Some((0..borders).map(|i| format!("B{i}")).collect()),
            timezones: Some(vec!["UTC+01:00".to_string()]),
            languages: None,
            population,
        }
    }

    fn sample() -> Vec<CountryRecord> {
        vec![
            country("Iceland", "IS", [65.0, -18.0], Some(330_000), 0),
            country("Sweden", "SE", [62.0, 15.0], Some(9_900_000), 2),
            country("Norway", "NO", [62.0, 10.0], Some(5_200_000), 3),
            country("Finland", "FI", [64.0, 26.0], None, 3),
        ]
    }

    #[test]
    fn test_country_points_sorted_and_shaped() {
        let points = project(Metric::Population, &sample()).unwrap();
        let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sweden", "Norway", "Iceland", "Finland"]);

        let sweden = &points[0];
        assert_eq!((sweden.x, sweden.y), (15.0, 62.0));
        assert_eq!(sweden.flag, "🇸🇪");
        assert_eq!(sweden.region.as_deref(), Some("Europe"));
        assert_eq!(sweden.subregion.as_deref(), Some("Northern Europe"));
        assert_eq!(sweden.header, "Population");
        assert_eq!(sweden.value, 9_900_000.0);

        // Missing population shows as zero and sits on the floor
        let finland = &points[3];
        assert_eq!(finland.value, 0.0);
        assert_eq!(finland.r, MIN_RADIUS * 3.0);
    }

    #[test]
    fn test_population_radius_is_triple() {
        let records = sample();
        let points = project(Metric::Population, &records).unwrap();
        let (min, max) = (0.0, 9_900_000.0);
        for point in &points {
            let single = scale(point.value, min, max);
            assert!((point.r - single * 3.0).abs() < 1e-9, "{}", point.name);
        }
    }

    #[test]
    fn test_other_country_metrics_use_unit_multiplier() {
        let points = project(Metric::Borders, &sample()).unwrap();
        assert_eq!(points[0].header, "Number of borders");
        // Norway and Finland tie at 3; stable sort keeps input order
        assert_eq!(points[0].name, "Norway");
        assert_eq!(points[1].name, "Finland");
        assert!((points[0].r - scale(3.0, 0.0, 3.0)).abs() < 1e-9);
        assert_eq!(points[3].name, "Iceland");
        assert_eq!(points[3].r, MIN_RADIUS);
    }

    #[test]
    fn test_absent_values_sort_last() {
        let points = project(Metric::Languages, &sample()).unwrap();
        assert!(points.iter().all(|p| p.value == 0.0 && p.r == MIN_RADIUS));
        let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Iceland", "Sweden", "Norway", "Finland"]);
    }

    #[test]
    fn test_records_without_coordinates_not_plotted() {
        let mut records = sample();
        records[1].latlng = None;
        let points = project(Metric::Population, &records).unwrap();
        assert_eq!(points.len(), 3);
        // Sweden still sets the upper bound
        let norway = points.iter().find(|p| p.name == "Norway").unwrap();
        assert!((norway.r - scale(5_200_000.0, 0.0, 9_900_000.0) * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_points_have_no_country_details() {
        let points = project(Metric::RegionCountryCount, &sample()).unwrap();
        assert_eq!(points.len(), 1);
        let europe = &points[0];
        assert_eq!(europe.name, "Europe");
        assert_eq!(europe.flag, "");
        assert_eq!(europe.region, None);
        assert_eq!(europe.subregion, None);
        assert_eq!(europe.value, 4.0);
        assert_eq!(europe.header, "Country count");
        assert_eq!(europe.r, MIN_RADIUS);
        assert_eq!(europe.y, (65.0 + 62.0 + 62.0 + 64.0) / 4.0);
    }

    #[test]
    fn test_region_timezones_scaled_between_bounds() {
        let mut records = sample();
        records.push(CountryRecord {
            name: "Russia".into(),
            region: Some("Asia".into()),
            latlng: Some(vec![60.0, 100.0]),
            timezones: Some((2..=12).map(|h| format!("UTC+{h:02}:00")).collect()),
            ..Default::default()
        });
        let points = project(Metric::RegionTimezones, &records).unwrap();
        assert_eq!(points[0].name, "Asia");
        assert_eq!(points[0].value, 11.0);
        assert_eq!(points[1].name, "Europe");
        assert_eq!(points[1].value, 1.0);
        assert!((points[0].r - scale(11.0, 1.0, 11.0)).abs() < 1e-9);
        assert_eq!(points[1].header, "Unique timezones");
    }

    #[test]
    fn test_empty_dataset_yields_nothing() {
        for metric in Metric::ALL {
            assert!(project(metric, &[]).unwrap().is_empty());
        }
    }

    #[test]
    fn test_export_shape_omits_missing_region() {
        let points = project(Metric::RegionCountryCount, &sample()).unwrap();
        let json = simd_json::serde::to_string(&points).unwrap();
        assert!(json.contains("\"name\":\"Europe\""));
        assert!(!json.contains("subregion"));
    }
}
