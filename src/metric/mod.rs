//! Turning country records into chart-ready bubbles.

pub mod aggregate;
pub mod path;
mod project;
pub mod scale;

pub use aggregate::{by_region_count, by_region_timezones, RegionAggregate};
pub use path::FieldPath;
pub use project::{project, PlotPoint};
pub use scale::{scale, MIN_RADIUS};

use crate::error::MetricError;
use std::fmt;
use std::str::FromStr;

/// A user-selectable metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Population,
    Borders,
    Timezones,
    Languages,
    RegionCountryCount,
    RegionTimezones,
}

/// How a metric is computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricKind {
    /// One bubble per country, read from a dotted field path
    Country { path: &'static str, radius_multiplier: f64 },
    /// One bubble per region sized by member count
    RegionCount,
    /// One bubble per region sized by distinct timezones
    RegionTimezones,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Population,
        Metric::Borders,
        Metric::Timezones,
        Metric::Languages,
        Metric::RegionCountryCount,
        Metric::RegionTimezones,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Population => "population",
            Metric::Borders => "borders",
            Metric::Timezones => "timezones",
            Metric::Languages => "languages",
            Metric::RegionCountryCount => "region_country_count",
            Metric::RegionTimezones => "region_timezones",
        }
    }

    /// Column header / tooltip label for the metric's value
    pub fn header(self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::Borders => "Number of borders",
            Metric::Timezones => "Number of timezones",
            Metric::Languages => "Number of languages",
            Metric::RegionCountryCount => "Country count",
            Metric::RegionTimezones => "Unique timezones",
        }
    }

    /// Short name for the selector bar
    pub fn label(self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::Borders => "Borders",
            Metric::Timezones => "Timezones",
            Metric::Languages => "Languages",
            Metric::RegionCountryCount => "Region countries",
            Metric::RegionTimezones => "Region timezones",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Metric::Population => MetricKind::Country {
                path: "population",
                radius_multiplier: 3.0,
            },
            Metric::Borders => MetricKind::Country {
                path: "borders.length",
                radius_multiplier: 1.0,
            },
            Metric::Timezones => MetricKind::Country {
                path: "timezones.length",
                radius_multiplier: 1.0,
            },
            Metric::Languages => MetricKind::Country {
                path: "languages.length",
                radius_multiplier: 1.0,
            },
            Metric::RegionCountryCount => MetricKind::RegionCount,
            Metric::RegionTimezones => MetricKind::RegionTimezones,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&m| m == self).unwrap_or(0)
    }

    pub fn next(self) -> Metric {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Metric {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| MetricError::Unknown(key.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>(), Ok(metric));
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(
            "bogus".parse::<Metric>(),
            Err(MetricError::Unknown("bogus".to_string()))
        );
        assert!("Population".parse::<Metric>().is_err());
    }

    #[test]
    fn test_country_paths_parse() {
        for metric in Metric::ALL {
            if let MetricKind::Country { path, .. } = metric.kind() {
                assert!(FieldPath::parse(path).is_ok(), "{path}");
            }
        }
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Metric::RegionTimezones.next(), Metric::Population);
        assert_eq!(Metric::Population.prev(), Metric::RegionTimezones);
        assert_eq!(Metric::Borders.next().prev(), Metric::Borders);
    }
}
