use crate::format::format_value;
use crate::metric::PlotPoint;

/// Text contents of the data table for one set of plot points
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Region projections get a Name/value table; country projections also
    /// show flag, region and subregion. The first point decides which.
    pub fn from_points(points: &[PlotPoint]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let header = first.header.clone();
        let region_only = first.flag.is_empty() && first.subregion.is_none();

        let headers = if region_only {
            vec!["Name".to_string(), header]
        } else {
            ["Name", "Flag", "Region", "Subregion"]
                .into_iter()
                .map(String::from)
                .chain(std::iter::once(header))
                .collect()
        };

        let rows = points
            .iter()
            .map(|p| {
                let value = format_value(p.value);
                if region_only {
                    vec![p.name.clone(), value]
                } else {
                    vec![
                        p.name.clone(),
                        p.flag.clone(),
                        p.region.clone().unwrap_or_default(),
                        p.subregion.clone().unwrap_or_default(),
                        value,
                    ]
                }
            })
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
