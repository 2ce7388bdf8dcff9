mod country;
mod flag;

pub use country::{CountryRecord, Language};
pub use flag::country_to_flag;

use crate::chart::{Backdrop, Lod};
use crate::error::DataError;
use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Something that can hand over the full country dataset on demand
pub trait CountrySource {
    fn fetch(&self) -> Result<Vec<CountryRecord>, DataError>;
}

/// Dataset stored as a JSON array on disk, re-read on every fetch
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CountrySource for FileSource {
    fn fetch(&self) -> Result<Vec<CountryRecord>, DataError> {
        let mut bytes = fs::read(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<CountryRecord> =
            simd_json::serde::from_slice(&mut bytes).map_err(|source| DataError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), records = records.len(), "fetched country data");
        Ok(records)
    }
}

/// In-memory dataset, used where no file is involved
impl CountrySource for Vec<CountryRecord> {
    fn fetch(&self) -> Result<Vec<CountryRecord>, DataError> {
        Ok(self.clone())
    }
}

/// Load whichever Natural Earth coastline files exist in `map_dir`
pub fn load_backdrop(backdrop: &mut Backdrop, map_dir: &Path) {
    let coastline_files = [
        ("ne_110m_coastline.json", Lod::Low),
        ("ne_50m_coastline.json", Lod::Medium),
        ("ne_10m_coastline.json", Lod::High),
    ];

    for (filename, lod) in coastline_files {
        let path = map_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match load_coastlines(backdrop, &path, lod) {
            Ok(lines) => info!(file = filename, lines, "loaded coastlines"),
            Err(e) => warn!(file = filename, error = %e, "failed to load coastlines"),
        }
    }
}

fn load_coastlines(backdrop: &mut Backdrop, path: &Path, lod: Lod) -> Result<usize> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;
    let mut count = 0;
    for_each_line(&geojson, &mut |line| {
        backdrop.add_coastline(line, lod);
        count += 1;
    });
    Ok(count)
}

fn for_each_line<F>(geojson: &GeoJson, add_line: &mut F)
where
    F: FnMut(Vec<(f64, f64)>),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for geometry in fc.features.iter().filter_map(|f| f.geometry.as_ref()) {
                geometry_lines(geometry, add_line);
            }
        }
        GeoJson::Feature(f) => {
            if let Some(geometry) = &f.geometry {
                geometry_lines(geometry, add_line);
            }
        }
        GeoJson::Geometry(geometry) => geometry_lines(geometry, add_line),
    }
}

fn geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(Vec<(f64, f64)>),
{
    let to_line = |coords: &Vec<Vec<f64>>| -> Vec<(f64, f64)> {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| (c[0], c[1]))
            .collect()
    };

    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => lines.iter().for_each(|l| add_line(to_line(l))),
        // Only the exterior ring matters for an outline
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for exterior in polygons.iter().filter_map(|rings| rings.first()) {
                add_line(to_line(exterior));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

/// Rough continent outlines for when no coastline data is on disk
pub fn simple_world(backdrop: &mut Backdrop) {
    const CONTINENTS: &[&[(f64, f64)]] = &[
        // North America
        &[
            (-168.0, 65.0), (-141.0, 60.0), (-125.0, 48.0), (-117.0, 32.0),
            (-97.0, 25.0), (-82.0, 24.0), (-81.0, 31.0), (-70.0, 41.0),
            (-55.0, 47.0), (-64.0, 60.0), (-95.0, 62.0), (-130.0, 70.0),
            (-168.0, 65.0),
        ],
        // South America
        &[
            (-80.0, 10.0), (-60.0, 5.0), (-35.0, -5.0), (-40.0, -22.0),
            (-55.0, -34.0), (-68.0, -50.0), (-75.0, -52.0), (-72.0, -30.0),
            (-80.0, -5.0), (-80.0, 10.0),
        ],
        // Europe
        &[
            (-10.0, 36.0), (5.0, 43.0), (20.0, 40.0), (30.0, 40.0),
            (40.0, 43.0), (40.0, 55.0), (25.0, 65.0), (10.0, 71.0),
            (5.0, 58.0), (-10.0, 52.0), (-10.0, 36.0),
        ],
        // Africa
        &[
            (-17.0, 15.0), (-15.0, 28.0), (10.0, 37.0), (35.0, 30.0),
            (42.0, 12.0), (50.0, 12.0), (35.0, -20.0), (20.0, -35.0),
            (10.0, -15.0), (10.0, 0.0), (-10.0, 5.0), (-17.0, 15.0),
        ],
        // Asia
        &[
            (40.0, 43.0), (55.0, 37.0), (65.0, 25.0), (80.0, 8.0),
            (92.0, 22.0), (105.0, 10.0), (120.0, 22.0), (130.0, 35.0),
            (145.0, 45.0), (140.0, 55.0), (180.0, 68.0), (100.0, 77.0),
            (70.0, 72.0), (50.0, 50.0), (40.0, 43.0),
        ],
        // Australia
        &[
            (115.0, -20.0), (130.0, -12.0), (145.0, -15.0), (153.0, -30.0),
            (145.0, -38.0), (130.0, -32.0), (115.0, -35.0), (115.0, -20.0),
        ],
    ];

    for outline in CONTINENTS {
        backdrop.add_coastline(outline.to_vec(), Lod::Low);
    }
}
