use crate::data::CountryRecord;
use crate::error::PathError;

/// Record fields a metric can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Population,
    Borders,
    Timezones,
    Languages,
    Latlng,
}

/// What to read from the field: its numeric value, or the length of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Value,
    Length,
}

/// Typed form of a dotted path such as `borders.length`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    pub field: Field,
    pub accessor: Accessor,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let mut segments = path.split('.');
        let root = segments.next().filter(|s| !s.is_empty()).ok_or(PathError::Empty)?;

        let field = match root {
            "population" => Field::Population,
            "borders" => Field::Borders,
            "timezones" => Field::Timezones,
            "languages" => Field::Languages,
            "latlng" => Field::Latlng,
            other => {
                return Err(PathError::UnknownField {
                    path: path.to_string(),
                    segment: other.to_string(),
                })
            }
        };

        let accessor = match segments.next() {
            None => Accessor::Value,
            Some("length") => Accessor::Length,
            Some(other) => {
                return Err(PathError::UnknownField {
                    path: path.to_string(),
                    segment: other.to_string(),
                })
            }
        };

        if let Some(extra) = segments.next() {
            return Err(PathError::TrailingSegment {
                path: path.to_string(),
                segment: extra.to_string(),
            });
        }

        match (field, accessor) {
            (Field::Population, Accessor::Length) => {
                return Err(PathError::NotAList { path: path.to_string() })
            }
            (Field::Population, Accessor::Value) | (_, Accessor::Length) => {}
            (_, Accessor::Value) => return Err(PathError::NotNumeric { path: path.to_string() }),
        }

        Ok(Self { field, accessor })
    }

    /// Read the value at this path; `None` when any segment is absent
    pub fn resolve(&self, record: &CountryRecord) -> Option<f64> {
        // parse() only admits `population` as a value and lists with `.length`
        match self.field {
            Field::Population => record.population.map(|p| p as f64),
            Field::Borders => record.borders.as_ref().map(|v| v.len() as f64),
            Field::Timezones => record.timezones.as_ref().map(|v| v.len() as f64),
            Field::Languages => record.languages.as_ref().map(|v| v.len() as f64),
            Field::Latlng => record.latlng.as_ref().map(|v| v.len() as f64),
        }
    }
}
