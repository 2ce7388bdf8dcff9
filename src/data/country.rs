use serde::Deserialize;

use super::flag::country_to_flag;

/// One entry of the country dataset. Only `name` is required; everything
/// else may be missing or null without failing the load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    #[serde(default, rename = "alpha2Code")]
    pub alpha2_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    /// [latitude, longitude]
    #[serde(default)]
    pub latlng: Option<Vec<f64>>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
    #[serde(default)]
    pub timezones: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<Language>>,
    #[serde(default)]
    pub population: Option<u64>,
}

/// Languages appear either as bare names/codes or as ISO detail objects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Language {
    Code(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        iso639_1: Option<String>,
    },
}

impl CountryRecord {
    /// (lat, lng) when the record carries at least two coordinates
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.latlng.as_deref() {
            Some([lat, lng, ..]) => Some((*lat, *lng)),
            _ => None,
        }
    }

    /// Region name, treating the empty string as absent
    pub fn region_name(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    pub fn flag(&self) -> Option<String> {
        self.alpha2_code.as_deref().and_then(country_to_flag)
    }
}
