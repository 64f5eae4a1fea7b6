use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::reader::Placemark;

lazy_static! {
    // "lon,lat" where both numbers carry an explicit decimal point. A third
    // altitude component and any surrounding whitespace fall outside the
    // match and are dropped.
    static ref COORD_PAIR: Regex = Regex::new(r"(-?\d+\.\d+),(-?\d+\.\d+)").unwrap();
}

/// One longitude/latitude pair, in the order KML writes them. The decimal
/// text is kept verbatim so the generated SQL reproduces the source
/// digit-for-digit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoordinatePair {
    pub longitude: String,
    pub latitude: String,
}

impl CoordinatePair {
    pub fn new(longitude: &str, latitude: &str) -> CoordinatePair {
        CoordinatePair {
            longitude: longitude.to_string(),
            latitude: latitude.to_string(),
        }
    }
}

/// Returns every lon,lat pair in the placemark's coordinate text, in source
/// order, duplicates included. Malformed tokens are silently skipped; only
/// the validator reports them.
pub fn extract_coordinates(placemark: &Placemark) -> Vec<CoordinatePair> {
    match &placemark.coordinates {
        Some(raw) => parse_coordinate_text(raw.trim()),
        None => Vec::new(),
    }
}

pub(crate) fn parse_coordinate_text(raw: &str) -> Vec<CoordinatePair> {
    COORD_PAIR
        .captures_iter(raw)
        .map(|cap| CoordinatePair::new(&cap[1], &cap[2]))
        .collect()
}
