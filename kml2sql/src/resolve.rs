use crate::reader::Placemark;

/// The places a zone name may hide, in priority order. The custom exporter
/// writes a `zona` extended-data field; QGIS-style exports use a `layer`
/// schema field; generic tools only fill in the free-text description or the
/// `Description`/`Name` extended-data fields. Trying a fixed list keeps the
/// outcome deterministic no matter which tool produced the file.
const STRATEGIES: [fn(&Placemark) -> Option<String>; 5] = [
    extended_data_zona,
    simple_data_layer,
    description,
    extended_data_description,
    extended_data_name,
];

/// Returns the zone name for one placemark, or None when no strategy finds
/// one. Absence is an expected outcome, not an error.
pub fn resolve_layer_name(placemark: &Placemark) -> Option<String> {
    STRATEGIES.iter().find_map(|try_one| try_one(placemark))
}

fn extended_data_zona(placemark: &Placemark) -> Option<String> {
    non_empty(&extended_value(placemark, "zona")?)
}

fn simple_data_layer(placemark: &Placemark) -> Option<String> {
    non_empty(placemark.simple_data.get("layer")?)
}

fn description(placemark: &Placemark) -> Option<String> {
    before_separator(placemark.description.as_deref()?)
}

fn extended_data_description(placemark: &Placemark) -> Option<String> {
    before_separator(&extended_value(placemark, "Description")?)
}

fn extended_data_name(placemark: &Placemark) -> Option<String> {
    non_empty(&extended_value(placemark, "Name")?)
}

fn extended_value(placemark: &Placemark, field: &str) -> Option<String> {
    placemark.extended_data.get(field)?.clone()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// "CITY / STATE" descriptions keep just the part before the first " / ".
fn before_separator(text: &str) -> Option<String> {
    let text = text.trim();
    non_empty(text.split(" / ").next().unwrap_or(text))
}
