use std::collections::BTreeMap;

use anyhow::Result;

/// The only namespace this importer understands. Elements qualified any other
/// way are ignored, matching how the upstream exporters write their files.
pub const KML_NS: &str = "http://www.opengis.net/kml/2.2";

/// One parsed KML file, reduced to the fields the converter cares about. The
/// XML tree is scraped once here; nothing downstream touches the XML library.
pub struct Document {
    pub placemarks: Vec<Placemark>,
}

/// A single named feature. Different authoring tools stash the interesting
/// metadata in different places, so all the candidate locations are captured.
pub struct Placemark {
    /// `<ExtendedData><Data name="..."><value>` entries. A field whose
    /// `<value>` child is missing maps to None; an empty value to Some("").
    pub extended_data: BTreeMap<String, Option<String>>,
    /// `<SchemaData><SimpleData name="...">` entries.
    pub simple_data: BTreeMap<String, String>,
    /// Free-text `<description>`.
    pub description: Option<String>,
    /// Raw text of the first `<coordinates>` element.
    pub coordinates: Option<String>,
    /// Whether any `<LineString>` geometry is present.
    pub has_line_string: bool,
}

impl Document {
    /// Reads and parses one .kml file. Any failure -- I/O, a non-UTF8 byte
    /// stream, malformed or empty XML -- surfaces here; there's no partial
    /// recovery from a broken file.
    pub fn load(path: &str) -> Result<Document> {
        let bytes = fs_err::read(path)?;
        let raw = std::str::from_utf8(&bytes)?;
        Document::parse(raw)
    }

    /// Parses KML already staged in memory.
    pub fn parse(raw: &str) -> Result<Document> {
        let tree = roxmltree::Document::parse(raw)?;
        let mut placemarks = Vec::new();
        for node in tree.descendants() {
            if is_kml(node, "Placemark") {
                placemarks.push(scrape_placemark(node));
            }
        }
        Ok(Document { placemarks })
    }
}

fn is_kml(node: roxmltree::Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(KML_NS)
}

fn scrape_placemark(pm: roxmltree::Node) -> Placemark {
    let mut placemark = Placemark {
        extended_data: BTreeMap::new(),
        simple_data: BTreeMap::new(),
        description: None,
        coordinates: None,
        has_line_string: false,
    };
    for node in pm.descendants() {
        if is_kml(node, "Data") {
            if let Some(name) = node.attribute("name") {
                let value = node
                    .children()
                    .find(|child| is_kml(*child, "value"))
                    .map(|v| v.text().unwrap_or("").to_string());
                // First occurrence of a field wins
                placemark
                    .extended_data
                    .entry(name.to_string())
                    .or_insert(value);
            }
        } else if is_kml(node, "SimpleData") {
            if let Some(name) = node.attribute("name") {
                placemark
                    .simple_data
                    .entry(name.to_string())
                    .or_insert_with(|| node.text().unwrap_or("").to_string());
            }
        } else if is_kml(node, "description") {
            if placemark.description.is_none() {
                placemark.description = node.text().map(|x| x.to_string());
            }
        } else if is_kml(node, "coordinates") {
            if placemark.coordinates.is_none() {
                placemark.coordinates = node.text().map(|x| x.to_string());
            }
        } else if is_kml(node, "LineString") {
            placemark.has_line_string = true;
        }
    }
    placemark
}
