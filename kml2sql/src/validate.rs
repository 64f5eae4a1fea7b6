use serde::Serialize;

use crate::coords::extract_coordinates;
use crate::reader::Document;
use crate::resolve::resolve_layer_name;

/// Everything the validator noticed about one document. Warnings are
/// placemark problems that still leave the zone convertible; errors mean a
/// placemark (or the whole document) can't produce output. The pipeline only
/// logs this -- it never stops because of it.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

pub fn validate(doc: &Document) -> ValidationReport {
    let mut report = ValidationReport {
        valid: true,
        warnings: Vec::new(),
        errors: Vec::new(),
    };
    if doc.placemarks.is_empty() {
        report.valid = false;
        report
            .errors
            .push("document contains no placemarks".to_string());
        return report;
    }

    for (idx, placemark) in doc.placemarks.iter().enumerate() {
        let mut issues = Vec::new();
        for (field, value) in &placemark.extended_data {
            match value {
                None => issues.push(format!("field \"{}\" is missing its value element", field)),
                Some(x) if x.trim().is_empty() => {
                    issues.push(format!("field \"{}\" has an empty value", field))
                }
                _ => {}
            }
        }
        let name = resolve_layer_name(placemark);
        if name.is_none() {
            issues.push("no layer name in any known location".to_string());
        }
        match &placemark.coordinates {
            None => issues.push("no coordinates element".to_string()),
            Some(_) if extract_coordinates(placemark).is_empty() => {
                issues.push("coordinates contain no lon,lat pairs".to_string())
            }
            _ => {}
        }
        if !placemark.has_line_string {
            issues.push("no LineString geometry".to_string());
        }

        if issues.is_empty() {
            continue;
        }
        // A placemark that still resolves to a name will be converted, so its
        // problems are only warnings
        let sink = if name.is_some() {
            &mut report.warnings
        } else {
            report.valid = false;
            &mut report.errors
        };
        for issue in issues {
            sink.push(format!("placemark {}: {}", idx + 1, issue));
        }
    }
    report
}
