use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::coords::extract_coordinates;
use crate::reader::Document;
use crate::resolve::resolve_layer_name;
use crate::sql::emit_zone;
use crate::validate::validate;

/// Every generated file is named OUTPUT_PREFIX + the input's basename +
/// ".sql"; the consolidator relies on this to find them again.
pub const OUTPUT_PREFIX: &str = "output_inserts_";

/// How converting one well-formed file went. Parse failures never reach this;
/// they surface as errors from the loader.
#[derive(Debug, PartialEq)]
pub enum FileOutcome {
    /// At least one placemark produced SQL
    Converted,
    /// The document had no placemarks at all
    NoPlacemarks,
    /// Placemarks were present, but none had both a name and coordinates
    NothingUsable,
}

/// Converts every usable placemark, writing SQL to the sink. The validator's
/// findings are logged up front but never stop the conversion. Returns true
/// iff at least one placemark produced output.
pub fn process_document(doc: &Document, sink: &mut dyn Write) -> Result<bool> {
    let report = validate(doc);
    for line in &report.warnings {
        warn!("{}", line);
    }
    for line in &report.errors {
        error!("{}", line);
    }

    let mut emitted = 0;
    for (idx, placemark) in doc.placemarks.iter().enumerate() {
        let zone = match resolve_layer_name(placemark) {
            Some(zone) => zone,
            None => {
                warn!("Skipping placemark {}: no usable layer name", idx + 1);
                continue;
            }
        };
        let coordinates = extract_coordinates(placemark);
        if coordinates.is_empty() {
            warn!("Skipping placemark {} ({}): no coordinates", idx + 1, zone);
            continue;
        }
        emit_zone(&zone, &coordinates, sink)?;
        emitted += 1;
    }
    Ok(emitted > 0)
}

/// Where the generated SQL for one input lands: output_inserts_<basename>.sql
/// in out_dir, or the working directory when out_dir is None.
pub fn output_path(kml_path: &str, out_dir: Option<&Path>) -> PathBuf {
    let stem = Path::new(kml_path)
        .file_stem()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{}{}.sql", OUTPUT_PREFIX, stem);
    match out_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Loads one .kml file, writes its SQL (truncating any previous output), and
/// classifies the result. The per-placemark work happens in
/// [process_document].
pub fn convert_file(path: &str, out_dir: Option<&Path>) -> Result<FileOutcome> {
    let doc = Document::load(path)?;
    let out = output_path(path, out_dir);
    let mut sink = BufWriter::new(fs_err::File::create(&out)?);
    let produced = process_document(&doc, &mut sink)?;
    sink.flush()?;
    info!("Wrote {}", out.display());

    Ok(if produced {
        FileOutcome::Converted
    } else if doc.placemarks.is_empty() {
        FileOutcome::NoPlacemarks
    } else {
        FileOutcome::NothingUsable
    })
}

/// The single-file entry point the web front end calls. Err means the file
/// couldn't be parsed; Ok(false) means it was well-formed but nothing in it
/// was convertible.
pub fn process_single_file(path: &str, out_dir: Option<&Path>) -> Result<bool> {
    Ok(convert_file(path, out_dir)? == FileOutcome::Converted)
}
