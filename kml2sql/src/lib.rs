//! Converts KML exports of delivery zone boundaries into SQL INSERT scripts
//! for the zona/coordenada tables. The interesting part is coping with
//! real-world exports: each authoring tool hides the zone name in a different
//! spot, so resolution tries a fixed list of fallbacks, and a validator
//! reports what's structurally off without ever stopping the conversion.

#[macro_use]
extern crate log;

mod batch;
mod consolidate;
mod coords;
mod pipeline;
mod reader;
mod resolve;
mod sql;
mod validate;

pub use crate::batch::{process_directory, RunStatistics};
pub use crate::consolidate::consolidate_outputs;
pub use crate::coords::{extract_coordinates, CoordinatePair};
pub use crate::pipeline::{
    convert_file, output_path, process_document, process_single_file, FileOutcome, OUTPUT_PREFIX,
};
pub use crate::reader::{Document, Placemark, KML_NS};
pub use crate::resolve::resolve_layer_name;
pub use crate::sql::emit_zone;
pub use crate::validate::{validate, ValidationReport};
