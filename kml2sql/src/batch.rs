use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::pipeline::{convert_file, FileOutcome};

/// Aggregate counters for one batch run, accumulated in discovery order.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct RunStatistics {
    pub total: usize,
    pub success: usize,
    pub errors: usize,
    pub no_valid_layers: usize,
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} files: {} converted, {} errors, {} with no usable layers",
            self.total, self.success, self.errors, self.no_valid_layers
        )
    }
}

/// Converts every .kml file (case-insensitive, non-recursive) in a directory,
/// in sorted order. One file per output, named by [crate::output_path]. A bad
/// file never aborts the batch; it's counted and the run moves on.
pub fn process_directory(dir: &str, out_dir: Option<&Path>) -> Result<RunStatistics> {
    let mut paths = Vec::new();
    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        let is_kml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("kml"))
            .unwrap_or(false);
        if is_kml && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    info!("Found {} KML files in {}", paths.len(), dir);

    let num_files = paths.len();
    let mut stats = RunStatistics::default();
    for path in paths {
        stats.total += 1;
        let path = path.display().to_string();
        info!("[{}/{}] Converting {}", stats.total, num_files, path);
        match convert_file(&path, out_dir) {
            Ok(FileOutcome::Converted) => {
                stats.success += 1;
            }
            Ok(FileOutcome::NoPlacemarks) => {
                error!("{} has no placemarks", path);
                stats.errors += 1;
            }
            Ok(FileOutcome::NothingUsable) => {
                warn!("{} has placemarks, but none were usable", path);
                stats.no_valid_layers += 1;
            }
            Err(err) => {
                error!("Couldn't convert {}: {}", path, err);
                stats.errors += 1;
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = fs_err::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn classify_batch_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "broken.kml", "<kml><unclosed");
        write_file(
            dir.path(),
            "empty.kml",
            r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document/></kml>"#,
        );
        write_file(
            dir.path(),
            "good.KML",
            r#"<kml xmlns="http://www.opengis.net/kml/2.2">
  <Placemark>
    <ExtendedData><Data name="zona"><value>A</value></Data></ExtendedData>
    <LineString><coordinates>1.0,2.0</coordinates></LineString>
  </Placemark>
  <Placemark>
    <ExtendedData><Data name="zona"><value>B</value></Data></ExtendedData>
    <LineString><coordinates>3.0,4.0</coordinates></LineString>
  </Placemark>
</kml>"#,
        );
        // Not a .kml file; ignored entirely
        write_file(dir.path(), "notes.txt", "leave me alone");

        let out_dir = tempfile::tempdir().unwrap();
        let stats =
            process_directory(dir.path().to_str().unwrap(), Some(out_dir.path())).unwrap();
        assert_eq!(
            RunStatistics {
                total: 3,
                success: 1,
                errors: 2,
                no_valid_layers: 0,
            },
            stats
        );

        let sql = fs_err::read_to_string(out_dir.path().join("output_inserts_good.sql")).unwrap();
        assert_eq!(4, sql.lines().count());
        assert!(sql.contains("'A'"));
        assert!(sql.contains("'B'"));
    }

    #[test]
    fn unusable_layers_counted_separately() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "nameless.kml",
            r#"<kml xmlns="http://www.opengis.net/kml/2.2">
  <Placemark><LineString><coordinates>1.0,2.0</coordinates></LineString></Placemark>
</kml>"#,
        );
        let out_dir = tempfile::tempdir().unwrap();
        let stats =
            process_directory(dir.path().to_str().unwrap(), Some(out_dir.path())).unwrap();
        assert_eq!(
            RunStatistics {
                total: 1,
                success: 0,
                errors: 0,
                no_valid_layers: 1,
            },
            stats
        );
    }

    #[test]
    fn statistics_serialize_to_json() {
        let stats = RunStatistics {
            total: 3,
            success: 1,
            errors: 2,
            no_valid_layers: 0,
        };
        assert_eq!(
            r#"{"total":3,"success":1,"errors":2,"no_valid_layers":0}"#,
            serde_json::to_string(&stats).unwrap()
        );
    }
}
