use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use crate::pipeline::OUTPUT_PREFIX;

/// Concatenates every generated output_inserts_*.sql in a directory into one
/// script, in sorted order, with a banner comment around each section. The
/// web front end serves this as the single download for a batch upload.
/// Returns how many files were folded in.
pub fn consolidate_outputs(dir: &Path, out_path: &Path) -> Result<usize> {
    let mut inputs = Vec::new();
    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        let name = match path.file_name().and_then(|x| x.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        // Don't fold the consolidated file into itself
        if Some(name.as_str()) == out_path.file_name().and_then(|x| x.to_str()) {
            continue;
        }
        if name.starts_with(OUTPUT_PREFIX) && name.ends_with(".sql") {
            inputs.push((name, path));
        }
    }
    inputs.sort();

    let mut out = BufWriter::new(fs_err::File::create(out_path)?);
    writeln!(out, "-- ================================================")?;
    writeln!(out, "-- Consolidated KML conversion results")?;
    writeln!(out, "-- Sections: {}", inputs.len())?;
    writeln!(out, "-- ================================================")?;
    writeln!(out)?;
    for (name, path) in &inputs {
        let section = name
            .trim_start_matches(OUTPUT_PREFIX)
            .trim_end_matches(".sql");
        writeln!(out, "-- ===== {} =====", section)?;
        let contents = fs_err::read_to_string(path)?;
        out.write_all(contents.as_bytes())?;
        if !contents.ends_with('\n') {
            writeln!(out)?;
        }
        writeln!(out, "-- ===== end {} =====", section)?;
        writeln!(out)?;
    }
    out.flush()?;
    info!(
        "Consolidated {} files into {}",
        inputs.len(),
        out_path.display()
    );
    Ok(inputs.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = fs_err::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn sections_in_sorted_order_with_banners() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "output_inserts_b.sql", "INSERT B;\n");
        // Missing trailing newline on purpose
        write_file(dir.path(), "output_inserts_a.sql", "INSERT A;");
        // Not a generated output; ignored
        write_file(dir.path(), "schema.sql", "CREATE TABLE zona;\n");

        let out_path = dir.path().join("consolidated.sql");
        assert_eq!(2, consolidate_outputs(dir.path(), &out_path).unwrap());

        let combined = fs_err::read_to_string(&out_path).unwrap();
        let a = combined.find("-- ===== a =====").unwrap();
        let b = combined.find("-- ===== b =====").unwrap();
        assert!(a < b);
        assert!(combined.contains("INSERT A;\n-- ===== end a ====="));
        assert!(combined.contains("INSERT B;\n-- ===== end b ====="));
        assert!(!combined.contains("CREATE TABLE"));
    }

    #[test]
    fn consolidated_file_is_not_folded_into_itself() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "output_inserts_x.sql", "INSERT X;\n");
        let out_path = dir.path().join("output_inserts_all.sql");

        assert_eq!(1, consolidate_outputs(dir.path(), &out_path).unwrap());
        // Re-running still only sees the one real section
        assert_eq!(1, consolidate_outputs(dir.path(), &out_path).unwrap());
    }
}
