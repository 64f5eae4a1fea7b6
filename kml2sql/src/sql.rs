use std::io::Write;

use anyhow::Result;

use crate::coords::CoordinatePair;

/// Writes the INSERTs for one zone: a single guarded zona statement, then one
/// coordenada statement per pair, in source order. Replaying the script can't
/// duplicate a zone (the NOT EXISTS guard), but it will duplicate coordinate
/// rows. Zone names go in unescaped.
pub fn emit_zone(
    zone: &str,
    coordinates: &[CoordinatePair],
    sink: &mut dyn Write,
) -> Result<()> {
    writeln!(
        sink,
        "INSERT INTO zona (custofixo, custoporentrega, nome, restrita, utilizaexpediente, \
         utilizapernoite, agrupavel, tipo_solucao, sequencia, tipo_zona) SELECT 0, 0, '{}', \
         'true', 'false', 'false', 'false', 'TODAS', 99999, 'SIMULACAO' WHERE NOT EXISTS \
         (SELECT 1 FROM zona WHERE nome = '{}');",
        zone, zone
    )?;
    for pair in coordinates {
        // The target columns are declared (latitude, longitude), the reverse
        // of how KML orders the pair
        writeln!(
            sink,
            "INSERT INTO coordenada(latitude, longitude, id_zona) VALUES({}, {}, (SELECT id \
             FROM zona WHERE nome = '{}'));",
            pair.latitude, pair.longitude, zone
        )?;
    }
    Ok(())
}
