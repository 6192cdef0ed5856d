// Events CSV output
// Columnar per-run event export shared by both dataset variants

use std::fs::OpenOptions;
use std::path::Path;

use crate::catalog::storage::CatalogResult;
use crate::events::EventSet;
use crate::profiles::EventsCsvMode;

const HEADERS: [&str; 2] = ["Event Velocity", "rel_time(sec)"];

/// Write detected events to the CSV at `path`
///
/// Overwrite mode replaces the file and always writes the header. Append
/// mode keeps existing rows and writes the header only when the file does
/// not exist yet.
pub fn write_events(path: &Path, events: &EventSet, mode: EventsCsvMode) -> CatalogResult<()> {
    match mode {
        EventsCsvMode::Overwrite => {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(&HEADERS)?;
            write_rows(&mut writer, events)?;
            writer.flush()?;
        }
        EventsCsvMode::Append => {
            let needs_header = !path.exists();
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let mut writer = csv::Writer::from_writer(file);

            if needs_header {
                writer.write_record(&HEADERS)?;
            }
            write_rows(&mut writer, events)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    events: &EventSet,
) -> CatalogResult<()> {
    for point in events.iter() {
        writer.write_record(&[point.velocity.to_string(), point.time.to_string()])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventPoint;
    use std::fs;
    use tempfile::TempDir;

    fn sample_events() -> EventSet {
        let mut events = EventSet::with_anchor(EventPoint::new(8.0, 5.0));
        events.push_capped(EventPoint::new(9.0, 6.0), 4);
        events
    }

    #[test]
    fn test_overwrite_writes_header_and_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("outputCatalog.csv");

        write_events(&path, &sample_events(), EventsCsvMode::Overwrite).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Event Velocity,rel_time(sec)");
        assert_eq!(lines[1], "8,5");
        assert_eq!(lines[2], "9,6");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_overwrite_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("outputCatalog.csv");

        write_events(&path, &sample_events(), EventsCsvMode::Overwrite).unwrap();
        write_events(&path, &sample_events(), EventsCsvMode::Overwrite).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn test_append_writes_header_exactly_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("outputCatalog.csv");

        write_events(&path, &sample_events(), EventsCsvMode::Append).unwrap();
        write_events(&path, &sample_events(), EventsCsvMode::Append).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Event Velocity,rel_time(sec)");
        assert!(lines[1..].iter().all(|l| !l.contains("Velocity")));
    }

    #[test]
    fn test_fractional_times_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("outputCatalog.csv");

        let mut events = EventSet::with_anchor(EventPoint::new(10.0, 10.0));
        events.push_capped(EventPoint::new(9.0, 10.5), 4);
        write_events(&path, &events, EventsCsvMode::Overwrite).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "9");
        assert_eq!(&rows[1][1], "10.5");
    }
}
