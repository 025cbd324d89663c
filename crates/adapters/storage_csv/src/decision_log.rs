//! CSV implementation of [`DecisionLog`].

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;

use smartenergy_app::ports::DecisionLog;
use smartenergy_domain::decision::DecisionRecord;
use smartenergy_domain::error::SmartEnergyError;

use crate::error::LogError;
use crate::row::Row;

/// Decision log kept in memory and mirrored to an append-only CSV file.
///
/// The in-memory sequence starts empty for each process; an existing file
/// is appended to, never read back.
pub struct CsvDecisionLog {
    path: PathBuf,
    delimiter: u8,
    records: Vec<DecisionRecord>,
}

impl CsvDecisionLog {
    /// Create a log mirrored to `path`, comma-delimited.
    ///
    /// Nothing is written until the first [`append`](DecisionLog::append).
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            records: Vec::new(),
        }
    }

    /// Use `delimiter` between columns.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn write_row(&self, record: &DecisionRecord) -> Result<(), LogError> {
        let is_new = !fs::metadata(&self.path).is_ok_and(|meta| meta.len() > 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(Row::from(record))?;
        writer.flush()?;

        if is_new {
            tracing::info!(path = %self.path.display(), "decision log created");
        }
        Ok(())
    }

    fn read_file(&self) -> Result<Option<Vec<u8>>, LogError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn remove_file(&self) -> Result<(), LogError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl DecisionLog for CsvDecisionLog {
    fn append(&mut self, record: DecisionRecord) -> Result<(), SmartEnergyError> {
        let result = self.write_row(&record);
        self.records.push(record);
        result.map_err(SmartEnergyError::from)
    }

    fn read_all(&self) -> &[DecisionRecord] {
        &self.records
    }

    fn reset(&mut self) -> Result<(), SmartEnergyError> {
        self.remove_file()?;
        self.records.clear();
        Ok(())
    }

    fn export(&self) -> Result<Option<Vec<u8>>, SmartEnergyError> {
        self.read_file().map_err(SmartEnergyError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::HEADER;
    use std::path::Path;
    use smartenergy_domain::actuator::ActuatorState;
    use smartenergy_domain::energy::PowerReading;
    use smartenergy_domain::feature::{FeatureRecord, Weather};

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("smartenergy-{}.csv", uuid::Uuid::new_v4()))
    }

    fn record(temperature: f64, climate: bool) -> DecisionRecord {
        DecisionRecord::builder()
            .features(
                FeatureRecord::builder()
                    .temperature(temperature)
                    .occupancy(true)
                    .weather(Weather::Rain)
                    .illuminance(40.0)
                    .build()
                    .unwrap(),
            )
            .state(ActuatorState {
                climate,
                ..ActuatorState::default()
            })
            .power(PowerReading {
                total_watts: if climate { 1750.0 } else { 250.0 },
                cost_per_hour: if climate { 3325.0 } else { 475.0 },
            })
            .build()
    }

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn should_not_create_file_before_first_append() {
        let path = temp_path();
        let log = CsvDecisionLog::open(&path);
        assert!(!path.exists());
        assert!(log.read_all().is_empty());
    }

    #[test]
    fn should_write_header_once_then_rows() {
        let path = temp_path();
        let mut log = CsvDecisionLog::open(&path);

        log.append(record(31.5, true)).unwrap();
        log.append(record(24.0, false)).unwrap();

        let lines = lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER.join(","));
        assert!(lines[1].contains(",31.5,40.0,Ya,hujan,Tidak,ON,OFF,OFF,1750.0,3325"));
        assert!(lines[2].contains(",24.0,40.0,Ya,hujan,Tidak,OFF,OFF,OFF,250.0,475"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("Waktu")).count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn should_append_to_existing_file_without_new_header() {
        let path = temp_path();
        CsvDecisionLog::open(&path).append(record(25.0, false)).unwrap();

        let mut reopened = CsvDecisionLog::open(&path);
        assert!(reopened.read_all().is_empty());
        reopened.append(record(26.0, false)).unwrap();

        let lines = lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| l.starts_with("Waktu")).count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn should_return_records_in_insertion_order() {
        let path = temp_path();
        let mut log = CsvDecisionLog::open(&path);
        let first = record(30.0, true);
        let second = record(22.0, false);

        log.append(first.clone()).unwrap();
        log.append(second.clone()).unwrap();

        assert_eq!(log.read_all(), &[first, second]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn should_use_configured_delimiter() {
        let path = temp_path();
        let mut log = CsvDecisionLog::open(&path).with_delimiter(b';');
        log.append(record(27.0, false)).unwrap();

        let lines = lines(&path);
        assert_eq!(lines[0], HEADER.join(";"));
        assert!(lines[1].ends_with(";250.0;475"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn should_delete_file_and_records_on_reset() {
        let path = temp_path();
        let mut log = CsvDecisionLog::open(&path);
        log.append(record(29.0, true)).unwrap();
        assert!(path.exists());

        log.reset().unwrap();
        assert!(!path.exists());
        assert!(log.read_all().is_empty());
    }

    #[test]
    fn should_reset_when_file_is_already_gone() {
        let mut log = CsvDecisionLog::open(temp_path());
        assert!(log.reset().is_ok());
    }

    #[test]
    fn should_write_header_again_after_reset() {
        let path = temp_path();
        let mut log = CsvDecisionLog::open(&path);
        log.append(record(29.0, true)).unwrap();
        log.reset().unwrap();
        log.append(record(23.0, false)).unwrap();

        let lines = lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER.join(","));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn should_export_file_contents() {
        let path = temp_path();
        let mut log = CsvDecisionLog::open(&path);
        assert_eq!(log.export().unwrap(), None);

        log.append(record(31.5, true)).unwrap();
        let exported = String::from_utf8(log.export().unwrap().unwrap()).unwrap();
        assert_eq!(exported, fs::read_to_string(&path).unwrap());
        assert!(exported.starts_with(&HEADER.join(",")));

        log.reset().unwrap();
        assert_eq!(log.export().unwrap(), None);
    }

    #[test]
    fn should_fail_export_when_path_is_unreadable() {
        let dir = std::env::temp_dir().join(format!("smartenergy-dir-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let log = CsvDecisionLog::open(&dir);

        assert!(matches!(log.export(), Err(SmartEnergyError::Persistence(_))));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn should_keep_record_in_memory_when_write_fails() {
        let path = std::env::temp_dir()
            .join(format!("smartenergy-missing-{}", uuid::Uuid::new_v4()))
            .join("log.csv");
        let mut log = CsvDecisionLog::open(&path);

        let err = log.append(record(28.0, true)).unwrap_err();
        assert!(matches!(err, SmartEnergyError::Persistence(_)));
        assert_eq!(log.read_all().len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn should_keep_records_when_file_cannot_be_removed() {
        let dir = std::env::temp_dir().join(format!("smartenergy-dir-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(dir.join("nested")).unwrap();
        // `remove_file` refuses directories.
        let mut log = CsvDecisionLog::open(&dir);
        log.records.push(record(25.0, false));

        assert!(matches!(log.reset(), Err(SmartEnergyError::Persistence(_))));
        assert_eq!(log.read_all().len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }
}
