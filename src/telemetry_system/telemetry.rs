use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::SimulationError;

pub const TELEMETRY_HEADER: &str = "Time (s)\tAltitude (m)\tSpeed (m/s)\tMass (kg)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetryRecord {
    pub time: f64,     // s
    pub altitude: f64, // m
    pub speed: f64,    // m/s
    pub mass: f64,     // kg
}

impl TelemetryRecord {
    pub fn new(time: f64, altitude: f64, speed: f64, mass: f64) -> Self {
        TelemetryRecord {
            time,
            altitude,
            speed,
            mass,
        }
    }

    pub fn format_record(&self) -> String {
        format!(
            "\n{:.3}\t{:.0}\t{:.0}\t{:.1}",
            self.time, self.altitude, self.speed, self.mass
        )
    }
}

enum Destination {
    Disabled,
    File(BufWriter<File>),
    Writer(Box<dyn Write>),
}

/// Append-only telemetry output. Write failures never interrupt the caller:
/// the first one is kept, further output is dropped, and the error is handed
/// back through [`TelemetrySink::take_error`] or [`TelemetrySink::finish`].
pub struct TelemetrySink {
    destination: Destination,
    records_written: usize,
    error: Option<SimulationError>,
}

impl TelemetrySink {
    pub fn disabled() -> Self {
        TelemetrySink {
            destination: Destination::Disabled,
            records_written: 0,
            error: None,
        }
    }

    pub fn open(destination: Option<&Path>) -> Result<Self, SimulationError> {
        match destination {
            Some(path) if !path.as_os_str().is_empty() => {
                let file = File::create(path)?;
                Ok(TelemetrySink {
                    destination: Destination::File(BufWriter::new(file)),
                    records_written: 0,
                    error: None,
                })
            }
            _ => Ok(TelemetrySink::disabled()),
        }
    }

    pub fn from_writer(writer: Box<dyn Write>) -> Self {
        TelemetrySink {
            destination: Destination::Writer(writer),
            records_written: 0,
            error: None,
        }
    }

    pub fn failed(error: SimulationError) -> Self {
        TelemetrySink {
            destination: Destination::Disabled,
            records_written: 0,
            error: Some(error),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.destination, Destination::Disabled)
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn write_header(&mut self, initial: &TelemetryRecord) {
        let text = format!("{}{}", TELEMETRY_HEADER, initial.format_record());
        self.write_text(&text);
    }

    pub fn record(&mut self, record: &TelemetryRecord) {
        if self.write_text(&record.format_record()) {
            self.records_written += 1;
        }
    }

    fn write_text(&mut self, text: &str) -> bool {
        let result = match &mut self.destination {
            Destination::Disabled => return false,
            Destination::File(writer) => writer.write_all(text.as_bytes()),
            Destination::Writer(writer) => writer.write_all(text.as_bytes()),
        };
        match result {
            Ok(()) => true,
            Err(error) => {
                log::warn!("telemetry disabled after write failure: {}", error);
                self.fail(error.into());
                false
            }
        }
    }

    fn fail(&mut self, error: SimulationError) {
        self.destination = Destination::Disabled;
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn take_error(&mut self) -> Option<SimulationError> {
        self.error.take()
    }

    pub fn finish(&mut self) -> Result<(), SimulationError> {
        let flushed = match &mut self.destination {
            Destination::Disabled => Ok(()),
            Destination::File(writer) => writer.flush(),
            Destination::Writer(writer) => writer.flush(),
        };
        self.destination = Destination::Disabled;
        if let Err(error) = flushed {
            log::warn!("telemetry flush failed: {}", error);
            self.fail(error.into());
        }
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Drop for TelemetrySink {
    fn drop(&mut self) {
        let flushed = match &mut self.destination {
            Destination::Disabled => Ok(()),
            Destination::File(writer) => writer.flush(),
            Destination::Writer(writer) => writer.flush(),
        };
        if let Err(error) = flushed {
            log::warn!("telemetry flush on drop failed: {}", error);
        }
    }
}

#[derive(Clone, Debug)]
pub struct FlightLog {
    pub records: Vec<TelemetryRecord>,
    max_altitude: f64,
    max_speed: f64,
    min_mass: f64,
}

impl Default for FlightLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightLog {
    pub fn new() -> Self {
        FlightLog {
            records: Vec::new(),
            max_altitude: f64::NEG_INFINITY,
            max_speed: 0.0,
            min_mass: f64::MAX,
        }
    }

    pub fn collect(&mut self, record: TelemetryRecord) {
        self.max_altitude = self.max_altitude.max(record.altitude);
        self.max_speed = self.max_speed.max(record.speed);
        self.min_mass = self.min_mass.min(record.mass);
        self.records.push(record);
    }

    pub fn get_max_altitude(&self) -> Option<f64> {
        self.records.first().map(|_| self.max_altitude)
    }

    pub fn get_max_speed(&self) -> Option<f64> {
        self.records.first().map(|_| self.max_speed)
    }

    pub fn get_min_mass(&self) -> Option<f64> {
        self.records.first().map(|_| self.min_mass)
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.3}s", minutes, seconds)
        } else {
            format!("{:.3}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn display_data(&self) {
        let (Some(max_altitude), Some(max_speed), Some(min_mass)) = (
            self.get_max_altitude(),
            self.get_max_speed(),
            self.get_min_mass(),
        ) else {
            println!("--- No telemetry recorded ---");
            return;
        };

        println!("\n--- Flight Summary ---");
        if let Some(last) = self.records.last() {
            println!("Burn ended at: {}", Self::format_time(last.time));
        }
        println!("Steps recorded: {}", self.records.len());
        println!("Max Altitude: {}", Self::format_altitude(max_altitude));
        println!("Max Speed: {:.2} m/s", max_speed);
        println!("Min Mass: {:.1} kg", min_mass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("telemetry_{}_{}.txt", name, std::process::id()))
    }

    #[test]
    fn test_record_format() {
        let record = TelemetryRecord::new(0.15, 12_061.4, 600.6, 118.0);
        assert_eq!(record.format_record(), "\n0.150\t12061\t601\t118.0");
    }

    #[test]
    fn test_disabled_sink_is_noop() {
        let mut sink = TelemetrySink::open(None).unwrap();
        assert!(!sink.is_enabled());
        sink.record(&TelemetryRecord::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(sink.records_written(), 0);
        assert!(sink.finish().is_ok());

        let empty = TelemetrySink::open(Some(Path::new(""))).unwrap();
        assert!(!empty.is_enabled());
    }

    #[test]
    fn test_file_sink_truncates_and_writes() {
        let path = temp_path("truncate");
        std::fs::write(&path, "stale content that must disappear").unwrap();

        let mut sink = TelemetrySink::open(Some(&path)).unwrap();
        sink.record(&TelemetryRecord::new(0.15, 12_000.0, 600.0, 118.0));
        sink.record(&TelemetryRecord::new(0.25, 12_050.0, 610.0, 116.0));
        sink.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "\n0.150\t12000\t600\t118.0\n0.250\t12050\t610\t116.0");
        assert_eq!(sink.records_written(), 2);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_header_line() {
        let path = temp_path("header");
        let mut sink = TelemetrySink::open(Some(&path)).unwrap();
        sink.write_header(&TelemetryRecord::new(0.05, 12_000.0, 596.4, 120.0));
        sink.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Time (s)\tAltitude (m)\tSpeed (m/s)\tMass (kg)\n0.050\t12000\t596\t120.0"
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_failure_is_resource_error() {
        let path = std::env::temp_dir()
            .join("no_such_directory_for_telemetry")
            .join("out.txt");
        let result = TelemetrySink::open(Some(&path));
        assert!(matches!(result, Err(SimulationError::ResourceError(_))));
    }

    #[test]
    fn test_write_failure_is_kept_not_raised() {
        let mut sink = TelemetrySink::from_writer(Box::new(BrokenWriter));
        sink.record(&TelemetryRecord::new(1.0, 2.0, 3.0, 4.0));
        sink.record(&TelemetryRecord::new(2.0, 2.0, 3.0, 4.0));

        assert!(!sink.is_enabled());
        assert_eq!(sink.records_written(), 0);
        assert!(matches!(
            sink.finish(),
            Err(SimulationError::ResourceError(_))
        ));
    }

    #[test]
    fn test_flight_log_extremes() {
        let mut log = FlightLog::new();
        assert_eq!(log.get_max_altitude(), None);

        log.collect(TelemetryRecord::new(0.1, 100.0, 50.0, 120.0));
        log.collect(TelemetryRecord::new(0.2, 300.0, 40.0, 110.0));
        log.collect(TelemetryRecord::new(0.3, 200.0, 60.0, 100.0));

        assert_eq!(log.get_max_altitude(), Some(300.0));
        assert_eq!(log.get_max_speed(), Some(60.0));
        assert_eq!(log.get_min_mass(), Some(100.0));
        assert_eq!(log.records.len(), 3);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(FlightLog::format_time(5.25), "5.250s");
        assert_eq!(FlightLog::format_time(75.5), "1m 15.500s");
        assert_eq!(FlightLog::format_altitude(950.0), "950.00 m");
        assert_eq!(FlightLog::format_altitude(12_500.0), "12.50 km");
    }
}
