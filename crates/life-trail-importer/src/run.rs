//! Sequential import pipelines
//!
//! Batch mode scans the source directory and converts every supported file in
//! sorted order, appending all rows to one CSV. The running start timestamp
//! is advanced past each file's rows so a multi-file trail stays contiguous.

use std::fs;
use std::path::Path;

use life_trail_lib::{ConvertConfig, TrailRow, convert};

use crate::adaptor::adaptor_for_path;
use crate::config::ImportProfile;
use crate::error::{ImportError, Result};
use crate::scan::collect_track_files;
use crate::settings::Settings;
use crate::sink::CsvSink;

/// Entry point: single-file mode when `--input-file` is given, else batch
pub fn run(settings: &Settings) -> Result<()> {
    let mut profile = ImportProfile::load_or_default(&settings.config)?;
    settings.apply_to(&mut profile);
    if settings.save_config {
        profile.save(&settings.config)?;
        tracing::info!(path = %settings.config.display(), "saved profile");
    }
    let config = profile.resolved()?;

    match &settings.input_file {
        Some(path) => run_single(path, &settings.output, &config),
        None => run_batch(&settings.source_dir, &settings.output, config),
    }
}

fn run_single(input: &Path, output: &Path, config: &ConvertConfig) -> Result<()> {
    let mut sink = CsvSink::open(output)?;
    let rows = convert_file(input, config)?;
    sink.append_rows(&rows)?;
    sink.flush()?;
    tracing::info!(file = %input.display(), rows = rows.len(), "import finished");
    Ok(())
}

fn run_batch(source_dir: &Path, output: &Path, mut config: ConvertConfig) -> Result<()> {
    let files = collect_track_files(source_dir)?;
    if files.is_empty() {
        tracing::warn!(dir = %source_dir.display(), "no track files found");
        return Ok(());
    }
    tracing::info!(count = files.len(), dir = %source_dir.display(), "found track files");

    let mut sink = CsvSink::open(output)?;
    let mut total_rows = 0usize;

    for (index, file) in files.iter().enumerate() {
        tracing::info!(index, file = %file.display(), "processing track file");
        let rows = convert_file(file, &config).inspect_err(
            |error| tracing::error!(file = %file.display(), %error, "failed to process file"),
        )?;
        sink.append_rows(&rows)?;
        total_rows += rows.len();

        // Keep the multi-file trail contiguous: the next file starts one
        // second after the last row just written.
        if let Some(last) = rows.last() {
            config.start_timestamp = last.timestamp + 1;
        }
    }

    sink.flush()?;
    tracing::info!(files = files.len(), rows = total_rows, "batch import finished");
    Ok(())
}

/// Parse one track file and convert it into trail rows
pub fn convert_file(path: &Path, config: &ConvertConfig) -> Result<Vec<TrailRow>> {
    let adaptor =
        adaptor_for_path(path).ok_or_else(|| ImportError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read(path)?;
    let points = adaptor.parse(&content)?;
    Ok(convert(config, &points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "life-trail-run-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_json_track(path: &Path, base_lat: f64) {
        let track = format!(
            r#"[{{"lat": {}, "lng": 10.0}}, {{"lat": {}, "lng": 10.0}}]"#,
            base_lat,
            base_lat + 0.0001
        );
        fs::write(path, track).unwrap();
    }

    #[test]
    fn test_convert_file_rejects_unknown_extension() {
        let config = ConvertConfig::default();
        let result = convert_file(Path::new("notes.txt"), &config);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_batch_chains_timestamps_across_files() {
        let dir = temp_dir("chain");
        write_json_track(&dir.join("01.json"), 50.0);
        write_json_track(&dir.join("02.json"), 51.0);
        let output = dir.join("out/trail.csv");

        let settings = Settings::parse_from([
            "life-trail-importer",
            "--source-dir",
            dir.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--config",
            dir.join("config.json").to_str().unwrap(),
            "--start-time",
            "2020-10-20 00:00:00",
            "--timezone",
            "+00:00",
            "--no-densify",
        ]);
        run(&settings).unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        fs::remove_dir_all(&dir).ok();

        let lines: Vec<_> = contents.lines().collect();
        // Header plus two rows per file
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "timestamp,latitude,longitude,altitude,speed");

        let timestamps: Vec<i64> = lines[1..]
            .iter()
            .map(|line| line.split(',').next().unwrap().parse().unwrap())
            .collect();
        // 1 s interval inside a file, and file 2 continues after file 1
        assert_eq!(
            timestamps,
            vec![
                1_603_152_000,
                1_603_152_001,
                1_603_152_002,
                1_603_152_003
            ]
        );
    }

    #[test]
    fn test_single_file_mode() {
        let dir = temp_dir("single");
        let input = dir.join("walk.json");
        write_json_track(&input, 48.0);
        let output = dir.join("single.csv");

        let settings = Settings::parse_from([
            "life-trail-importer",
            "--input-file",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--config",
            dir.join("config.json").to_str().unwrap(),
            "--start-time",
            "2020-10-20 00:00:00",
            "--timezone",
            "+00:00",
            "--speed-mode",
            "manual",
            "--manual-speed",
            "3.0",
        ]);
        run(&settings).unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        fs::remove_dir_all(&dir).ok();

        let lines: Vec<_> = contents.lines().collect();
        assert!(lines.len() >= 3);
        assert!(lines[1].ends_with(",3.0"));
        assert!(lines[1].starts_with("1603152000,"));
    }

    #[test]
    fn test_batch_fails_on_corrupt_file() {
        let dir = temp_dir("corrupt");
        fs::write(dir.join("bad.gpx"), "not xml").unwrap();
        let output = dir.join("out.csv");

        let settings = Settings::parse_from([
            "life-trail-importer",
            "--source-dir",
            dir.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--config",
            dir.join("config.json").to_str().unwrap(),
        ]);
        let result = run(&settings);
        fs::remove_dir_all(&dir).ok();
        assert!(result.is_err());
    }
}
