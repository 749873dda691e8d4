use chrono::NaiveDate;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use tick_profiler::export::export_profile;
use tick_profiler::output::{
    read_profile, save_profile, validate_path, write_profile, DirectoryDestination, FixedName,
    LogFileNaming,
};
use tick_profiler::recorder::{Clock, TickRecorder};
use tick_profiler::utils::OutputError;
use tempfile::NamedTempFile;

fn profiled_recorder() -> TickRecorder<impl Clock> {
    let time = Rc::new(Cell::new(0_i64));
    let handle = Rc::clone(&time);
    let mut recorder = TickRecorder::new(move || handle.get(), 1000.0).unwrap();

    for _ in 0..3 {
        recorder.start_tick().unwrap();
        recorder.push("drive").unwrap();
        time.set(time.get() + 1500);
        recorder.pop().unwrap();
        recorder.push("vision").unwrap();
        time.set(time.get() + 500);
        recorder.pop().unwrap();
        recorder.end_tick().unwrap();
    }
    recorder
}

#[test]
fn test_save_profile_to_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let destination = DirectoryDestination::new(temp_dir.path());
    let recorder = profiled_recorder();

    let name = save_profile(&recorder, &FixedName("match".to_string()), &destination).unwrap();
    assert_eq!(name, "match-profile.json");

    let profile = read_profile(temp_dir.path().join(&name)).unwrap();
    assert_eq!(profile.visit_count, 3);
    assert_eq!(profile.total_time, 6.0);
    assert_eq!(profile.avg_time, 2.0);
    assert_eq!(profile.children["drive"].percent_of_parent, Some(75.0));
    assert_eq!(profile.children["vision"].max_time, 0.5);
}

#[test]
fn test_save_overwrites_previous_profile() {
    let temp_dir = tempfile::tempdir().unwrap();
    let destination = DirectoryDestination::new(temp_dir.path());
    let mut recorder = profiled_recorder();
    let naming = FixedName("run".to_string());

    save_profile(&recorder, &naming, &destination).unwrap();

    recorder.start_tick().unwrap();
    recorder.end_tick().unwrap();
    save_profile(&recorder, &naming, &destination).unwrap();

    let profile = read_profile(destination.path_for("run-profile.json")).unwrap();
    assert_eq!(profile.visit_count, 4);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_save_with_log_file_naming() {
    let temp_dir = tempfile::tempdir().unwrap();
    let destination = DirectoryDestination::new(temp_dir.path());
    let date = NaiveDate::from_ymd_opt(2024, 4, 6)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let naming = LogFileNaming::new("ff01")
        .with_log_date(date)
        .with_match_text("q42");

    let name = save_profile(&profiled_recorder(), &naming, &destination).unwrap();
    assert_eq!(name, "Log_24-04-06_09-30-00_q42-profile.json");
    assert!(destination.path_for(&name).exists());
}

#[test]
fn test_save_without_name_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let destination = DirectoryDestination::new(temp_dir.path());
    let naming: Option<String> = None;

    let result = save_profile(&profiled_recorder(), &naming, &destination);
    assert!(matches!(result, Err(OutputError::NoDestination)));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_write_and_read_profile() {
    let recorder = profiled_recorder();
    let document = export_profile(&recorder.snapshot(), recorder.time_divisor()).unwrap();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_profile(&document, path).unwrap();
    let loaded = read_profile(path).unwrap();

    assert_eq!(loaded.node_count(), 3);
    assert_eq!(loaded.children["drive"].visit_count, 3);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    // Try to write to a directory path
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/profile.json");
    let recorder = profiled_recorder();
    let document = export_profile(&recorder.snapshot(), recorder.time_divisor()).unwrap();

    write_profile(&document, &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_read_profile_rejects_garbage() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    let result = read_profile(temp_file.path());
    assert!(matches!(result, Err(OutputError::SerializationFailed(_))));
}
