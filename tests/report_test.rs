/*!
 * Report Tests
 * Aggregate statistics over a directory of benchmark traces
 */

use pretty_assertions::assert_eq;
use rtos_trace::report::{self, TaskTimelines};
use rtos_trace::{EventKind, ParseError, ParseMode, ReportConfig, ReportError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One benchmark run: (task, arrive, start, end)
fn run_log(records: &[(u32, u64, u64, u64)]) -> String {
    let mut out = String::from("Running on qemu\nWe are running llref\nAll tasks done\n");
    out.push_str("---OUTPUT START---\n");
    for &(task, arrive, _, _) in records {
        out.push_str(&format!("{} ms | ARRIVE task{}\n", arrive, task));
    }
    for &(task, _, start, end) in records {
        out.push_str(&format!("{} ms | START task{}\n", start, task));
        out.push_str(&format!("{} ms | END task{}\n", end, task));
    }
    out.push_str("----OUTPUT END----\nBenchmarks finished\n");
    out
}

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn test_set_count_matches_task_zero_starts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "run1.log", &run_log(&[(0, 0, 1, 5), (1, 0, 5, 9)]));
    write(dir.path(), "run2.log", &run_log(&[(0, 0, 2, 6), (1, 0, 6, 8)]));
    write(dir.path(), "run3.txt", &run_log(&[(0, 0, 3, 7), (1, 0, 1, 3)]));

    let timelines = TaskTimelines::from_dir(dir.path(), ParseMode::Lenient).unwrap();
    assert_eq!(timelines.sample_sets(Some(2)).unwrap(), 3);
    assert_eq!(timelines.task(0).unwrap().starts.len(), 3);
}

#[test]
fn test_files_visited_in_name_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.log", &run_log(&[(0, 100, 101, 102)]));
    write(dir.path(), "a.log", &run_log(&[(0, 0, 1, 2)]));

    let timelines = TaskTimelines::from_dir(dir.path(), ParseMode::Lenient).unwrap();
    assert_eq!(timelines.task(0).unwrap().arrivals, vec![0, 100]);
}

#[test]
fn test_summary_values() {
    let dir = TempDir::new().unwrap();
    // set 1: makespan 10, turnarounds 5 3 10, responses 1 0 2
    write(
        dir.path(),
        "run1.log",
        &run_log(&[(0, 0, 1, 5), (1, 0, 0, 3), (2, 0, 2, 10)]),
    );
    // set 2: makespan 6, turnarounds 6 2 4, responses 0 1 2
    write(
        dir.path(),
        "run2.log",
        &run_log(&[(0, 10, 10, 16), (1, 10, 11, 12), (2, 10, 12, 14)]),
    );

    let summary = report::run(&ReportConfig::new(dir.path())).unwrap();
    assert_eq!(summary.sets, 2);
    assert_eq!(summary.tasks, 3);
    assert_eq!(summary.average_makespan_ms, 8.0);
    assert_eq!(summary.average_turnaround_ms, 5.0);
    assert_eq!(summary.average_response_ms, 1.0);

    let text = summary.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Discovered 2 sets of data",
            "Average makespan: 8.00ms",
            "Average turnaround time: 5.00ms",
            "Average response time: 1.00ms",
        ]
    );
}

#[test]
fn test_mismatched_sets_abort() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "run1.log", &run_log(&[(0, 0, 1, 5), (1, 0, 5, 9)]));
    write(dir.path(), "run2.log", &run_log(&[(0, 0, 2, 6)]));

    let err = report::run(&ReportConfig::new(dir.path())).unwrap_err();
    match err {
        ReportError::Inconsistent {
            task,
            expected,
            found,
            ..
        } => {
            assert_eq!(task, 1);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_largest_task_id_does_not_hide_missing_tasks() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "run1.log",
        &run_log(&[(0, 0, 1, 5), (u32::MAX, 0, 2, 6)]),
    );

    assert!(matches!(
        report::run(&ReportConfig::new(dir.path())),
        Err(ReportError::Inconsistent {
            task: 1,
            kind: EventKind::Start,
            found: 0,
            ..
        })
    ));
}

#[test]
fn test_expected_task_count_catches_missing_task() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "run1.log", &run_log(&[(0, 0, 1, 5), (1, 0, 5, 9)]));

    let mut config = ReportConfig::new(dir.path());
    config.tasks = Some(8);
    assert!(matches!(
        report::run(&config),
        Err(ReportError::Inconsistent {
            task: 2,
            kind: EventKind::Start,
            ..
        })
    ));
}

#[test]
fn test_region_state_resets_per_file() {
    let dir = TempDir::new().unwrap();
    // Region left open at the end of the first file
    write(
        dir.path(),
        "a.log",
        "OUTPUT START\n0 ms | ARRIVE task0\n1 ms | START task0\n2 ms | END task0\n",
    );
    // Outside any region, must not be read
    write(
        dir.path(),
        "b.log",
        "0 ms | ARRIVE task0\n1 ms | START task0\n2 ms | END task0\n",
    );

    let timelines = TaskTimelines::from_dir(dir.path(), ParseMode::Lenient).unwrap();
    assert_eq!(timelines.sample_sets(None).unwrap(), 1);
}

#[test]
fn test_repeated_regions_in_one_file() {
    let dir = TempDir::new().unwrap();
    let text = format!(
        "{}{}",
        run_log(&[(0, 0, 1, 3)]),
        run_log(&[(0, 0, 2, 4)])
    );
    write(dir.path(), "runs.log", &text);

    let summary = report::run(&ReportConfig::new(dir.path())).unwrap();
    assert_eq!(summary.sets, 2);
    assert_eq!(summary.average_turnaround_ms, 3.5);
}

#[test]
fn test_empty_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        report::run(&ReportConfig::new(dir.path())),
        Err(ReportError::EmptyCorpus { .. })
    ));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        report::run(&ReportConfig::new(&missing)),
        Err(ReportError::Io { .. })
    ));
}

#[test]
fn test_strict_mode_rejects_noise_in_region() {
    let dir = TempDir::new().unwrap();
    let mut text = run_log(&[(0, 0, 1, 5)]);
    text = text.replace("---OUTPUT START---\n", "---OUTPUT START---\nTask 0 finished at time 5 ms\n");
    write(dir.path(), "run1.log", &text);

    let mut config = ReportConfig::new(dir.path());
    assert!(report::run(&config).is_ok());

    config.mode = ParseMode::Strict;
    assert!(matches!(
        report::run(&config),
        Err(ReportError::Parse(ParseError::MalformedLine { line: 5, .. }))
    ));
}

#[test]
fn test_summary_json_fields() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "run1.log", &run_log(&[(0, 0, 2, 4), (1, 0, 1, 6)]));

    let summary = report::run(&ReportConfig::new(dir.path())).unwrap();
    let value = serde_json::to_value(summary).unwrap();
    assert_eq!(value["sets"], 1);
    assert_eq!(value["tasks"], 2);
    assert_eq!(value["average_makespan_ms"], 6.0);
    assert_eq!(value["average_turnaround_ms"], 5.0);
    assert_eq!(value["average_response_ms"], 1.5);
}
