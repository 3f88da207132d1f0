use delay_report::analyzers::aggregate::aggregate_month;
use delay_report::analyzers::series::{SeriesOptions, build_series};
use delay_report::lines::TRACKED_LINES;
use delay_report::output::{ChartView, CsvRenderer, Renderer};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = "train_id,date,stop_sequence,from,from_id,to,to_id,scheduled_time,actual_time,delay_minutes,status,line,type";

fn write_month(dir: &Path, label: &str, delay_for: impl Fn(&str) -> f64) -> PathBuf {
    let mut body = String::from(HEADER);
    body.push('\n');
    for line in TRACKED_LINES {
        body.push_str(&format!(
            "1,{label},1,A,1,B,2,,,{},departed,{line},NJ Transit\n",
            delay_for(line)
        ));
    }
    // Excluded from every result
    body.push_str("2,x,1,A,1,B,2,,,99,departed,Atl. City Line,NJ Transit\n");
    // No delay recorded
    body.push_str("3,x,1,A,1,B,2,,,,cancelled,Main Line,NJ Transit\n");

    let path = dir.join(format!("{label}.csv"));
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_full_pipeline() {
    let dir = env::temp_dir().join("delay_report_it_pipeline");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let month_a = write_month(&dir, "2019_01", |line| match line {
        "Bergen County Line" => 10.0,
        "Main Line" => 20.0,
        _ => 0.0,
    });
    let month_b = write_month(&dir, "2019_02", |_| 0.0);

    let first = aggregate_month(&month_a).unwrap();
    assert!(!first.averages.contains_key("Atl. City Line"));
    assert_eq!(first.get("Main Line"), Some(20.0));

    let series = build_series(&[month_a, month_b], SeriesOptions::default()).unwrap();

    let labels: Vec<_> = series.months.iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["2019_01", "2019_02"]);
    assert_eq!(series.line("Bergen County Line").unwrap(), &[10.0, 0.0]);
    assert_eq!(series.line("Main Line").unwrap(), &[20.0, 0.0]);
    assert!((series.average[0] - 30.0 / 9.0).abs() < 1e-9);
    assert_eq!(series.average[1], 0.0);

    let out = dir.join("series.csv");
    CsvRenderer::new(&out, ChartView::Focused)
        .render(&series)
        .unwrap();
    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.starts_with("month,Average,"));

    fs::remove_dir_all(&dir).unwrap();
}
