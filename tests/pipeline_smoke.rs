use std::sync::Arc;

use tempfile::TempDir;

use netmgr::{
    checkin::{classifier::classify, events::ClassifiedEvent},
    engine::{tally::TallyReporter, total::TotalCounter, traits::fold},
    error::Error,
    roster::Roster,
    runtime::pipeline::{spawn_file_pipeline, spawn_pipeline, PipelineConfig},
    types::Member,
};

fn roster() -> Roster {
    Roster::from_members([
        Member::new("Herman", "K4LXF", "herman@munster.com"),
        Member::new("Lily", "W6LIL", "lily@munster.com"),
    ])
}

fn tokens() -> Vec<String> {
    ["K4LXF", "N0PE", "", "W6LIL", "K4LXF", "W6LIL"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn pipeline_preserves_order_and_matches_sequential_classifier() {
    let roster = Arc::new(roster());
    let expected: Vec<_> = classify(&roster, tokens()).collect();

    let mut pipeline = spawn_pipeline(Arc::clone(&roster), tokens(), PipelineConfig::default());
    let mut seen = Vec::new();
    while let Some(event) = pipeline.recv().await {
        seen.push(event);
    }
    pipeline.join().await.expect("join");

    assert_eq!(seen, expected);
    assert_eq!(seen.len(), tokens().len() + 1);
    assert_eq!(seen.last(), Some(&ClassifiedEvent::SectionBoundary));
}

#[tokio::test]
async fn pipeline_folds_like_the_sequential_path() {
    let roster = Arc::new(roster());
    let sequential = fold(TallyReporter::default(), classify(&roster, tokens()));

    let pipelined = spawn_pipeline(Arc::clone(&roster), tokens(), PipelineConfig::default())
        .fold(TallyReporter::default())
        .await
        .expect("fold");

    assert_eq!(pipelined, sequential);
    assert_eq!(pipelined.total, 2);
}

#[tokio::test]
async fn file_pipeline_reads_and_normalizes_the_log() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("net_log.txt");
    std::fs::write(&path, "k4lxf\n  w6lil  \n\nK4LXF\n").expect("write");

    let total = spawn_file_pipeline(Arc::new(roster()), &path, PipelineConfig::default())
        .expect("open")
        .fold(TotalCounter::default())
        .await
        .expect("fold");
    assert_eq!(total, 2);
}

#[tokio::test]
async fn file_pipeline_surfaces_missing_log() {
    let tmp = TempDir::new().expect("tmp");
    let res = spawn_file_pipeline(Arc::new(roster()), tmp.path().join("absent.txt"), PipelineConfig::default());
    assert!(matches!(res, Err(Error::Io { .. })));
}
