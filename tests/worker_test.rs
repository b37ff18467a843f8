//! Background scan and apply tasks.

mod common;

use assert_matches::assert_matches;
use common::KodiFixture;
use spinless::config::SelectionPolicy;
use spinless::texture::FUTURE_DATE;
use spinless::worker::{spawn_apply, spawn_scan, ScanEvent};
use spinless_common::Error;

fn library_with_movies(count: i64) -> KodiFixture {
    let mut fx = KodiFixture::new();
    for id in 1..=count {
        let folder = fx.folder(&format!("m{}", id), &["movie.nfo"]);
        fx.add_movie(id, &folder);
        let url = format!("{}poster.jpg", folder);
        fx.add_art(id, "movie", "poster", &url);
        fx.add_texture(id, &spinless::texture::normalize_texture_url(&url), Some(""));
    }
    fx
}

#[tokio::test]
async fn test_scan_streams_events_then_result() {
    let fx = library_with_movies(150);
    let mut task = spawn_scan(fx.scanner(), SelectionPolicy::default());

    let mut lines = Vec::new();
    let mut progress = Vec::new();
    while let Some(event) = task.next_event().await {
        match event {
            ScanEvent::Log(line) => lines.push(line),
            ScanEvent::Progress(p) => progress.push((p.processed, p.total)),
        }
    }
    let result = task.wait().await.unwrap();

    assert_eq!(result.movie_count, 150);
    assert_eq!(result.textures_to_update.len(), 150);
    assert_eq!(lines.first().map(String::as_str), Some("Scanning movies..."));
    assert_eq!(lines.last().map(String::as_str), Some("  Artwork not yet cached: 0"));
    assert_eq!(progress, vec![(100, 150), (150, 150)]);
}

#[tokio::test]
async fn test_wait_without_reading_events() {
    let fx = library_with_movies(3);
    let task = spawn_scan(fx.scanner(), SelectionPolicy::default());

    let result = task.wait().await.unwrap();
    assert_eq!(result.textures_to_update.len(), 3);
}

#[tokio::test]
async fn test_apply_task() {
    let fx = library_with_movies(2);
    let result = spawn_scan(fx.scanner(), SelectionPolicy::default())
        .wait()
        .await
        .unwrap();

    let mut task = spawn_apply(fx.applier(), result.textures_to_update);
    let mut lines = Vec::new();
    while let Some(event) = task.next_event().await {
        if let ScanEvent::Log(line) = event {
            lines.push(line);
        }
    }
    assert_eq!(task.wait().await.unwrap(), 2);
    assert_eq!(lines, vec!["Applying updates...", "  Updated 2 textures"]);
    assert_eq!(fx.hash_check(1).as_deref(), Some(FUTURE_DATE));
    assert_eq!(fx.hash_check(2).as_deref(), Some(FUTURE_DATE));
}

#[tokio::test]
async fn test_apply_task_reports_lock() {
    let fx = library_with_movies(1);
    let result = spawn_scan(fx.scanner(), SelectionPolicy::default())
        .wait()
        .await
        .unwrap();

    let applier = fx.applier();
    fx.textures.execute_batch("BEGIN EXCLUSIVE").unwrap();

    let err = spawn_apply(applier, result.textures_to_update)
        .wait()
        .await
        .unwrap_err();
    assert_matches!(err, Error::StoreLocked { .. });

    fx.textures.execute_batch("ROLLBACK").unwrap();
    assert_eq!(fx.hash_check(1).as_deref(), Some(""));
}
