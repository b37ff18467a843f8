//! Shared test harness for integration tests.
//!
//! Provides [`KodiFixture`], a temporary Kodi profile: a video library store,
//! a texture cache store and a media folder tree, with helpers to populate
//! all three.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params, Connection};
use spinless::applier::Applier;
use spinless::scanner::Scanner;
use spinless_common::{NfoProbe, StaticEnvironment};
use spinless_db::pool::{open_texture_pool, open_video_pool};
use spinless_db::schema::{init_texture_store, init_video_store};
use tempfile::TempDir;

pub const VIDEO_DB: &str = "MyVideos131.db";
pub const TEXTURE_DB: &str = "Textures13.db";

/// A temporary Kodi profile on disk.
pub struct KodiFixture {
    pub dir: TempDir,
    pub video: Connection,
    pub textures: Connection,
    next_id: i64,
}

impl KodiFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("media")).unwrap();
        let video = init_video_store(&dir.path().join(VIDEO_DB)).expect("video store");
        let textures = init_texture_store(&dir.path().join(TEXTURE_DB)).expect("texture store");

        Self {
            dir,
            video,
            textures,
            next_id: 1000,
        }
    }

    pub fn video_path(&self) -> PathBuf {
        self.dir.path().join(VIDEO_DB)
    }

    pub fn texture_path(&self) -> PathBuf {
        self.dir.path().join(TEXTURE_DB)
    }

    /// Create `media/<name>` with the given empty files; returns it with a
    /// trailing separator, the way Kodi stores folders.
    pub fn folder(&self, name: &str, files: &[&str]) -> String {
        let dir = self.dir.path().join("media").join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"").unwrap();
        }
        format!("{}/", dir.display())
    }

    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn add_path(&mut self, folder: &str) -> i64 {
        let id = self.id();
        self.video
            .execute(
                "INSERT INTO path (idPath, strPath) VALUES (?1, ?2)",
                params![id, folder],
            )
            .unwrap();
        id
    }

    fn add_file(&mut self, path_id: i64, file_name: &str) -> i64 {
        let id = self.id();
        self.video
            .execute(
                "INSERT INTO files (idFile, idPath, strFilename) VALUES (?1, ?2, ?3)",
                params![id, path_id, file_name],
            )
            .unwrap();
        id
    }

    pub fn add_movie(&mut self, id: i64, folder: &str) {
        let path_id = self.add_path(folder);
        let file_id = self.add_file(path_id, "movie.mkv");
        self.video
            .execute(
                "INSERT INTO movie (idMovie, idFile, c00) VALUES (?1, ?2, 'Movie')",
                params![id, file_id],
            )
            .unwrap();
    }

    pub fn add_show(&mut self, id: i64, folder: &str) {
        let path_id = self.add_path(folder);
        self.video
            .execute(
                "INSERT INTO tvshow (idShow, c00) VALUES (?1, 'Show')",
                params![id],
            )
            .unwrap();
        self.video
            .execute(
                "INSERT INTO tvshowlinkpath (idShow, idPath) VALUES (?1, ?2)",
                params![id, path_id],
            )
            .unwrap();
    }

    pub fn add_season(&mut self, id: i64, show_id: i64) {
        self.video
            .execute(
                "INSERT INTO seasons (idSeason, idShow, season) VALUES (?1, ?2, 1)",
                params![id, show_id],
            )
            .unwrap();
    }

    pub fn add_episode(
        &mut self,
        id: i64,
        show_id: i64,
        season_id: i64,
        folder: &str,
        file_name: &str,
    ) {
        let path_id = self.add_path(folder);
        let file_id = self.add_file(path_id, file_name);
        self.video
            .execute(
                "INSERT INTO episode (idEpisode, idFile, idShow, idSeason) VALUES (?1, ?2, ?3, ?4)",
                params![id, file_id, show_id, season_id],
            )
            .unwrap();
    }

    pub fn add_art(&self, media_id: i64, media_type: &str, art_type: &str, url: &str) {
        self.video
            .execute(
                "INSERT INTO art (media_id, media_type, type, url) VALUES (?1, ?2, ?3, ?4)",
                params![media_id, media_type, art_type, url],
            )
            .unwrap();
    }

    pub fn add_texture(&self, id: i64, url: &str, last_hash_check: Option<&str>) {
        self.textures
            .execute(
                "INSERT INTO texture (id, url, cachedurl, lasthashcheck) VALUES (?1, ?2, ?3, ?4)",
                params![id, url, format!("{}/{}.jpg", id % 16, id), last_hash_check],
            )
            .unwrap();
    }

    pub fn hash_check(&self, id: i64) -> Option<String> {
        self.textures
            .query_row(
                "SELECT lasthashcheck FROM texture WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .unwrap()
    }

    pub fn probe(&self) -> NfoProbe {
        NfoProbe::new(Arc::new(StaticEnvironment::linux(self.dir.path())))
    }

    pub fn scanner(&self) -> Scanner {
        Scanner::new(
            open_video_pool(&self.video_path()).unwrap(),
            open_texture_pool(&self.texture_path()).unwrap(),
            self.probe(),
        )
    }

    pub fn applier(&self) -> Applier {
        Applier::new(
            open_texture_pool(&self.texture_path()).unwrap(),
            self.texture_path().display().to_string(),
        )
    }

    /// Write `content` as the config file `spinless.toml` in the profile dir.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("spinless.toml");
        fs::write(&path, content).unwrap();
        path
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for KodiFixture {
    fn default() -> Self {
        Self::new()
    }
}
