//! Plain-text rendering of scan settings and results for the terminal.

use spinless_db::models::PendingUpdate;
use std::path::Path;

use crate::config::SelectionPolicy;
use crate::scanner::ScanResult;
use crate::texture::FUTURE_DATE;

/// Number of pending updates previewed by default.
pub const DEFAULT_PREVIEW: usize = 10;

const RULE_WIDTH: usize = 50;
const MAX_URL_WIDTH: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Join lines into a block, each line newline-terminated.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Database paths and the effective selection.
pub fn settings(video_db: &Path, texture_db: &Path, policy: &SelectionPolicy) -> String {
    let mut lines = vec![
        format!("Video DB:   {}", video_db.display()),
        format!("Texture DB: {}", texture_db.display()),
        String::new(),
        "Settings:".to_string(),
        format!("  Movies: {}", yes_no(policy.include_movies)),
        format!("  TV Shows: {}", yes_no(policy.include_tvshows)),
    ];
    if policy.include_tvshows {
        lines.push(format!("    Seasons: {}", yes_no(policy.include_seasons)));
        lines.push(format!("    Episodes: {}", yes_no(policy.include_episodes)));
        lines.push(format!("    NFO Logic: {}", policy.episode_nfo_logic));
    }
    let all_local = if policy.update_all_local {
        "Yes"
    } else {
        "No (NFO only)"
    };
    lines.push(format!("  Update All Local: {}", all_local));
    block(lines)
}

/// Keep the tail of long URLs, where the file name is.
pub fn shorten_url(url: &str) -> String {
    let len = url.chars().count();
    if len < MAX_URL_WIDTH {
        return url.to_string();
    }
    let tail: String = url.chars().skip(len - (MAX_URL_WIDTH - 3)).collect();
    format!("...{}", tail)
}

/// The first `limit` pending updates with their before and after stamps.
pub fn preview(updates: &[PendingUpdate], limit: usize) -> String {
    let mut lines = vec![format!("Preview (first {}):", limit)];
    for update in updates.iter().take(limit) {
        let current = match update.current_hash_check.as_deref() {
            None | Some("") => "NULL",
            Some(value) => value,
        };
        lines.push(format!("  [{}] {}", update.texture_id, shorten_url(&update.url)));
        lines.push(format!("       {} -> {}", current, FUTURE_DATE));
    }
    if updates.len() > limit {
        lines.push(format!("  ... and {} more", updates.len() - limit));
    }
    block(lines)
}

/// Per-kind counts of a finished scan.
pub fn summary(result: &ScanResult, policy: &SelectionPolicy) -> String {
    let mut lines = vec!["Summary:".to_string()];
    if policy.include_movies {
        lines.push(format!("  Movies: {}", result.movie_count));
    }
    if policy.include_tvshows {
        lines.push(format!("  TV Shows: {}", result.tvshow_count));
        if policy.include_seasons {
            lines.push(format!("  Seasons: {}", result.season_count));
        }
        if policy.include_episodes {
            lines.push(format!("  Episodes: {}", result.episode_count));
        }
    }
    lines.push(format!("  Total artwork: {}", result.artwork_count));
    lines.push(format!(
        "  Textures to update: {}",
        result.textures_to_update.len()
    ));
    block(lines)
}
