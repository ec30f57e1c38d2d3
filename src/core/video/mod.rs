//! Video Utilities
//!
//! URL → video-id extraction and bookmark time formatting. Pure string
//! helpers; the rest of the crate treats video ids as opaque.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{TimeSec, VideoId};

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})",
        )
        .expect("valid URL pattern")
    })
}

fn bare_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid id pattern"))
}

/// Extracts the 11-character video id from a URL or bare id string.
///
/// Accepts watch URLs, short links, embeds, shorts, live URLs, and the bare
/// id itself. Returns `None` when no id is recognizable.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if bare_id_pattern().is_match(input) {
        return Some(input.to_string());
    }
    url_pattern()
        .captures(input)
        .map(|caps| caps[1].to_string())
}

/// Formats a playback position for display: `m:ss`, or `h:mm:ss` from one
/// hour up. Non-finite and negative times render as `0:00`.
pub fn format_time(time: TimeSec) -> String {
    let total = if time.is_finite() && time > 0.0 {
        time.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
