//! Messages destinés à la console

use crate::assembly::{CoverStatus, RunSummary};
use crate::parser::SongQuery;
use chrono::Datelike;
use mixcovers::month_name;

/// `Starting playlist creation for October 2026...`
pub fn start_banner(date: &impl Datelike) -> String {
    format!(
        "Starting playlist creation for {} {}...",
        month_name(date.month()).unwrap_or_default(),
        date.year()
    )
}

/// Liste des chansons introuvables, `None` si toutes ont été trouvées
pub fn not_found_report(not_found: &[SongQuery]) -> Option<String> {
    if not_found.is_empty() {
        return None;
    }

    let mut lines = vec![format!(
        "Could not find {} tracks on Spotify:",
        not_found.len()
    )];
    lines.extend(
        not_found
            .iter()
            .map(|song| format!("  - {} - {}", song.artist, song.title)),
    );
    Some(lines.join("\n"))
}

/// Résumé final d'une exécution menée à terme
pub fn summary_report(summary: &RunSummary) -> String {
    let mut lines = vec![format!(
        "Playlist '{}': {} of {} tracks added",
        summary.playlist.name, summary.added, summary.songs
    )];
    if let Some(url) = &summary.playlist.external_urls.spotify {
        lines.push(url.clone());
    }
    if let CoverStatus::Failed(reason) = &summary.cover {
        lines.push(format!("Cover not updated: {}", reason));
    }
    lines.extend(not_found_report(&summary.not_found));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_start_banner() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(
            start_banner(&date),
            "Starting playlist creation for October 2026..."
        );
    }

    #[test]
    fn test_not_found_report() {
        assert_eq!(not_found_report(&[]), None);

        let report = not_found_report(&[
            SongQuery::new("Baz", "Qux"),
            SongQuery::new("Foo", "Bar"),
        ])
        .unwrap();
        assert_eq!(
            report,
            "Could not find 2 tracks on Spotify:\n  - Baz - Qux\n  - Foo - Bar"
        );
    }

    #[test]
    fn test_summary_report() {
        use mixspotify::models::ExternalUrls;
        use mixspotify::Playlist;

        let summary = RunSummary {
            playlist: Playlist {
                id: "pl1".into(),
                name: "r/listentothis 3/2025".into(),
                description: None,
                public: Some(true),
                external_urls: ExternalUrls {
                    spotify: Some("https://open.spotify.com/playlist/pl1".into()),
                },
            },
            songs: 2,
            found: Vec::new(),
            not_found: vec![SongQuery::new("Baz", "Qux")],
            added: 1,
            batches: 1,
            cover: CoverStatus::Failed("status 404".into()),
        };

        assert_eq!(
            summary_report(&summary),
            "Playlist 'r/listentothis 3/2025': 1 of 2 tracks added\n\
             https://open.spotify.com/playlist/pl1\n\
             Cover not updated: status 404\n\
             Could not find 1 tracks on Spotify:\n  - Baz - Qux"
        );
    }
}
