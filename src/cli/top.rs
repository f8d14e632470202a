use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    session::SessionManager,
    spotify,
    types::{ArtistTableRow, TrackTableRow},
    utils::{self, TimeRange},
};

pub async fn top_artists(limit: u32, offset: u32, time_range: TimeRange) {
    let session = SessionManager::open();
    let token = match session.resolve_token(None).await {
        Some(token) => token,
        None => error!("Not authenticated. Please run toptify login"),
    };

    let pb = spinner("Fetching top artists...");

    match spotify::top::get_top_artists(&token, limit, offset, &time_range).await {
        Ok(res) => {
            pb.finish_and_clear();

            let table_rows: Vec<ArtistTableRow> = res
                .items
                .into_iter()
                .enumerate()
                .map(|(i, a)| ArtistTableRow {
                    rank: offset as usize + i + 1,
                    name: a.name,
                    genres: a
                        .genres
                        .iter()
                        .take(3)
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(","),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("Top artists ({})\n{}", time_range.label(), table);
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch top artists: {}", e);
        }
    }
}

pub async fn top_tracks(limit: u32, offset: u32, time_range: TimeRange) {
    let session = SessionManager::open();
    let token = match session.resolve_token(None).await {
        Some(token) => token,
        None => error!("Not authenticated. Please run toptify login"),
    };

    let pb = spinner("Fetching top tracks...");

    match spotify::top::get_top_tracks(&token, limit, offset, &time_range).await {
        Ok(res) => {
            pb.finish_and_clear();

            let table_rows: Vec<TrackTableRow> = res
                .items
                .into_iter()
                .enumerate()
                .map(|(i, t)| TrackTableRow {
                    rank: offset as usize + i + 1,
                    name: t.name,
                    artists: utils::join_artist_names(&t.artists),
                    album: t.album.name,
                    length: utils::format_track_length(t.duration_ms),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("Top tracks ({})\n{}", time_range.label(), table);
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch top tracks: {}", e);
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
