use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{TopArtistsResponse, TopTracksResponse},
    utils::TimeRange,
};

/// Retrieves a page of the user's top artists from the Spotify Web API.
///
/// Ranking is computed by Spotify over the given time window. `limit` is
/// capped at 50 by the API; `offset` selects the start of the page.
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried after a 10-second delay. Other
/// errors are propagated immediately.
pub async fn get_top_artists(
    token: &str,
    limit: u32,
    offset: u32,
    time_range: &TimeRange,
) -> Result<TopArtistsResponse, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/me/top/artists?time_range={time_range}&limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            time_range = time_range,
            limit = limit,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        return response.json::<TopArtistsResponse>().await;
    }
}

/// Retrieves a page of the user's top tracks. Same paging and retry
/// behavior as [`get_top_artists`].
pub async fn get_top_tracks(
    token: &str,
    limit: u32,
    offset: u32,
    time_range: &TimeRange,
) -> Result<TopTracksResponse, reqwest::Error> {
    loop {
        let api_url = format!(
            "{uri}/me/top/tracks?time_range={time_range}&limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            time_range = time_range,
            limit = limit,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        return response.json::<TopTracksResponse>().await;
    }
}
