use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, info, session::SessionManager, spotify};

pub async fn profile() {
    let session = SessionManager::open();
    let token = match session.resolve_token(None).await {
        Some(token) => token,
        None => error!("Not authenticated. Please run toptify login"),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching profile...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    match spotify::profile::get_me(&token).await {
        Ok(me) => {
            pb.finish_and_clear();

            let display_name = me.display_name.unwrap_or_else(|| me.id.clone());
            info!("Signed in as {}", display_name);
            info!("Profile: {}", me.external_urls.spotify);
            if let Some(followers) = me.followers {
                info!("Followers: {}", followers.total);
            }
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch profile: {}", e);
        }
    }
}
