use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use frinzy_application::{AppContext, SuggestionService};
use frinzy_core::config::RootConfig;
use frinzy_core::discovery::QueueState;
use frinzy_core::scoring::{score, shared_hobbies};

use super::profiles::open_store;

pub async fn run(config: RootConfig, data_dir: Option<PathBuf>, viewer_id: &str) -> Result<()> {
    let store = Arc::new(open_store(data_dir)?);
    let ctx = AppContext::with_profile_store(config, store, SuggestionService::disabled());
    let session = ctx.discovery.open(viewer_id).await?;

    if session.state() == QueueState::InitialEmpty {
        println!("Nobody in {} shares a hobby with {} yet.", session.viewer().city, viewer_id);
        return Ok(());
    }

    for (rank, candidate) in session.queue().profiles().enumerate() {
        let shared: Vec<&str> = shared_hobbies(candidate, session.viewer())
            .into_iter()
            .map(|h| h.name.as_str())
            .collect();
        println!(
            "{:>2}. {:<10} score {:>3}  shared: {}",
            rank + 1,
            candidate.display_name,
            score(session.viewer(), candidate),
            shared.join(", ")
        );
    }
    Ok(())
}
