#![allow(dead_code)]

use chrono::Utc;
use frinzy_application::{AppContext, SuggestionService};
use frinzy_core::config::RootConfig;
use frinzy_core::profile::{City, Gender, Hobby, HobbySet, NEWCOMER_LABEL, Profile, TraitHints};

pub fn context() -> AppContext {
    context_with(RootConfig::default())
}

pub fn context_with(config: RootConfig) -> AppContext {
    AppContext::in_memory(config, SuggestionService::disabled())
}

pub fn profile(id: &str, city: City, hobbies: &[(&str, &str)]) -> Profile {
    let now = Utc::now();
    Profile {
        id: id.to_string(),
        display_name: id.to_string(),
        age: 22,
        city,
        gender: Gender::PreferNotToSay,
        hobbies: hobbies
            .iter()
            .map(|(i, n)| Hobby::new(*i, *n))
            .collect::<HobbySet>(),
        bio: format!("{} bio", id),
        personality_label: NEWCOMER_LABEL.to_string(),
        binary_choice_selections: Vec::new(),
        vibe_tags: Vec::new(),
        fun_line: None,
        avatar_url: Profile::default_avatar_url(id),
        trait_hints: TraitHints::default(),
        verified: false,
        points: 0,
        created_at: now,
        updated_at: now,
    }
}

pub async fn seed(ctx: &AppContext, id: &str, city: City, hobbies: &[(&str, &str)]) -> Profile {
    let profile = profile(id, city, hobbies);
    ctx.profiles.save(&profile).await.unwrap();
    profile
}

/// Seeds two Delhi gamers.
pub async fn seed_pair(ctx: &AppContext, a: &str, b: &str) {
    seed(ctx, a, City::Delhi, &[("1", "Gaming"), ("2", "Reading"), ("3", "Hiking")]).await;
    seed(ctx, b, City::Delhi, &[("1", "Gaming"), ("4", "Cooking"), ("5", "Music")]).await;
}
