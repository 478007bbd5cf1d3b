use chrono::Utc;
use frinzy_core::profile::{City, Gender, NEWCOMER_LABEL, Profile, TraitHints, catalog};
use frinzy_core::scoring::{ScoreBreakdown, shared_hobbies};

fn sketch(id: &str, hobbies: &[String]) -> Profile {
    let now = Utc::now();
    Profile {
        id: id.to_string(),
        display_name: id.to_string(),
        age: 18,
        city: City::Delhi,
        gender: Gender::PreferNotToSay,
        hobbies: hobbies.iter().map(|n| catalog::hobby_by_name(n)).collect(),
        bio: String::new(),
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

pub fn run(a: &[String], b: &[String]) {
    let a = sketch("a", a);
    let b = sketch("b", b);
    let breakdown = ScoreBreakdown::between(&a, &b);
    let shared: Vec<&str> = shared_hobbies(&a, &b)
        .into_iter()
        .map(|h| h.name.as_str())
        .collect();

    println!("score: {}", breakdown.total());
    println!("shared hobbies ({}): {}", breakdown.shared_hobbies, shared.join(", "));
}
