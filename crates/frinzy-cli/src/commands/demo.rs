//! End-to-end walkthrough against the in-memory store.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use frinzy_application::{AppContext, SuggestionService};
use frinzy_core::config::RootConfig;
use frinzy_core::discovery::QueueState;
use frinzy_core::events::EventRepository;
use frinzy_core::profile::{
    City, Credentials, DraftPatch, Gender, HobbySet, PersonalityQuiz, Profile, catalog,
};
use tracing::info;

use super::roster::{sample_events, sample_profiles};

const NEWCOMER_ID: &str = "you";
const LIVE_WAIT: Duration = Duration::from_secs(2);

pub async fn run(config: RootConfig, city: City) -> Result<()> {
    let suggestions = SuggestionService::from_settings(&config.oracle)?;
    if !suggestions.has_oracle() {
        info!("[Demo] No suggestion oracle configured, using fallbacks");
    }
    let ctx = AppContext::in_memory(config, suggestions);

    let roster = sample_profiles();
    for profile in &roster {
        ctx.profiles.save(profile).await?;
    }
    println!("== Seeded {} members", roster.len());

    let me = onboard(&ctx, city).await?;
    println!(
        "== Onboarded {} ({}, {}) as {}",
        me.display_name, me.age, me.city, me.personality_label
    );
    println!("   avatar: {}", me.avatar_url);

    events(&ctx, &me).await?;

    // Everyone local already liked the newcomer, so likes below are reciprocal.
    for fan in roster.iter().filter(|p| p.city == me.city) {
        ctx.recorder.record_decision(&fan.id, &me.id, true).await?;
    }
    let inbox = ctx.recorder.incoming_likes(&me.id).await?;
    println!("== {} likes waiting", inbox.len());

    discover(&ctx, &me).await?;

    let matches = ctx.recorder.matches_for(&me.id).await?;
    let Some(first) = matches.first() else {
        println!("== No matches this time");
        return Ok(());
    };
    let partner_id = first
        .other_member(&me.id)
        .context("match does not include the demo member")?
        .to_string();
    let partner = ctx.profile_service.get(&partner_id).await?;

    chat(&ctx, &me, &partner, &first.id).await
}

async fn onboard(ctx: &AppContext, city: City) -> Result<Profile> {
    let mut session = ctx.onboarding(NEWCOMER_ID);
    let hobbies: HobbySet = ["Gaming", "Reading", "Board Games", "Coding"]
        .iter()
        .map(|n| catalog::hobby_by_name(n))
        .collect();

    let steps = [
        DraftPatch::new()
            .display_name("Newcomer")
            .credentials(Credentials::new("you@example.com", "correct horse")),
        DraftPatch::new()
            .age(21)
            .gender(Gender::PreferNotToSay)
            .city(city)
            .hobbies(hobbies)
            .bio("New in town, up for games and good books."),
        DraftPatch::new().binary_choices(["Small group", "Night owl"]),
        DraftPatch::new().vibe_tags(["Low-key", "Cooperative"]),
        DraftPatch::new().fun_line(catalog::random_fun_line_prompt().replace("____", "snacks")),
    ];
    for patch in steps {
        let step = session.current_step();
        session.complete_step(patch)?;
        println!("   {} done ({}%)", step, step.progress_percent());
    }

    let mut quiz = PersonalityQuiz::new();
    while let Some(question) = quiz.current_question() {
        quiz.answer(question.options[0])?;
    }
    if let Some(personality) = quiz.result() {
        session.set_personality(personality);
    }

    session.generate_avatar(&ctx.suggestions).await;
    Ok(session.finalize().await?)
}

async fn events(ctx: &AppContext, me: &Profile) -> Result<()> {
    let now = Utc::now();
    for event in sample_events(now)? {
        ctx.store.save_event(&event).await?;
    }

    let upcoming = ctx.events.upcoming_for(&me.id, now).await?;
    println!("== {} upcoming events in {}", upcoming.len(), me.city);
    for event in &upcoming {
        println!(
            "   {} on {} ({} attending)",
            event.title,
            event.starts_at.format("%a %d %b"),
            event.attendee_count()
        );
    }
    if let Some(first) = upcoming.first() {
        let joined = ctx.events.attend(&first.id, &me.id).await?;
        println!("   RSVP'd to {}, now {} attending", joined.title, joined.attendee_count());
    }
    Ok(())
}

async fn discover(ctx: &AppContext, me: &Profile) -> Result<()> {
    let mut session = ctx.discovery.open(&me.id).await?;
    if session.state() == QueueState::InitialEmpty {
        println!("== Nobody in {} shares a hobby yet", me.city);
        return Ok(());
    }

    println!("== Discovery queue ({} candidates)", session.queue().len());
    while let Some(candidate) = session.current() {
        let name = candidate.profile.display_name.clone();
        let score = candidate.score;
        let outcome = session.like().await?;
        let note = if outcome.match_created { "  -> matched!" } else { "" };
        println!("   liked {:<8} score {:>3}{}", name, score, note);
    }
    Ok(())
}

async fn chat(ctx: &AppContext, me: &Profile, partner: &Profile, match_id: &str) -> Result<()> {
    let icebreakers = ctx.suggestions.icebreakers(me, partner).await;
    println!("== Icebreakers for {}", partner.display_name);
    for line in &icebreakers {
        println!("   - {}", line);
    }

    let mut session = ctx.chat.open(match_id, &me.id).await?;
    let opener = icebreakers
        .first()
        .map(String::as_str)
        .unwrap_or("Hey! Want to meet up this weekend?");
    session.send(opener).await?;
    ctx.chat
        .send(match_id, &partner.id, "Yes! Saturday afternoon works for me.")
        .await?;

    match tokio::time::timeout(LIVE_WAIT, session.next_live()).await {
        Ok(Some(reply)) => info!("[Demo] Live reply {} received", reply.id),
        Ok(None) => info!("[Demo] Live feed closed"),
        Err(_) => info!("[Demo] No live reply within {:?}", LIVE_WAIT),
    }

    println!("== Chat with {} ({})", partner.display_name, session.state());
    for entry in session.entries() {
        let who = if entry.message.sender_id == me.id {
            me.display_name.as_str()
        } else {
            partner.display_name.as_str()
        };
        println!("   [{:?}] {}: {}", entry.status, who, entry.message.text);
    }
    session.close();
    Ok(())
}
