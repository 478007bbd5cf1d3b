//! Prompt templates for the suggestion oracle.

use frinzy_core::profile::{Hobby, Profile};
use frinzy_core::scoring::shared_hobbies;
use frinzy_core::{FrinzyError, Result};
use minijinja::{Environment, context};

const ICEBREAKER_TEMPLATE: &str = "\
Generate 3 fun, quirky, and short icebreaker messages for two new friends who just matched \
on a friendship app called Frinzy. Do not include greetings like \"Hey\" or \"Hi\".

User 1: Personality is {{ first.personality }}, likes {{ first.hobbies | join(\", \") }}.
User 2: Personality is {{ second.personality }}, likes {{ second.hobbies | join(\", \") }}.
Shared Hobbies: {% if shared %}{{ shared | join(\", \") }}{% else %}None{% endif %}.

Keep the tone very casual, friendly, and Gen Z style. The suggestions should be ready to send.";

const AVATAR_TEMPLATE: &str = "\
A vibrant, minimalist, abstract avatar representing {{ hobbies | join(\", \") }}. \
Gen Z aesthetic, clean lines, glassmorphism style, with shiny blue and purple vibes. \
No text, no faces.";

/// Hobbies named in the avatar prompt.
const AVATAR_HOBBY_LIMIT: usize = 3;

fn hobby_names<'a>(hobbies: impl IntoIterator<Item = &'a Hobby>) -> Vec<&'a str> {
    hobbies.into_iter().map(|h| h.name.as_str()).collect()
}

fn render(template: &str, ctx: minijinja::Value) -> Result<String> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|e| FrinzyError::internal(format!("prompt template failed: {}", e)))
}

pub fn icebreaker_prompt(first: &Profile, second: &Profile) -> Result<String> {
    render(
        ICEBREAKER_TEMPLATE,
        context! {
            first => context! {
                personality => &first.personality_label,
                hobbies => hobby_names(first.hobbies.iter()),
            },
            second => context! {
                personality => &second.personality_label,
                hobbies => hobby_names(second.hobbies.iter()),
            },
            shared => hobby_names(shared_hobbies(first, second)),
        },
    )
}

pub fn avatar_prompt(hobbies: &[Hobby]) -> Result<String> {
    render(
        AVATAR_TEMPLATE,
        context! {
            hobbies => hobby_names(hobbies.iter().take(AVATAR_HOBBY_LIMIT)),
        },
    )
}
