//! Sample members and events used by `demo` and `profiles seed`.

use chrono::{DateTime, Duration, Utc};
use frinzy_core::Result;
use frinzy_core::events::Event;
use frinzy_core::profile::{City, Gender, Profile, TraitHints, catalog};

struct Sample {
    id: &'static str,
    name: &'static str,
    age: u8,
    city: City,
    gender: Gender,
    hobbies: &'static [&'static str],
    choices: &'static [&'static str],
    tags: &'static [&'static str],
    bio: &'static str,
    label: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "aarav",
        name: "Aarav",
        age: 21,
        city: City::Delhi,
        gender: Gender::Male,
        hobbies: &["Gaming", "Board Games", "Coding"],
        choices: &["Night owl", "Small group"],
        tags: &["Competitive"],
        bio: "Looking for a co-op partner and a weekly board game night.",
        label: "The Logician",
    },
    Sample {
        id: "diya",
        name: "Diya",
        age: 23,
        city: City::Delhi,
        gender: Gender::Female,
        hobbies: &["Reading", "Painting", "Trying new food", "Gaming"],
        choices: &["Deep chats", "Try new spots"],
        tags: &["Low-key", "Host-vibes"],
        bio: "Book club regular, always hunting for the next momo spot.",
        label: "The Mediator",
    },
    Sample {
        id: "kabir",
        name: "Kabir",
        age: 25,
        city: City::Delhi,
        gender: Gender::Male,
        hobbies: &["Hiking", "Photography", "Stargazing"],
        choices: &["Early bird", "Plan ahead"],
        tags: &["High-energy"],
        bio: "Weekend treks with a camera in hand.",
        label: "The Commander",
    },
    Sample {
        id: "meera",
        name: "Meera",
        age: 22,
        city: City::Mumbai,
        gender: Gender::Female,
        hobbies: &["Gaming", "Reading", "Dancing"],
        choices: &["City night out"],
        tags: &["High-energy"],
        bio: "Dance class by day, ranked matches by night.",
        label: "The Campaigner",
    },
    Sample {
        id: "rohan",
        name: "Rohan",
        age: 24,
        city: City::Bangalore,
        gender: Gender::NonBinary,
        hobbies: &["Coding", "Podcasting", "Memes"],
        choices: &["Chill banter"],
        tags: &["Teacher-type"],
        bio: "Building side projects and a podcast nobody listens to yet.",
        label: "The Debater",
    },
    Sample {
        id: "sana",
        name: "Sana",
        age: 20,
        city: City::Delhi,
        gender: Gender::PreferNotToSay,
        hobbies: &["Yoga", "Meditation", "Gardening"],
        choices: &["Calm night in"],
        tags: &["Learner-mode"],
        bio: "Balcony garden and a morning routine I actually stick to.",
        label: "The Advocate",
    },
];

pub fn sample_profiles() -> Vec<Profile> {
    let now = Utc::now();
    SAMPLES
        .iter()
        .map(|s| Profile {
            id: s.id.to_string(),
            display_name: s.name.to_string(),
            age: s.age,
            city: s.city,
            gender: s.gender,
            hobbies: s.hobbies.iter().map(|n| catalog::hobby_by_name(n)).collect(),
            bio: s.bio.to_string(),
            personality_label: s.label.to_string(),
            binary_choice_selections: s.choices.iter().map(|c| c.to_string()).collect(),
            vibe_tags: s.tags.iter().map(|t| t.to_string()).collect(),
            fun_line: None,
            avatar_url: Profile::default_avatar_url(s.id),
            trait_hints: TraitHints::from_selections(s.choices),
            verified: true,
            points: 0,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

struct SampleEvent {
    title: &'static str,
    description: &'static str,
    city: City,
    days_ahead: i64,
    attendees: &'static [&'static str],
}

const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        title: "Board Game Night",
        description: "Casual board games for all levels. Bring a favourite or just yourself.",
        city: City::Bangalore,
        days_ahead: 4,
        attendees: &["rohan"],
    },
    SampleEvent {
        title: "Gurugram Food Walk",
        description: "The best street food stalls in Gurugram. Come hungry.",
        city: City::Gurugram,
        days_ahead: 7,
        attendees: &[],
    },
    SampleEvent {
        title: "Open Mic Night",
        description: "Poetry, comedy and music. Perform or just enjoy the show.",
        city: City::Mumbai,
        days_ahead: 11,
        attendees: &["meera"],
    },
    SampleEvent {
        title: "Quiz at the Cafe",
        description: "Teams of four, mixed trivia, loser buys chai.",
        city: City::Delhi,
        days_ahead: 2,
        attendees: &["aarav", "sana"],
    },
];

/// Upcoming events relative to `now`, with sample members already attending.
pub fn sample_events(now: DateTime<Utc>) -> Result<Vec<Event>> {
    SAMPLE_EVENTS
        .iter()
        .map(|s| {
            let mut event = Event::new(
                s.title,
                s.description,
                s.city,
                now + Duration::days(s.days_ahead),
            )?;
            for member in s.attendees {
                event.attend(member);
            }
            Ok(event)
        })
        .collect()
}
