//! Memory records - the timeline's data.
//!
//! Records are immutable for the session. Field names serialize in
//! camelCase so a JSON data file can use the same shape as the built-in
//! sample set.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationKind;

pub type MemoryId = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub id: MemoryId,
    /// Display label, e.g. "June 15, 2020"
    pub date: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub sentiment: String,
    #[serde(default)]
    pub image_url: String,
    /// Animation type tag; unknown tags render with the default animation
    pub animation_type: String,
}

impl MemoryRecord {
    /// Three-letter badge from the first word of the date label ("June 15" -> "Jun").
    pub fn month_abbrev(&self) -> String {
        self.date
            .split(' ')
            .next()
            .unwrap_or_default()
            .chars()
            .take(3)
            .collect()
    }

    pub fn animation_kind(&self) -> AnimationKind {
        AnimationKind::from_tag(&self.animation_type)
    }
}

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=500";

fn record(
    id: MemoryId,
    date: &str,
    title: &str,
    description: &str,
    location: &str,
    sentiment: &str,
    animation_type: &str,
) -> MemoryRecord {
    MemoryRecord {
        id,
        date: date.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        sentiment: sentiment.to_string(),
        image_url: PLACEHOLDER_IMAGE.to_string(),
        animation_type: animation_type.to_string(),
    }
}

/// Built-in sample timeline, used when no data file is given.
pub fn sample_memories() -> Vec<MemoryRecord> {
    vec![
        record(
            1,
            "June 15, 2020",
            "Summer in Paris",
            "That magical summer evening at the Eiffel Tower when the lights came on and everything felt possible.",
            "Paris, France",
            "Joy",
            "paris",
        ),
        record(
            2,
            "December 24, 2021",
            "First Snow",
            "Waking up to a blanket of snow covering everything in sight. The world was quiet and peaceful.",
            "Colorado, USA",
            "Serenity",
            "snow",
        ),
        record(
            3,
            "March 12, 2022",
            "Graduation Day",
            "After years of hard work, finally walking across that stage. The pride in my parents' eyes made it all worth it.",
            "University Auditorium",
            "Pride",
            "graduation",
        ),
        record(
            4,
            "August 3, 2023",
            "Ocean Sunrise",
            "Sitting on the beach at dawn, watching the sun emerge from the horizon. The colors were breathtaking.",
            "Bali, Indonesia",
            "Wonder",
            "ocean",
        ),
        record(
            5,
            "January 1, 2024",
            "New Year's Resolution",
            "Standing on the rooftop as fireworks lit up the sky, I promised myself this would be the year of growth and new adventures.",
            "New York City, USA",
            "Anticipation",
            "fireworks",
        ),
    ]
}
