//! The static "featured diseases" shown while no query is active.

/// One featured disease card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedDisease {
    pub name: &'static str,
    pub summary: &'static str,
}

/// Text shown above the featured cards.
pub const INTRO: &str = "Discover disease hierarchies, relationships, and recent research. \
Use the search bar above to find detailed information about specific diseases and their connections.";

pub const FEATURED: [FeaturedDisease; 6] = [
    FeaturedDisease {
        name: "COVID-19",
        summary: "A highly contagious respiratory illness caused by the SARS-CoV-2 virus, \
leading to severe respiratory issues.",
    },
    FeaturedDisease {
        name: "Cancer",
        summary: "A group of diseases characterized by abnormal cell growth that can spread \
to other parts of the body.",
    },
    FeaturedDisease {
        name: "Diabetes",
        summary: "A chronic condition where the body cannot effectively regulate blood sugar levels.",
    },
    FeaturedDisease {
        name: "Hypertension",
        summary: "A condition where the force of the blood against the artery walls is \
consistently too high.",
    },
    FeaturedDisease {
        name: "Influenza",
        summary: "A viral infection affecting the respiratory system, causing fever, cough, \
and fatigue.",
    },
    FeaturedDisease {
        name: "Thyroid Disorders",
        summary: "Conditions affecting the thyroid gland, which regulates metabolism.",
    },
];
