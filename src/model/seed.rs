//! Starter content written into an empty store on first boot.

use crate::model::fragrance::{Fragrance, Gender, Intensity, NotePyramid};
use crate::model::metadata::Metadata;
use crate::model::quiz::{QuestionType, Quiz, QuizOption, QuizQuestion};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn fragrance(
    name: &str,
    vendor: &str,
    gender: Gender,
    occasion: &[&str],
    notes: (&[&str], &[&str], &[&str]),
    description: &str,
    personality: &[&str],
    intensity: Intensity,
    shelf_location: &str,
) -> Fragrance {
    Fragrance {
        id: None,
        name: name.to_string(),
        vendor: vendor.to_string(),
        gender,
        occasion: strings(occasion),
        notes: NotePyramid { top: strings(notes.0), heart: strings(notes.1), base: strings(notes.2) },
        description: description.to_string(),
        personality: strings(personality),
        intensity,
        image: None,
        in_stock: true,
        shelf_location: shelf_location.to_string(),
    }
}

pub fn starter_inventory() -> Vec<Fragrance> {
    vec![
        fragrance(
            "Noir Elegance",
            "Maison de Luxe",
            Gender::Unisex,
            &["Evening", "Formal"],
            (&["Bergamot", "Black Pepper"], &["Jasmine", "Saffron"], &["Sandalwood", "Oud"]),
            "A mysterious and captivating scent that tells the story of a moonlit walk through a secret garden. It opens with a spark of spice and settles into a warm, woody embrace.",
            &["Sophisticated", "Confident"],
            Intensity::Strong,
            "Wall A, Shelf 2",
        ),
        fragrance(
            "Citrus Dawn",
            "Fresh & Co",
            Gender::Unisex,
            &["Daily", "Casual"],
            (&["Lemon", "Lime"], &["Mint", "Ginger"], &["Cedar", "Musk"]),
            "Like the first rays of sunlight hitting the coast. Crisp, refreshing, and endlessly optimistic. Perfect for starting your day with energy.",
            &["Energetic", "Fresh"],
            Intensity::Light,
            "Island 3, Row 1",
        ),
        fragrance(
            "Velvet Rose",
            "Parfums Elite",
            Gender::Feminine,
            &["Romantic", "Evening"],
            (&["Red Currant"], &["Rose", "Peony"], &["Amber", "Praline"]),
            "An ode to modern romance. Soft petals meet the warmth of amber in a scent that is both delicate and deeply lingering.",
            &["Romantic", "Elegant"],
            Intensity::Medium,
            "Wall B, Shelf 1",
        ),
        fragrance(
            "Urban Woods",
            "Modern Scent",
            Gender::Masculine,
            &["Daily", "Business"],
            (&["Pine", "Grapefruit"], &["Vetiver"], &["Leather", "Tobacco"]),
            "Grounded and professional, yet undeniably wild at heart. It captures the essence of a forest in the middle of the city.",
            &["Professional", "Grounded"],
            Intensity::Medium,
            "Wall C, Shelf 4",
        ),
        fragrance(
            "Coastal Breeze",
            "Aqua Essence",
            Gender::Unisex,
            &["Daily", "Sport"],
            (&["Sea Salt"], &["Sage"], &["Driftwood"]),
            "Clean, aquatic, and free-spirited. This scent brings the salty air of the ocean directly to your skin.",
            &["Adventurous", "Fresh"],
            Intensity::Light,
            "Island 2, Row 2",
        ),
        fragrance(
            "Midnight Oud",
            "Oriental Luxe",
            Gender::Unisex,
            &["Evening", "Formal"],
            (&["Incense"], &["Oud", "Leather"], &["Amber"]),
            "Bold, intense, and unapologetically luxurious. A scent for those who command the room and leave a lasting impression.",
            &["Bold", "Mysterious"],
            Intensity::Strong,
            "Wall A, Shelf 5",
        ),
    ]
}

pub fn default_metadata() -> Metadata {
    let mut meta = Metadata {
        vendors: strings(&[
            "Louis Vuitton", "Dior", "Chanel", "Tom Ford", "Lattafa", "Maison de Luxe", "Modern Scent",
            "Aqua Essence", "Oriental Luxe",
        ]),
        notes: strings(&[
            "Bergamot", "Oud", "Rose", "Jasmine", "Amber", "Musk", "Vanilla", "Sandalwood", "Lemon", "Leather",
            "Pine", "Sea Salt",
        ]),
        occasions: strings(&[
            "Daily", "Evening", "Date Night", "Office", "Party", "Summer", "Formal", "Casual", "Sport",
        ]),
        personalities: strings(&[
            "Bold", "Fresh", "Elegant", "Sophisticated", "Mysterious", "Playful", "Professional", "Adventurous",
        ]),
    };
    meta.vendors.sort();
    meta.notes.sort();
    meta.occasions.sort();
    meta.personalities.sort();
    meta
}

fn options(pairs: &[(&str, &str)]) -> Vec<QuizOption> {
    pairs
        .iter()
        .map(|(value, label)| QuizOption { value: value.to_string(), label: label.to_string() })
        .collect()
}

pub fn default_quiz() -> Quiz {
    Quiz {
        id: None,
        title: "Find Your Signature Scent".to_string(),
        description: "A quick quiz to find your perfect match.".to_string(),
        active: true,
        questions: vec![
            QuizQuestion {
                id: "personality".to_string(),
                question: "How would you describe yourself?".to_string(),
                kind: QuestionType::Multiple,
                category_match: "personality".to_string(),
                options: options(&[
                    ("Sophisticated", "Sophisticated & Elegant"),
                    ("Bold", "Bold & Confident"),
                    ("Romantic", "Romantic & Charming"),
                    ("Fresh", "Fresh & Energetic"),
                    ("Professional", "Professional & Grounded"),
                    ("Adventurous", "Adventurous & Free-spirited"),
                    ("Mysterious", "Mysterious & Intriguing"),
                ]),
            },
            QuizQuestion {
                id: "occasion".to_string(),
                question: "When will you wear this fragrance?".to_string(),
                kind: QuestionType::Multiple,
                category_match: "occasion".to_string(),
                options: options(&[
                    ("Daily", "Daily wear"),
                    ("Business", "Business/Professional"),
                    ("Evening", "Evening events"),
                    ("Romantic", "Romantic occasions"),
                ]),
            },
            QuizQuestion {
                id: "intensity".to_string(),
                question: "How strong do you like your fragrance?".to_string(),
                kind: QuestionType::Single,
                category_match: "intensity".to_string(),
                options: options(&[
                    ("light", "Light & Subtle"),
                    ("medium", "Moderate presence"),
                    ("strong", "Bold & Long-lasting"),
                ]),
            },
        ],
    }
}
