//! Weighted tag matching between quiz answers and the catalog.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::fragrance::{Fragrance, Intensity};
use crate::model::quiz::Quiz;

pub const DEFAULT_TOP_N: usize = 3;

pub const PERSONALITY_WEIGHT: u32 = 3;
pub const OCCASION_WEIGHT: u32 = 2;
pub const INTENSITY_WEIGHT: u32 = 2;

/// A raw answer as posted by the kiosk: one option or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
}

impl AnswerValue {
    fn values(&self) -> &[String] {
        match self {
            AnswerValue::One(v) => std::slice::from_ref(v),
            AnswerValue::Many(vs) => vs,
        }
    }
}

/// Answers grouped by the fragrance facet they score against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    #[serde(default)]
    pub personality: Option<Vec<String>>,
    #[serde(default)]
    pub occasion: Option<Vec<String>>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
}

impl QuizAnswers {
    /// Folds responses keyed by question id onto the facets named by each
    /// question's `categoryMatch`. Unknown questions, unknown facets and
    /// unparsable intensities are ignored.
    pub fn from_responses(quiz: &Quiz, responses: &HashMap<String, AnswerValue>) -> Self {
        let mut answers = QuizAnswers::default();
        for question in &quiz.questions {
            let Some(answer) = responses.get(&question.id) else {
                continue;
            };
            let values = answer.values();
            match question.category_match.as_str() {
                "personality" => answers.personality.get_or_insert_with(Vec::new).extend(values.iter().cloned()),
                "occasion" => answers.occasion.get_or_insert_with(Vec::new).extend(values.iter().cloned()),
                "intensity" => {
                    if let Some(level) = values.iter().find_map(|v| v.parse::<Intensity>().ok()) {
                        answers.intensity = Some(level);
                    }
                }
                other => debug!(question = %question.id, facet = other, "Answer not scored"),
            }
        }
        answers
    }

    pub fn is_empty(&self) -> bool {
        self.personality.as_ref().map_or(true, Vec::is_empty)
            && self.occasion.as_ref().map_or(true, Vec::is_empty)
            && self.intensity.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFragrance {
    #[serde(flatten)]
    pub fragrance: Fragrance,
    pub score: u32,
}

fn overlap(wanted: &Option<Vec<String>>, tags: &[String]) -> u32 {
    let Some(wanted) = wanted else {
        return 0;
    };
    let wanted: BTreeSet<&str> = wanted.iter().map(String::as_str).collect();
    wanted.into_iter().filter(|w| tags.iter().any(|t| t == w)).count() as u32
}

pub fn score(answers: &QuizAnswers, fragrance: &Fragrance) -> u32 {
    let mut total = PERSONALITY_WEIGHT * overlap(&answers.personality, &fragrance.personality);
    total += OCCASION_WEIGHT * overlap(&answers.occasion, &fragrance.occasion);
    if answers.intensity == Some(fragrance.intensity) {
        total += INTENSITY_WEIGHT;
    }
    total
}

/// Ranks in-stock fragrances by score, highest first, keeping catalog order
/// among equal scores, and returns at most `limit` of them.
pub fn recommend(answers: &QuizAnswers, catalog: &[Fragrance], limit: usize) -> Vec<ScoredFragrance> {
    let mut scored: Vec<ScoredFragrance> = catalog
        .iter()
        .filter(|f| f.in_stock)
        .map(|f| ScoredFragrance { score: score(answers, f), fragrance: f.clone() })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fragrance::{Gender, NotePyramid};
    use crate::model::quiz::{QuestionType, QuizQuestion};

    fn fragrance(name: &str, personality: &[&str], occasion: &[&str], intensity: Intensity) -> Fragrance {
        Fragrance {
            id: None,
            name: name.to_string(),
            vendor: "House".to_string(),
            gender: Gender::Unisex,
            occasion: occasion.iter().map(|s| s.to_string()).collect(),
            notes: NotePyramid::default(),
            description: String::new(),
            personality: personality.iter().map(|s| s.to_string()).collect(),
            intensity,
            image: None,
            in_stock: true,
            shelf_location: String::new(),
        }
    }

    fn tags(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_noir_elegance_scores_seven() {
        let noir = fragrance("Noir Elegance", &["Bold", "Sophisticated"], &["Evening", "Special Events"], Intensity::Strong);
        let plain = fragrance("Plain", &["Fresh"], &["Daily"], Intensity::Light);
        let answers = QuizAnswers {
            personality: tags(&["Bold"]),
            occasion: tags(&["Evening"]),
            intensity: Some(Intensity::Strong),
        };
        assert_eq!(score(&answers, &noir), 7);
        assert_eq!(score(&answers, &plain), 0);

        let ranked = recommend(&answers, &[plain, noir], DEFAULT_TOP_N);
        assert_eq!(ranked[0].fragrance.name, "Noir Elegance");
        assert_eq!(ranked[0].score, 7);
    }

    #[test]
    fn test_out_of_stock_excluded() {
        let mut gone = fragrance("Gone", &["Bold"], &["Evening"], Intensity::Strong);
        gone.in_stock = false;
        let here = fragrance("Here", &[], &[], Intensity::Light);
        let answers = QuizAnswers { personality: tags(&["Bold"]), ..QuizAnswers::default() };
        let ranked = recommend(&answers, &[gone, here], DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].fragrance.name, "Here");
    }

    #[test]
    fn test_empty_answers_keep_catalog_order() {
        let catalog: Vec<Fragrance> =
            ["A", "B", "C", "D"].iter().map(|n| fragrance(n, &[], &[], Intensity::Medium)).collect();
        let names: Vec<String> = recommend(&QuizAnswers::default(), &catalog, DEFAULT_TOP_N)
            .into_iter()
            .map(|s| s.fragrance.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_short_and_empty_catalog() {
        let catalog = vec![fragrance("Only", &[], &[], Intensity::Medium)];
        assert_eq!(recommend(&QuizAnswers::default(), &catalog, DEFAULT_TOP_N).len(), 1);
        assert!(recommend(&QuizAnswers::default(), &[], DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_repeated_answer_counts_once() {
        let item = fragrance("Bold One", &["Bold"], &[], Intensity::Light);
        let answers = QuizAnswers { personality: tags(&["Bold", "Bold"]), ..QuizAnswers::default() };
        assert_eq!(score(&answers, &item), 3);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            fragrance("First", &["Bold"], &[], Intensity::Light),
            fragrance("Second", &["Bold"], &[], Intensity::Light),
            fragrance("Third", &["Bold", "Fresh"], &[], Intensity::Light),
        ];
        let answers = QuizAnswers { personality: tags(&["Bold", "Fresh"]), ..QuizAnswers::default() };
        let names: Vec<String> = recommend(&answers, &catalog, DEFAULT_TOP_N)
            .into_iter()
            .map(|s| s.fragrance.name)
            .collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_from_responses_maps_facets() {
        let question = |id: &str, facet: &str, kind: QuestionType| QuizQuestion {
            id: id.to_string(),
            question: String::new(),
            kind,
            options: vec![],
            category_match: facet.to_string(),
        };
        let quiz = Quiz {
            id: None,
            title: "Find your scent".to_string(),
            description: String::new(),
            active: true,
            questions: vec![
                question("q1", "personality", QuestionType::Multiple),
                question("q2", "occasion", QuestionType::Single),
                question("q3", "intensity", QuestionType::Single),
                question("q4", "season", QuestionType::Single),
            ],
        };
        let responses: HashMap<String, AnswerValue> = serde_json::from_value(serde_json::json!({
            "q1": ["Bold", "Romantic"],
            "q2": "Evening",
            "q3": "Strong",
            "q4": "Winter",
            "unknown": "ignored"
        }))
        .unwrap();

        let answers = QuizAnswers::from_responses(&quiz, &responses);
        assert_eq!(answers.personality, tags(&["Bold", "Romantic"]));
        assert_eq!(answers.occasion, tags(&["Evening"]));
        assert_eq!(answers.intensity, Some(Intensity::Strong));
    }

    #[test]
    fn test_bad_intensity_ignored() {
        let quiz = Quiz {
            id: None,
            title: String::new(),
            description: String::new(),
            active: true,
            questions: vec![QuizQuestion {
                id: "q".to_string(),
                question: String::new(),
                kind: QuestionType::Single,
                options: vec![],
                category_match: "intensity".to_string(),
            }],
        };
        let responses = HashMap::from([("q".to_string(), AnswerValue::One("overwhelming".to_string()))]);
        assert!(QuizAnswers::from_responses(&quiz, &responses).is_empty());
    }
}
