pub mod scorer;

pub use scorer::{recommend, AnswerValue, QuizAnswers, ScoredFragrance, DEFAULT_TOP_N};
