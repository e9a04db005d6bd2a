use tracing::{info, instrument};

use crate::model::seed::{default_quiz, starter_inventory};
use crate::repository::fragrance_repo::FragranceRepository;
use crate::repository::metadata_repo::MetadataRepository;
use crate::repository::quiz_repo::QuizRepository;
use crate::service::metadata_service::MetadataService;
use crate::util::error::ServiceError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub fragrances: usize,
    pub quizzes: usize,
    pub metadata: bool,
}

/// Fills whichever of the catalog, quiz and vocabulary collections are empty.
#[instrument(skip_all)]
pub async fn seed_if_empty(
    fragrance_repo: &dyn FragranceRepository,
    quiz_repo: &dyn QuizRepository,
    metadata_repo: &dyn MetadataRepository,
    metadata_service: &dyn MetadataService,
) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    if fragrance_repo.count().await? == 0 {
        report.fragrances = fragrance_repo.insert_many(starter_inventory()).await?;
        info!(count = report.fragrances, "Seeded starter inventory");
    }
    if quiz_repo.count().await? == 0 {
        quiz_repo.insert(default_quiz()).await?;
        report.quizzes = 1;
        info!("Seeded default quiz");
    }
    if metadata_repo.find_all().await?.is_empty() {
        metadata_service.seed().await?;
        report.metadata = true;
    }
    if report == SeedReport::default() {
        info!("Nothing to seed, store already populated");
    }
    Ok(report)
}
