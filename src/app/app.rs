use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::{AppConfig, ConfigError, JwtConfig, KioskConfig, MongoConfig};
use crate::handler::admin_handler::AdminState;
use crate::handler::kiosk_handler::KioskState;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::fragrance_repo::{FragranceRepository, MongoFragranceRepository};
use crate::repository::lead_repo::{LeadRepository, MongoLeadRepository};
use crate::repository::metadata_repo::{MetadataRepository, MongoMetadataRepository};
use crate::repository::mongo;
use crate::repository::quiz_repo::{MongoQuizRepository, QuizRepository};
use crate::repository::settings_repo::{MongoSettingsRepository, SettingsRepository};
use crate::router::admin_router::admin_router;
use crate::router::catalog_router::catalog_router;
use crate::router::kiosk_router::kiosk_router;
use crate::router::quiz_router::quiz_router;
use crate::router::session_router::session_router;
use crate::service::analytics_service::AnalyticsServiceImpl;
use crate::service::fragrance_service::FragranceServiceImpl;
use crate::service::lead_service::LeadServiceImpl;
use crate::service::metadata_service::MetadataServiceImpl;
use crate::service::quiz_service::QuizServiceImpl;
use crate::service::seed_service::{seed_if_empty, SeedReport};
use crate::service::settings_service::{SettingsService, SettingsServiceImpl};
use crate::session::{SessionStore, Subscription};
use crate::util::error::ServiceError;
use crate::util::jwt::JwtTokenUtilsImpl;
use crate::watchdog::{spawn_watchdog, KioskNavigator, WatchdogHandle};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Document store error: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("Startup failed: {0}")]
    Service(#[from] ServiceError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// The store-facing side of the app; swapped for in-memory fakes in tests.
#[derive(Clone)]
pub struct Repositories {
    pub fragrances: Arc<dyn FragranceRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub leads: Arc<dyn LeadRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub metadata: Arc<dyn MetadataRepository>,
}

impl Repositories {
    pub async fn connect(mongo_config: &MongoConfig) -> Result<Self, AppError> {
        let db = mongo::connect(mongo_config).await?;
        let leads = MongoLeadRepository::new(&db);
        if let Err(e) = leads.ensure_indexes().await {
            // An existing duplicate blocks the index; the kiosk still works without it.
            error!("Could not create lead indexes: {e}");
        }
        Ok(Repositories {
            fragrances: Arc::new(MongoFragranceRepository::new(&db)),
            quizzes: Arc::new(MongoQuizRepository::new(&db)),
            leads: Arc::new(leads),
            settings: Arc::new(MongoSettingsRepository::new(&db)),
            metadata: Arc::new(MongoMetadataRepository::new(&db)),
        })
    }
}

pub struct App {
    config: AppConfig,
    router: Router,
    repos: Repositories,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<KioskNavigator>,
    pub watchdog: WatchdogHandle,
    pub settings_service: Arc<SettingsServiceImpl>,
    pub metadata_service: Arc<MetadataServiceImpl>,
    kiosk_config: KioskConfig,
    background: Vec<JoinHandle<()>>,
    _session_log: Subscription,
}

impl App {
    /// Loads configuration from the environment, connects to MongoDB and
    /// seeds an empty store.
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env()?;
        let kiosk_config = KioskConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;

        let repos = Repositories::connect(&mongo_config).await?;
        let app = App::build(config, jwt_config, kiosk_config, repos);
        let report = app.seed().await?;
        info!(?report, "Store ready");
        app.settings_service.refresh().await;
        Ok(app)
    }

    /// Wires services, routes and background tasks over the given stores.
    /// Must run inside a tokio runtime.
    pub fn build(config: AppConfig, jwt_config: JwtConfig, kiosk_config: KioskConfig, repos: Repositories) -> Self {
        let session = Arc::new(SessionStore::new());
        let session_log = session.subscribe(|user| match user {
            Some(lead) => info!(email = %lead.email, "Shopper identified"),
            None => info!("Shopper session cleared"),
        });

        let metadata_service = Arc::new(MetadataServiceImpl::new(repos.metadata.clone()));
        let settings_service = Arc::new(SettingsServiceImpl::new(repos.settings.clone()));
        let fragrance_service = Arc::new(FragranceServiceImpl::new(repos.fragrances.clone(), metadata_service.clone()));
        let lead_service = Arc::new(LeadServiceImpl::new(
            repos.leads.clone(),
            fragrance_service.clone(),
            session.clone(),
            kiosk_config.clone(),
        ));
        let quiz_service = Arc::new(QuizServiceImpl::new(
            repos.quizzes.clone(),
            fragrance_service.clone(),
            lead_service.clone(),
            settings_service.clone(),
            session.clone(),
            kiosk_config.recommendation_limit,
        ));
        let analytics_service = Arc::new(AnalyticsServiceImpl::new(
            lead_service.clone(),
            fragrance_service.clone(),
            quiz_service.clone(),
        ));
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let navigator = Arc::new(KioskNavigator::new());
        let (watchdog, watchdog_task) =
            spawn_watchdog(navigator.clone(), settings_service.subscribe(), kiosk_config.warning_seconds);
        let refresh_task = settings_service
            .clone()
            .spawn_refresh(Duration::from_secs(kiosk_config.settings_poll_secs));

        let admin_auth_state = Arc::new(AdminAuthState { jwt_utils: jwt_utils.clone() });
        let admin_state = Arc::new(AdminState {
            fragrance_service: fragrance_service.clone(),
            quiz_service: quiz_service.clone(),
            lead_service: lead_service.clone(),
            metadata_service: metadata_service.clone(),
            settings_service: settings_service.clone(),
            analytics_service,
            jwt_utils,
        });
        let kiosk_state = Arc::new(KioskState {
            navigator: navigator.clone(),
            watchdog: watchdog.clone(),
            settings_service: settings_service.clone(),
        });

        let router = Router::new()
            .merge(catalog_router(fragrance_service))
            .merge(quiz_router(quiz_service))
            .merge(session_router(lead_service))
            .merge(kiosk_router(kiosk_state))
            .merge(admin_router(admin_state, admin_auth_state))
            .route("/health", get(|| async { "OK" }));

        App {
            config,
            router,
            repos,
            session,
            navigator,
            watchdog,
            settings_service,
            metadata_service,
            kiosk_config,
            background: vec![watchdog_task, refresh_task],
            _session_log: session_log,
        }
    }

    pub async fn seed(&self) -> Result<SeedReport, ServiceError> {
        seed_if_empty(
            self.repos.fragrances.as_ref(),
            self.repos.quizzes.as_ref(),
            self.repos.metadata.as_ref(),
            self.metadata_service.as_ref(),
        )
        .await
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn kiosk_config(&self) -> &KioskConfig {
        &self.kiosk_config
    }

    pub async fn start(self) -> Result<(), AppError> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Kiosk backend listening on http://{}", addr);

        axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for shutdown signal: {e}");
                }
            })
            .await?;

        info!("Shutting down");
        self.watchdog.shutdown().await;
        for task in &self.background {
            task.abort();
        }
        Ok(())
    }
}
