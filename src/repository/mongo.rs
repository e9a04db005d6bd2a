use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use mongodb::{Client, Database};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;

pub const FRAGRANCES: &str = "fragrances";
pub const QUIZZES: &str = "quizzes";
pub const LEADS: &str = "leads";
pub const SETTINGS: &str = "settings";
pub const METADATA: &str = "metadata";

/// Opens the shared client and hands back the kiosk database.
/// Every repository is built from this one handle so they share a pool.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("EssenceKiosk".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client created");
    Ok(client.database(&config.database))
}
