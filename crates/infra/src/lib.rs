mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, FailurePolicy, RunMode, ScanMode};
pub use repos::{
    IFavoriteRepo, ISentReminderRepo, IUserRepo, InMemoryFavoriteRepo, InMemorySentReminderRepo,
    InMemoryUserRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub push: Arc<dyn IPushGateway>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
    pub fcm: Option<FcmParams>,
}

struct FcmParams {
    pub base_url: String,
    pub project_id: String,
    pub access_token: String,
}

impl ReminderContext {
    /// Inmemory store and push gateway, used for testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            push: Arc::new(InMemoryPushGateway::new()),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                info!("DATABASE_URL env var was not provided. Going to use inmemory store.");
                Repos::create_inmemory()
            }
        };
        let push: Arc<dyn IPushGateway> = match params.fcm {
            Some(fcm) => Arc::new(FcmPushGateway::with_base_url(
                fcm.base_url,
                fcm.project_id,
                fcm.access_token,
            )),
            None => {
                warn!("FCM_PROJECT_ID and FCM_ACCESS_TOKEN env vars were not provided. Push notifications will only be kept in memory.");
                Arc::new(InMemoryPushGateway::new())
            }
        };

        Ok(Self {
            repos,
            push,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
        fcm: get_fcm_params(),
    })
    .await
}

fn get_fcm_params() -> Option<FcmParams> {
    let project_id = std::env::var("FCM_PROJECT_ID").ok()?;
    let access_token = std::env::var("FCM_ACCESS_TOKEN").ok()?;
    let base_url =
        std::env::var("FCM_BASE_URL").unwrap_or_else(|_| services::FCM_API_BASE_URL.to_string());
    Some(FcmParams {
        base_url,
        project_id,
        access_token,
    })
}
