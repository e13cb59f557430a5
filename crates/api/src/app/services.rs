//! Service wiring: the CRM service plus the dev token issuer.

use lodgex_auth::TokenIssuer;
use lodgex_infra::{Config, CrmService, ServiceResult};
use tracing::info;

pub struct AppServices {
    pub crm: CrmService,
    pub tokens: TokenIssuer,
}

impl AppServices {
    pub fn new(crm: CrmService, tokens: TokenIssuer) -> Self {
        Self { crm, tokens }
    }
}

/// Build the working set (remote snapshot or seed data) and the token issuer.
pub async fn build_services(config: &Config) -> ServiceResult<AppServices> {
    let crm = CrmService::bootstrap(config).await?;
    info!(
        mirrored = config.database_url.is_some(),
        ai_simulated = crm.assistant().is_simulated(),
        "services ready"
    );
    Ok(AppServices::new(crm, token_issuer(config)))
}

pub fn token_issuer(config: &Config) -> TokenIssuer {
    let ttl = chrono::Duration::from_std(config.jwt_ttl).unwrap_or_else(|_| chrono::Duration::hours(8));
    TokenIssuer::new(config.jwt_secret.as_bytes(), ttl)
}
