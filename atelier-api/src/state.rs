//! Server state shared across requests

use crate::error::ApiResult;
use atelier_core::config::Config;
use atelier_core::core_auth::{bearer_token, Principal, TokenSigner};
use atelier_core::core_room::RoomBroadcaster;
use atelier_core::core_store::{AsyncProjectFacade, MemoryStore, ProjectFacade};
use axum::http::{header, HeaderMap};
use std::sync::Arc;

/// Server state shared across requests
#[derive(Clone)]
pub struct AppState {
    /// Store façade; the only path to persisted documents
    pub facade: AsyncProjectFacade,

    /// Room broadcaster for live change notifications
    pub rooms: Arc<RoomBroadcaster>,

    /// Bearer-token signer
    pub signer: Arc<TokenSigner>,

    /// Bounded outbound queue depth per viewer session
    pub session_queue_depth: usize,
}

impl AppState {
    /// Create server state from the application config
    pub fn new(config: &Config) -> Self {
        let facade = AsyncProjectFacade::new(ProjectFacade::new(MemoryStore::new()));
        let signer = TokenSigner::new(
            config.auth.token_secret.as_bytes().to_vec(),
            config.auth.token_ttl,
        );

        Self {
            facade,
            rooms: Arc::new(RoomBroadcaster::new()),
            signer: Arc::new(signer),
            session_queue_depth: config.rooms.session_queue_depth,
        }
    }

    /// Resolve the authenticated principal from the request headers
    pub fn require_principal(&self, headers: &HeaderMap) -> ApiResult<Principal> {
        let header = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let token = bearer_token(header)?;
        Ok(self.signer.verify(token)?)
    }
}
