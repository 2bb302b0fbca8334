//! Application state shared across all request handlers.
//!
//! Built once at startup from the connection pool and cloned into every handler
//! through axum's `State` extractor. Every field is cheap to clone: repositories and
//! services hold a `PgPool` (itself reference counted) or an `Arc`.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::database::repository::{MatchRepository, PlayerRepository, TeamRepository, UserRepository};
use crate::database::store::MatchStore;
use crate::pagination::{PageQuery, Pagination};
use crate::services::{AuthService, MatchService, PlayerService, ReportBuilder, ResultEngine, TeamService};

#[derive(Clone)]
pub struct AppState {
    /// Kept for the health probe
    pub pool: PgPool,
    pub api: ApiConfig,
    pub auth: AuthService,
    pub teams: TeamService,
    pub players: PlayerService,
    pub matches: MatchService,
    pub results: ResultEngine,
    pub reports: ReportBuilder,
}

impl AppState {
    pub fn new(pool: PgPool, api: ApiConfig) -> Self {
        let users = UserRepository::new(pool.clone());
        let team_repo = TeamRepository::new(pool.clone());
        let player_repo = PlayerRepository::new(pool.clone());
        let match_repo = MatchRepository::new(pool.clone());
        let store: Arc<dyn MatchStore> = Arc::new(match_repo.clone());

        Self {
            auth: AuthService::new(users),
            teams: TeamService::new(team_repo.clone(), player_repo.clone()),
            players: PlayerService::new(team_repo.clone(), player_repo),
            matches: MatchService::new(team_repo, match_repo),
            results: ResultEngine::new(store.clone()),
            reports: ReportBuilder::new(store),
            pool,
            api,
        }
    }

    pub fn pagination(&self, query: &PageQuery) -> Pagination {
        Pagination::from_query(query, &self.api)
    }
}
