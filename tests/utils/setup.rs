use std::sync::Arc;

use blackjack_table::{
    game::{BlackjackService, InMemorySessionRepository, Rank, StackedDeck},
    stats::{InMemoryStatsRepository, StatsService},
    BlackjackCommands,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

#[allow(dead_code)]
pub struct TestSetup {
    pub service: Arc<BlackjackService>,
    pub commands: BlackjackCommands,
    pub deck: Arc<StackedDeck>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub stats: Arc<StatsService>,
}

pub struct TestSetupBuilder {
    ranks: Vec<Rank>,
    fallback: Rank,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            ranks: vec![],
            fallback: Rank::Two,
        }
    }

    /// Cards dealt in order: player, player, dealer, dealer, then hits and
    /// dealer draws.
    pub fn with_cards(mut self, ranks: Vec<Rank>) -> Self {
        self.ranks = ranks;
        self
    }

    #[allow(dead_code)]
    pub fn with_fallback(mut self, rank: Rank) -> Self {
        self.fallback = rank;
        self
    }

    pub fn build(self) -> TestSetup {
        let deck = Arc::new(StackedDeck::with_fallback(self.ranks, self.fallback));
        let sessions = Arc::new(InMemorySessionRepository::new());
        let stats = Arc::new(StatsService::new(Arc::new(InMemoryStatsRepository::new())));
        let service = Arc::new(
            BlackjackService::new(sessions.clone(), deck.clone()).with_recorder(stats.clone()),
        );
        let commands = BlackjackCommands::new(service.clone());

        TestSetup {
            service,
            commands,
            deck,
            sessions,
            stats,
        }
    }
}
