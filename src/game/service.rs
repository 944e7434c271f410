use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError, Weak};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::{
    deck::CardSource,
    errors::BlackjackError,
    repository::SessionRepository,
    session::{GameSession, Resolution, TableView, Turn},
};

/// Receives every finished game, e.g. to keep player statistics.
#[async_trait]
pub trait OutcomeRecorder: Send + Sync {
    async fn record(&self, resolution: &Resolution);
}

/// One async mutex per player key.
///
/// Entries are weak so a key's lock is freed as soon as no operation holds it.
#[derive(Default)]
struct PlayerLocks {
    locks: StdMutex<HashMap<String, Weak<Mutex<()>>>>,
}

impl PlayerLocks {
    fn lock_for(&self, player_key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(player_key).and_then(Weak::upgrade) {
            return lock;
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(Mutex::new(()));
        locks.insert(player_key.to_string(), Arc::downgrade(&lock));
        lock
    }
}

/// Runs blackjack games for any number of players.
///
/// Each player has at most one running game. Operations for the same player
/// are serialized; different players never wait on each other.
pub struct BlackjackService {
    repository: Arc<dyn SessionRepository>,
    card_source: Arc<dyn CardSource>,
    recorder: Option<Arc<dyn OutcomeRecorder>>,
    player_locks: PlayerLocks,
}

impl BlackjackService {
    pub fn new(repository: Arc<dyn SessionRepository>, card_source: Arc<dyn CardSource>) -> Self {
        Self {
            repository,
            card_source,
            recorder: None,
            player_locks: PlayerLocks::default(),
        }
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn OutcomeRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Deals a new game. A natural 21 resolves it on the spot.
    #[instrument(skip(self))]
    pub async fn start(&self, player_key: &str) -> Result<Turn, BlackjackError> {
        let lock = self.player_locks.lock_for(player_key);
        let _guard = lock.lock().await;

        if self.repository.get_session(player_key).await?.is_some() {
            info!("Rejected start, game already running");
            return Err(BlackjackError::SessionAlreadyActive);
        }

        let (session, turn) = GameSession::deal(player_key, self.card_source.as_ref());
        match &turn {
            Turn::Resolved(resolution) => {
                // Never stored: the game ended on the deal.
                self.finish(resolution).await;
            }
            Turn::InProgress(view) => {
                self.repository.create_session(&session).await?;
                info!(
                    session_id = %session.id(),
                    player_value = view.player_value,
                    "Game started"
                );
            }
        }

        Ok(turn)
    }

    #[instrument(skip(self))]
    pub async fn hit(&self, player_key: &str) -> Result<Turn, BlackjackError> {
        let lock = self.player_locks.lock_for(player_key);
        let _guard = lock.lock().await;

        let mut session = self.active_session(player_key).await?;
        let turn = session.hit(self.card_source.as_ref());

        match &turn {
            Turn::Resolved(resolution) => {
                self.repository.delete_session(player_key).await?;
                self.finish(resolution).await;
            }
            Turn::InProgress(_) => self.repository.update_session(&session).await?,
        }

        Ok(turn)
    }

    #[instrument(skip(self))]
    pub async fn stand(&self, player_key: &str) -> Result<Resolution, BlackjackError> {
        let lock = self.player_locks.lock_for(player_key);
        let _guard = lock.lock().await;

        let mut session = self.active_session(player_key).await?;
        let resolution = session.stand(self.card_source.as_ref());

        self.repository.delete_session(player_key).await?;
        self.finish(&resolution).await;

        Ok(resolution)
    }

    /// Current table as the player sees it
    pub async fn peek(&self, player_key: &str) -> Result<TableView, BlackjackError> {
        Ok(self.active_session(player_key).await?.view())
    }

    pub async fn active_sessions(&self) -> Result<usize, BlackjackError> {
        self.repository.active_sessions().await
    }

    async fn active_session(&self, player_key: &str) -> Result<GameSession, BlackjackError> {
        self.repository
            .get_session(player_key)
            .await?
            .ok_or(BlackjackError::NoActiveSession)
    }

    async fn finish(&self, resolution: &Resolution) {
        info!(
            session_id = %resolution.session_id,
            outcome = ?resolution.outcome,
            player_value = resolution.player_value,
            dealer_value = resolution.dealer_value,
            "Game resolved"
        );

        if let Some(recorder) = &self.recorder {
            recorder.record(resolution).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::Rank::{self, *};
    use crate::game::deck::StackedDeck;
    use crate::game::repository::InMemorySessionRepository;
    use crate::game::session::Outcome;

    struct CollectingRecorder {
        outcomes: Mutex<Vec<Outcome>>,
    }

    #[async_trait]
    impl OutcomeRecorder for CollectingRecorder {
        async fn record(&self, resolution: &Resolution) {
            self.outcomes.lock().await.push(resolution.outcome);
        }
    }

    fn service_with(
        ranks: Vec<Rank>,
    ) -> (BlackjackService, Arc<StackedDeck>, Arc<InMemorySessionRepository>) {
        let deck = Arc::new(StackedDeck::new(ranks));
        let repository = Arc::new(InMemorySessionRepository::new());
        let service = BlackjackService::new(repository.clone(), deck.clone());
        (service, deck, repository)
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let (service, _, _) = service_with(vec![Ten, Two, Nine, Seven, Three, Four, Five, Six]);

        assert!(!service.start("alice").await.unwrap().is_resolved());
        assert_eq!(
            service.start("alice").await,
            Err(BlackjackError::SessionAlreadyActive)
        );
    }

    #[tokio::test]
    async fn test_rejected_start_does_not_touch_running_game() {
        let (service, deck, _) = service_with(vec![Ten, Two, Nine, Seven]);
        service.start("alice").await.unwrap();
        let before = service.peek("alice").await.unwrap();

        deck.push([Ace, King, Ace, King]);
        assert!(service.start("alice").await.is_err());

        assert_eq!(service.peek("alice").await.unwrap(), before);
        assert_eq!(deck.remaining(), 4);
    }

    #[tokio::test]
    async fn test_hit_and_stand_without_game() {
        let (service, _, _) = service_with(vec![]);

        assert_eq!(service.hit("nobody").await, Err(BlackjackError::NoActiveSession));
        assert_eq!(
            service.stand("nobody").await,
            Err(BlackjackError::NoActiveSession)
        );
        assert_eq!(
            service.peek("nobody").await,
            Err(BlackjackError::NoActiveSession)
        );
    }

    #[tokio::test]
    async fn test_natural_is_never_stored() {
        let (service, _, repository) = service_with(vec![Ace, King, Nine, Eight]);

        match service.start("alice").await.unwrap() {
            Turn::Resolved(resolution) => {
                assert_eq!(resolution.outcome, Outcome::PlayerBlackjack)
            }
            Turn::InProgress(_) => panic!("Expected blackjack"),
        }
        assert!(!repository.has_session("alice").await);

        // A fresh game can start right away.
        assert!(service.start("alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_bust_removes_session() {
        let (service, _, repository) = service_with(vec![Ten, Nine, Seven, Seven, Five]);
        service.start("bob").await.unwrap();

        match service.hit("bob").await.unwrap() {
            Turn::Resolved(resolution) => assert_eq!(resolution.outcome, Outcome::PlayerBust),
            Turn::InProgress(_) => panic!("Expected bust"),
        }
        assert!(!repository.has_session("bob").await);
        assert_eq!(service.hit("bob").await, Err(BlackjackError::NoActiveSession));
    }

    #[tokio::test]
    async fn test_hit_keeps_session_and_hides_hole_card() {
        let (service, _, _) = service_with(vec![Two, Three, Queen, Ace, Four]);
        service.start("carol").await.unwrap();

        match service.hit("carol").await.unwrap() {
            Turn::InProgress(view) => {
                assert_eq!(view.player_cards.len(), 3);
                assert_eq!(view.player_value, 9);
                assert_eq!(view.dealer_up_card.map(|c| c.rank), Some(Queen));
            }
            Turn::Resolved(_) => panic!("Expected game in progress"),
        }
    }

    #[tokio::test]
    async fn test_stand_resolves_and_records() {
        let deck = Arc::new(StackedDeck::new([Ten, Seven, Six, Five, Six]));
        let recorder = Arc::new(CollectingRecorder {
            outcomes: Mutex::new(Vec::new()),
        });
        let service =
            BlackjackService::new(Arc::new(InMemorySessionRepository::new()), deck.clone())
                .with_recorder(recorder.clone());

        service.start("dave").await.unwrap();
        let resolution = service.stand("dave").await.unwrap();

        assert_eq!(resolution.outcome, Outcome::Push);
        assert_eq!(resolution.dealer_value, 17);
        assert_eq!(resolution.dealer.len(), 3);
        assert_eq!(*recorder.outcomes.lock().await, vec![Outcome::Push]);
        assert_eq!(service.active_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_players_do_not_share_games() {
        let (service, _, _) = service_with(vec![Ten, Two, Nine, Seven, Three, Four, Five, Six]);
        service.start("alice").await.unwrap();
        service.start("bob").await.unwrap();

        assert_eq!(service.active_sessions().await.unwrap(), 2);
        service.stand("alice").await.unwrap();
        assert!(service.peek("bob").await.is_ok());
    }

    #[test]
    fn test_player_locks_are_shared_while_held() {
        let locks = PlayerLocks::default();
        let first = locks.lock_for("alice");
        let second = locks.lock_for("alice");
        assert!(Arc::ptr_eq(&first, &second));

        let other = locks.lock_for("bob");
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
