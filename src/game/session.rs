// A GameSession is one player's hand against the dealer. It is created by a
// deal, grows through hits and ends with a stand, a bust or a natural on the
// deal. Once resolved it is dropped from the store; the Resolution is all that
// survives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards::Card;
use super::dealer::play_dealer;
use super::deck::CardSource;
use super::hand::{Hand, BLACKJACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Natural 21 on the deal, dealer without 21
    PlayerBlackjack,
    PlayerWin,
    /// Player wins because the dealer went over 21
    DealerBust,
    DealerWin,
    PlayerBust,
    Push,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Dealer,
    Nobody,
}

impl Outcome {
    pub fn winner(self) -> Winner {
        match self {
            Outcome::PlayerBlackjack | Outcome::PlayerWin | Outcome::DealerBust => Winner::Player,
            Outcome::DealerWin | Outcome::PlayerBust => Winner::Dealer,
            Outcome::Push => Winner::Nobody,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Outcome::PlayerBlackjack => "Blackjack! You win.",
            Outcome::PlayerWin => "You win.",
            Outcome::DealerBust => "Dealer busts. You win.",
            Outcome::DealerWin => "Dealer wins.",
            Outcome::PlayerBust => "Bust! Dealer wins.",
            Outcome::Push => "Push. It's a tie.",
        }
    }
}

/// What the player is allowed to see while the game is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub player_cards: Vec<Card>,
    pub player_value: u8,
    pub dealer_up_card: Option<Card>,
}

/// Final state of a finished game, both hands revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub session_id: Uuid,
    pub player_key: String,
    pub outcome: Outcome,
    pub player: Hand,
    pub dealer: Hand,
    pub player_value: u8,
    pub dealer_value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    InProgress(TableView),
    Resolved(Resolution),
}

impl Turn {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Turn::Resolved(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    id: Uuid,
    player_key: String,
    player: Hand,
    dealer: Hand,
    finished: bool,
    started_at: DateTime<Utc>,
}

impl GameSession {
    /// Deals two cards each, player first.
    ///
    /// A player 21 on the deal resolves the game immediately: push if the
    /// dealer also holds 21, blackjack otherwise.
    pub fn deal(player_key: &str, source: &dyn CardSource) -> (Self, Turn) {
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        player.push(source.draw_card());
        player.push(source.draw_card());
        dealer.push(source.draw_card());
        dealer.push(source.draw_card());

        let mut session = Self {
            id: Uuid::new_v4(),
            player_key: player_key.to_string(),
            player,
            dealer,
            finished: false,
            started_at: Utc::now(),
        };

        let turn = if session.player.value() == BLACKJACK {
            let outcome = if session.dealer.value() == BLACKJACK {
                Outcome::Push
            } else {
                Outcome::PlayerBlackjack
            };
            Turn::Resolved(session.resolve(outcome))
        } else {
            Turn::InProgress(session.view())
        };

        (session, turn)
    }

    /// Builds a running session from known hands.
    pub fn with_hands(player_key: &str, player: Hand, dealer: Hand) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_key: player_key.to_string(),
            player,
            dealer,
            finished: false,
            started_at: Utc::now(),
        }
    }

    pub fn hit(&mut self, source: &dyn CardSource) -> Turn {
        self.player.push(source.draw_card());

        if self.player.is_bust() {
            Turn::Resolved(self.resolve(Outcome::PlayerBust))
        } else {
            Turn::InProgress(self.view())
        }
    }

    pub fn stand(&mut self, source: &dyn CardSource) -> Resolution {
        play_dealer(&mut self.dealer, source);

        let player_value = self.player.value();
        let dealer_value = self.dealer.value();
        let outcome = if dealer_value > BLACKJACK {
            Outcome::DealerBust
        } else if player_value > dealer_value {
            Outcome::PlayerWin
        } else if dealer_value > player_value {
            Outcome::DealerWin
        } else {
            Outcome::Push
        };

        self.resolve(outcome)
    }

    pub fn view(&self) -> TableView {
        TableView {
            player_cards: self.player.cards().to_vec(),
            player_value: self.player.value(),
            dealer_up_card: self.dealer.up_card(),
        }
    }

    fn resolve(&mut self, outcome: Outcome) -> Resolution {
        self.finished = true;
        Resolution {
            session_id: self.id,
            player_key: self.player_key.clone(),
            outcome,
            player: self.player.clone(),
            dealer: self.dealer.clone(),
            player_value: self.player.value(),
            dealer_value: self.dealer.value(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player_key(&self) -> &str {
        &self.player_key
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
