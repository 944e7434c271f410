use serde::{Deserialize, Serialize};

use crate::game::{Card, Hand, Outcome, Resolution, TableView, Winner};

pub const HIDDEN_CARD: &str = "??";

/// What a chat front-end shows for one blackjack command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub title: String,
    pub description: String,
    pub player_cards: Vec<String>,
    pub dealer_cards: Vec<String>,
    pub player_value: Option<u8>,
    /// While a game runs this is the value of the up card alone
    pub dealer_value: Option<u8>,
    /// Detailed result. `dealer_bust` and `player_blackjack` are both player
    /// wins; read `winner` for the plain win/loss/push.
    pub outcome: Option<Outcome>,
    pub winner: Option<Winner>,
    /// The player can still hit or stand
    pub active: bool,
}

impl CommandReply {
    pub fn in_progress(view: &TableView) -> Self {
        let mut dealer_cards = Vec::new();
        if let Some(card) = view.dealer_up_card {
            dealer_cards.push(card.to_string());
            dealer_cards.push(HIDDEN_CARD.to_string());
        }

        Self {
            title: "Blackjack".to_string(),
            description: format!(
                "Your hand is worth {}. Hit or stand?",
                view.player_value
            ),
            player_cards: render(&view.player_cards),
            dealer_cards,
            player_value: Some(view.player_value),
            dealer_value: view.dealer_up_card.map(|card| card.value()),
            outcome: None,
            winner: None,
            active: true,
        }
    }

    pub fn resolved(resolution: &Resolution) -> Self {
        Self {
            title: "Blackjack - game over".to_string(),
            description: format!(
                "{} You: {}, dealer: {}.",
                resolution.outcome.describe(),
                resolution.player_value,
                resolution.dealer_value
            ),
            player_cards: render_hand(&resolution.player),
            dealer_cards: render_hand(&resolution.dealer),
            player_value: Some(resolution.player_value),
            dealer_value: Some(resolution.dealer_value),
            outcome: Some(resolution.outcome),
            winner: Some(resolution.outcome.winner()),
            active: false,
        }
    }

    /// Reply for a command that could not run
    pub fn failure(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: message.into(),
            player_cards: Vec::new(),
            dealer_cards: Vec::new(),
            player_value: None,
            dealer_value: None,
            outcome: None,
            winner: None,
            active: false,
        }
    }
}

fn render(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::to_string).collect()
}

fn render_hand(hand: &Hand) -> Vec<String> {
    render(hand.cards())
}
