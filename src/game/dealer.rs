use tracing::trace;

use super::deck::CardSource;
use super::hand::Hand;

/// The dealer draws below this total and stands at or above it.
pub const DEALER_STANDS_ON: u8 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerState {
    Drawing,
    Done,
}

/// Fixed house rule: hit on 16, stand on any 17 or higher.
///
/// The threshold is checked against the ace-adjusted total, so a soft 17
/// stands exactly like a hard one.
pub fn next_state(hand: &Hand) -> DealerState {
    if hand.value() < DEALER_STANDS_ON {
        DealerState::Drawing
    } else {
        DealerState::Done
    }
}

/// Draws for the dealer until the policy reaches `Done`.
///
/// Returns the number of cards drawn.
pub fn play_dealer(hand: &mut Hand, source: &dyn CardSource) -> usize {
    let mut drawn = 0;
    while next_state(hand) == DealerState::Drawing {
        let card = source.draw_card();
        hand.push(card);
        drawn += 1;
        trace!(%card, total = hand.value(), "Dealer drew");
    }
    drawn
}
