use serde::{Deserialize, Serialize};
use std::fmt;

use super::cards::{Card, Rank};

pub const BLACKJACK: u8 = 21;

/// Best total for a set of cards under ace-flex rules.
///
/// Aces start at 11 and drop to 1 one at a time while the total is over 21.
/// The result is the highest total <= 21 when one exists, otherwise the
/// lowest bust total. An empty hand is worth 0.
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).0
}

/// Returns the total and how many aces are still counted as 11.
///
/// Sums in u16 so ace adjustment stays exact for any hand size. A total
/// above 255 is reported as 255, which is still a bust.
fn evaluate(cards: &[Card]) -> (u8, usize) {
    let mut total: u16 = 0;
    let mut soft_aces: usize = 0;

    for card in cards {
        total = total.saturating_add(u16::from(card.value()));
        if card.rank == Rank::Ace {
            soft_aces += 1;
        }
    }

    while total > u16::from(BLACKJACK) && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }

    (u8::try_from(total).unwrap_or(u8::MAX), soft_aces)
}

/// Ordered cards held by one party at the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn from_ranks(ranks: &[Rank]) -> Self {
        Self {
            cards: ranks.iter().copied().map(Card::from).collect(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// First card dealt, the only one shown for the dealer mid-game
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    /// An ace is still counted as 11
    pub fn is_soft(&self) -> bool {
        evaluate(&self.cards).1 > 0
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Two-card 21
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "{}", shown.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use Rank::*;

    #[rstest]
    #[case(&[], 0)]
    #[case(&[Ace], 11)]
    #[case(&[Ace, King], 21)]
    #[case(&[Ace, Ace], 12)]
    #[case(&[Ace, Ace, Ace], 13)]
    #[case(&[Ace, Six, Ten], 17)]
    #[case(&[Ace, Ace, Nine], 21)]
    #[case(&[Ace, Ace, Ten, Ten], 22)]
    #[case(&[Ten, Nine, Five], 24)]
    #[case(&[Jack, Queen], 20)]
    #[case(&[Two, Three, Four, Five, Six], 20)]
    #[case(&[Ace, Ace, Ace, Ace, Seven], 21)]
    fn test_hand_value(#[case] ranks: &[Rank], #[case] expected: u8) {
        assert_eq!(Hand::from_ranks(ranks).value(), expected);
    }

    #[test]
    fn test_oversized_hands_keep_ace_adjustment() {
        let aces = Hand::from_ranks(&[Ace; 30]);
        assert_eq!(aces.value(), 30);
        assert!(aces.is_bust());
        assert!(!aces.is_soft());

        let mut eleven_aces = vec![Ace; 11];
        eleven_aces.push(Ten);
        assert_eq!(Hand::from_ranks(&eleven_aces).value(), 21);

        let kings = Hand::from_ranks(&[King; 30]);
        assert_eq!(kings.value(), u8::MAX);
        assert!(kings.is_bust());
    }

    #[rstest]
    #[case(&[Ace, Six], true)]
    #[case(&[Ace, Six, Ten], false)]
    #[case(&[Ten, Seven], false)]
    #[case(&[Ace, Ace], true)]
    fn test_is_soft(#[case] ranks: &[Rank], #[case] soft: bool) {
        assert_eq!(Hand::from_ranks(ranks).is_soft(), soft);
    }

    #[test]
    fn test_value_is_order_invariant() {
        let ranks = [Ace, Nine, Ace, Five, King];
        let expected = Hand::from_ranks(&ranks).value();

        // Every rotation and the reverse evaluate the same.
        for shift in 0..ranks.len() {
            let mut rotated = ranks.to_vec();
            rotated.rotate_left(shift);
            assert_eq!(Hand::from_ranks(&rotated).value(), expected);
            rotated.reverse();
            assert_eq!(Hand::from_ranks(&rotated).value(), expected);
        }
    }

    #[test]
    fn test_no_ace_hands_are_plain_sums() {
        for a in Rank::ALL.iter().copied().filter(|r| *r != Ace) {
            for b in Rank::ALL.iter().copied().filter(|r| *r != Ace) {
                for c in Rank::ALL.iter().copied().filter(|r| *r != Ace) {
                    let hand = Hand::from_ranks(&[a, b, c]);
                    assert_eq!(hand.value(), a.base_value() + b.base_value() + c.base_value());
                }
            }
        }
    }

    fn non_ace_cards_summing_to(total: u8) -> Vec<Rank> {
        let pip = |n: u8| match n {
            2 => Two,
            3 => Three,
            4 => Four,
            5 => Five,
            6 => Six,
            7 => Seven,
            8 => Eight,
            9 => Nine,
            _ => Ten,
        };

        let mut ranks = Vec::new();
        let mut remaining = total;
        while remaining > 0 {
            if remaining >= 12 {
                ranks.push(Ten);
                remaining -= 10;
            } else if remaining == 11 {
                ranks.extend([Nine, Two]);
                remaining = 0;
            } else {
                ranks.push(pip(remaining));
                remaining = 0;
            }
        }
        ranks
    }

    #[test]
    fn test_best_total_matches_exhaustive_ace_assignment() {
        // Compare against trying every {1, 11} choice per ace.
        for aces in 0..=4usize {
            // A total of 1 cannot be made without an ace.
            for other in (0..=30u8).filter(|n| *n != 1) {
                let mut best: Option<u8> = None;
                for mask in 0..(1u32 << aces) {
                    let elevens = mask.count_ones() as u8;
                    let total = other + aces as u8 + elevens * 10;
                    if total <= BLACKJACK {
                        best = Some(best.map_or(total, |b| b.max(total)));
                    }
                }
                let expected = best.unwrap_or(other + aces as u8);

                let mut cards: Vec<Card> = vec![Card::from(Ace); aces];
                cards.extend(non_ace_cards_summing_to(other).into_iter().map(Card::from));

                assert_eq!(hand_value(&cards), expected, "aces={aces} other={other}");
            }
        }
    }

    #[test]
    fn test_natural_requires_two_cards() {
        assert!(Hand::from_ranks(&[Ace, Queen]).is_natural());
        assert!(!Hand::from_ranks(&[Seven, Seven, Seven]).is_natural());
        assert!(!Hand::from_ranks(&[Ten, Ten]).is_natural());
    }

    #[test]
    fn test_bust_and_up_card() {
        let hand = Hand::from_ranks(&[Ten, Nine, Five]);
        assert!(hand.is_bust());
        assert_eq!(hand.up_card().map(|c| c.rank), Some(Ten));
        assert_eq!(Hand::new().up_card(), None);
    }
}
