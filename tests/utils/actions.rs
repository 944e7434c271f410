use blackjack_table::game::{Resolution, TableView, Turn};

pub fn expect_in_progress(turn: Turn) -> TableView {
    match turn {
        Turn::InProgress(view) => view,
        Turn::Resolved(resolution) => {
            panic!("Expected game in progress, got {:?}", resolution.outcome)
        }
    }
}

pub fn expect_resolved(turn: Turn) -> Resolution {
    match turn {
        Turn::Resolved(resolution) => resolution,
        Turn::InProgress(view) => panic!(
            "Expected resolved game, player still at {}",
            view.player_value
        ),
    }
}
