//! Randomised checks of the search.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::lines::{check_win, lines};
use crate::moves::generate_moves;
use crate::piece::{PieceState, Player};
use crate::search::{SearchConfig, Searcher};

fn cell() -> impl Strategy<Value = PieceState> {
    prop::sample::select(vec!['.', '.', '.', '.', 'F', 'S', 'D', 'f', 's', 'd'])
        .prop_map(|ch| PieceState::from_glyph(ch).unwrap_or_default())
}

fn board() -> impl Strategy<Value = Board> {
    (prop::collection::vec(cell(), 25), any::<bool>()).prop_map(|(cells, two)| {
        let to_move = if two { Player::Two } else { Player::One };
        let mut b = Board::empty(5, to_move);
        for (i, piece) in cells.into_iter().enumerate() {
            b.set(i as i32 / 5, i as i32 % 5, piece);
        }
        b
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn pruning_does_not_change_the_choice(b in board(), depth in 0u32..3, seed in any::<u64>()) {
        let cfg = SearchConfig { depth, ..SearchConfig::default() };
        let full_cfg = SearchConfig { pruning: false, ..cfg.clone() };
        let pruned = Searcher::new(cfg, StdRng::seed_from_u64(seed)).search(&b);
        let full = Searcher::new(full_cfg, StdRng::seed_from_u64(seed)).search(&b);
        prop_assert_eq!(pruned.score, full.score);
        prop_assert_eq!(pruned.best, full.best);
        prop_assert!(pruned.nodes <= full.nodes);
    }

    #[test]
    fn chosen_move_is_legal(b in board(), seed in any::<u64>()) {
        let cfg = SearchConfig { depth: 1, ..SearchConfig::default() };
        let out = Searcher::new(cfg, StdRng::seed_from_u64(seed)).search(&b);
        let legal = generate_moves(&b);
        if legal.is_empty() {
            prop_assert!(!out.best.is_valid());
        } else {
            prop_assert!(legal.contains(&out.best));
        }
    }

    #[test]
    fn moves_only_land_on_empty_cells(b in board()) {
        for mv in generate_moves(&b) {
            prop_assert_eq!(b.owner(mv.from_row, mv.from_col), b.to_move());
            prop_assert!(b.is_empty_at(mv.to_row, mv.to_col));
            let after = b.apply(mv);
            prop_assert_eq!(after.count(Player::One), b.count(Player::One));
            prop_assert_eq!(after.count(Player::Two), b.count(Player::Two));
        }
    }

    #[test]
    fn reported_winner_owns_a_full_line(b in board()) {
        if let Some(winner) = check_win(&b) {
            let full = lines(b.size()).any(|l| l.owners(&b).iter().all(|&o| o == winner));
            prop_assert!(full);
        } else {
            for l in lines(b.size()) {
                let owners = l.owners(&b);
                prop_assert!(owners[0] == Player::None || owners.iter().any(|&o| o != owners[0]));
            }
        }
    }
}
