// Move selection scenarios through the public engine API

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gomoku_engine::movegen::{adjacent_empty_cells, occupied_neighbors};
use gomoku_engine::{Board, Bot, Config, DecisionKind, Move, Player};

fn bot() -> Bot {
    Bot::new(Config::default_hardcoded())
}

fn board_with(x: &[(usize, usize)], o: &[(usize, usize)]) -> Board {
    let mut board = Board::new();
    for &(row, col) in x {
        board.place(row, col, Player::X).unwrap();
    }
    for &(row, col) in o {
        board.place(row, col, Player::O).unwrap();
    }
    board
}

/// 3 to 5 alternating stones scattered around the middle of the board
fn random_board(rng: &mut StdRng) -> Board {
    let mut board = Board::new();
    let stones = rng.random_range(3..=5);
    let mut player = Player::X;
    while board.stone_count() < stones {
        let row = rng.random_range(4..11);
        let col = rng.random_range(4..11);
        if board.place(row, col, player).unwrap() {
            player = player.opponent();
        }
    }
    board
}

#[test]
fn test_engine_opens_in_center_for_either_side() {
    for ai in [Player::X, Player::O] {
        let mut board = Board::new();
        assert_eq!(
            bot().best_move(&mut board, ai, ai.opponent()),
            Some(Move { row: 7, col: 7 })
        );
    }
}

#[test]
fn test_engine_completes_its_own_four() {
    let mut board = board_with(&[(8, 4), (8, 5), (9, 9)], &[(7, 3), (7, 4), (7, 5), (7, 6)]);
    let result = bot().best_move_with_stats(&mut board, Player::O, Player::X);

    assert_eq!(result.kind, DecisionKind::ImmediateWin);
    let mv = result.best_move.unwrap();
    assert_eq!(mv, Move { row: 7, col: 2 });

    board.place(mv.row, mv.col, Player::O).unwrap();
    assert_eq!(board.check_win(mv.row, mv.col), Ok(Some(Player::O)));
}

#[test]
fn test_engine_prefers_winning_over_blocking() {
    // Both sides hold a four; winning now beats blocking
    let mut board = board_with(
        &[(2, 3), (2, 4), (2, 5), (2, 6)],
        &[(10, 3), (10, 4), (10, 5), (10, 6)],
    );
    let mv = bot().best_move(&mut board, Player::O, Player::X).unwrap();
    board.place(mv.row, mv.col, Player::O).unwrap();
    assert_eq!(board.check_win(mv.row, mv.col), Ok(Some(Player::O)));
}

#[test]
fn test_engine_blocks_opponent_four() {
    let mut board = board_with(&[(4, 4), (5, 5), (6, 6), (7, 7)], &[(3, 3), (7, 8), (8, 7)]);
    let mv = bot().best_move(&mut board, Player::O, Player::X).unwrap();
    assert_eq!(mv, Move { row: 8, col: 8 });
}

#[test]
fn test_search_round_trip_leaves_no_residue() {
    let mut rng = StdRng::seed_from_u64(2024);
    let engine = bot();

    for _ in 0..3 {
        let mut board = random_board(&mut rng);
        let ai = board.current_player();
        let before = board.clone();

        let mv = engine.best_move(&mut board, ai, ai.opponent()).unwrap();
        assert_eq!(board, before, "search must restore the board");
        assert!(board.is_legal(mv.row, mv.col).unwrap());

        board.place(mv.row, mv.col, ai).unwrap();
        assert_eq!(board.stone_count(), before.stone_count() + 1);

        let changed: Vec<Move> = Board::coordinates()
            .filter(|m| board.get(m.row, m.col) != before.get(m.row, m.col))
            .collect();
        assert_eq!(changed, vec![mv]);
    }
}

#[test]
fn test_pruning_matches_exhaustive_search_on_random_boards() {
    let mut exhaustive_config = Config::default_hardcoded();
    exhaustive_config.search.pruning = false;
    let pruned = bot();
    let exhaustive = Bot::new(exhaustive_config);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..4 {
        let mut board = random_board(&mut rng);
        for ai in [Player::X, Player::O] {
            let a = pruned.best_move_with_stats(&mut board, ai, ai.opponent());
            let b = exhaustive.best_move_with_stats(&mut board, ai, ai.opponent());

            assert_eq!(a.best_move, b.best_move);
            assert_eq!(a.value, b.value);
            assert!(a.nodes <= b.nodes);
            assert_eq!(b.cutoffs, 0);
        }
    }
}

#[test]
fn test_chosen_move_is_always_a_candidate() {
    let mut rng = StdRng::seed_from_u64(99);
    let engine = bot();

    for _ in 0..3 {
        let mut board = random_board(&mut rng);
        let candidates = adjacent_empty_cells(&board);
        assert!(!candidates.is_empty());
        for m in &candidates {
            assert!(board.is_legal(m.row, m.col).unwrap());
            assert!(occupied_neighbors(&board, m.row, m.col).unwrap() > 0);
        }

        let mv = engine.best_move(&mut board, Player::O, Player::X).unwrap();
        assert!(candidates.contains(&mv));
    }
}

#[test]
fn test_depth_one_search_agrees_with_exhaustive() {
    let mut config = Config::default_hardcoded();
    config.search.depth = 1;
    let pruned = Bot::new(config.clone());
    config.search.pruning = false;
    let exhaustive = Bot::new(config);

    let mut board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);
    assert_eq!(
        pruned.best_move(&mut board, Player::O, Player::X),
        exhaustive.best_move(&mut board, Player::O, Player::X)
    );
}
