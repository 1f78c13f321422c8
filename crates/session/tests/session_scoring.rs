use blast_core::{Block, BlockColor, BlockSet, Board, Shape};
use blast_engine::{GeneratorConfig, ScoreConfig};
use blast_search::{BlockGenerator, GenerateError};
use blast_session::{
    GameStatus, HighScoreStore, JsonFileHighScore, MemoryHighScore, Session, SessionError,
    StoreError,
};

/// `#` is filled; row 0 first.
fn board(rows: [&str; 8]) -> Board {
    let mut b = Board::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            b.set(x, y, c == '#');
        }
    }
    b
}

fn tray(shapes: [Shape; 3]) -> BlockSet {
    BlockSet::new(shapes.map(|s| Block::new(s, BlockColor(0))))
}

fn session_with(board: Board, shapes: [Shape; 3]) -> Session {
    session_with_config(board, shapes, GeneratorConfig::default())
}

fn session_with_config(board: Board, shapes: [Shape; 3], config: GeneratorConfig) -> Session {
    Session::from_state(
        board,
        tray(shapes),
        BlockGenerator::seeded(0, config),
        ScoreConfig::default(),
        Box::new(MemoryHighScore::default()),
    )
}

/// Rows 6 and 7 stop short of column 7, which is filled above them.
/// `with_anchor` adds a stray cell at (0,0) that survives the clear.
fn two_rows_one_col(with_anchor: bool) -> Board {
    let mut b = board([
        ".......#",
        ".......#",
        ".......#",
        ".......#",
        ".......#",
        ".......#",
        "#######.",
        "#######.",
    ]);
    if with_anchor {
        b.set(0, 0, true);
    }
    b
}

mod line_scores {
    use super::*;

    #[test]
    fn test_1_1_three_cells_one_row() {
        let b = board([
            "#.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "#####...",
        ]);
        let mut session = session_with(b, [Shape::H3, Shape::H2, Shape::V2]);
        let outcome = session.place_block(0, 5, 7).unwrap();
        assert_eq!(outcome.cleared.rows.as_slice(), &[7]);
        assert_eq!(outcome.combo, 1);
        assert_eq!(outcome.points.placement, 3);
        assert_eq!(outcome.points.lines, 15);
        assert!(!outcome.perfect_clear);
        assert_eq!(session.score(), 18);
    }

    #[test]
    fn test_1_2_two_rows_one_col_at_once() {
        let mut session = session_with(two_rows_one_col(true), [Shape::V2, Shape::H2, Shape::H2]);
        let outcome = session.place_block(0, 7, 6).unwrap();
        assert_eq!(outcome.cleared.total(), 3);
        assert_eq!(outcome.cleared.rows.as_slice(), &[6, 7]);
        assert_eq!(outcome.cleared.cols.as_slice(), &[7]);
        // (3*10 + 3*30) * 1.5
        assert_eq!(outcome.points.lines, 180);
        assert_eq!(session.score(), 182);
        assert_eq!(session.board().count_occupied(), 1);
        assert!(session.board().is_occupied(0, 0));
    }

    #[test]
    fn test_1_3_dry_placement_scores_cells_only() {
        let mut session = session_with(Board::new(), [Shape::Square3, Shape::H2, Shape::H2]);
        let outcome = session.place_block(0, 2, 2).unwrap();
        assert!(outcome.cleared.is_empty());
        assert_eq!(outcome.combo, 0);
        assert_eq!(session.score(), 9);
    }
}

mod combo_chain {
    use super::*;

    fn staircase() -> Board {
        board([
            "#.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "######..",
            "#####...",
        ])
    }

    #[test]
    fn test_2_1_second_clear_doubles() {
        let mut session = session_with(staircase(), [Shape::H3, Shape::H2, Shape::V2]);
        session.place_block(0, 5, 7).unwrap();
        let outcome = session.place_block(1, 6, 6).unwrap();
        assert_eq!(outcome.combo, 2);
        // 10 * (1 + 2*0.5)
        assert_eq!(outcome.points.lines, 20);
        assert_eq!(session.score(), 18 + 22);
    }

    #[test]
    fn test_2_2_dry_placement_breaks_chain() {
        let mut session = session_with(staircase(), [Shape::H3, Shape::H2, Shape::V2]);
        session.place_block(0, 5, 7).unwrap();
        session.place_block(1, 6, 6).unwrap();
        let outcome = session.place_block(2, 3, 2).unwrap();
        assert_eq!(outcome.combo, 0);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.score(), 42);
    }
}

mod perfect_clear {
    use super::*;

    #[test]
    fn test_3_1_bonus_stacks_with_lines() {
        let mut session = session_with(two_rows_one_col(false), [Shape::V2, Shape::H2, Shape::H2]);
        let outcome = session.place_block(0, 7, 6).unwrap();
        assert!(outcome.perfect_clear);
        assert!(session.board().is_empty());
        assert_eq!(outcome.points.perfect, 300);
        assert_eq!(session.score(), 2 + 180 + 300);
    }

    #[test]
    fn test_3_2_half_full_board_wiped() {
        let b = board([
            ".......#",
            ".......#",
            ".......#",
            ".......#",
            "#######.",
            "#######.",
            "#######.",
            "#######.",
        ]);
        let mut session = session_with(b, [Shape::V4, Shape::H2, Shape::H2]);
        let outcome = session.place_block(0, 7, 4).unwrap();
        assert_eq!(outcome.cleared.total(), 5);
        // (5*10 + 5*30) * 1.5
        assert_eq!(outcome.points.lines, 300);
        assert_eq!(outcome.points.total(), 4 + 300 + 300);
        assert!(session.board().is_empty());
    }
}

mod game_flow {
    use super::*;

    /// Two long columns leave no 3x3 hole anywhere.
    fn no_room_for_square3() -> Board {
        board([
            "..#.....",
            "..#..#..",
            "..#..#..",
            "..#..#..",
            "..#..#..",
            "..#..#..",
            "..#..#..",
            ".....#..",
        ])
    }

    #[test]
    fn test_4_1_refill_after_third_block() {
        let mut session = session_with(Board::new(), [Shape::H2, Shape::H2, Shape::H2]);
        assert!(session.place_block(0, 0, 0).unwrap().dealt.is_none());
        assert!(session.place_block(1, 0, 2).unwrap().dealt.is_none());
        let outcome = session.place_block(2, 0, 4).unwrap();
        assert!(outcome.dealt.is_some());
        assert!(!outcome.game_over);
        assert!(session.blocks().iter().all(|b| !b.used));
        assert_eq!(session.generation_count(), 1);
    }

    #[test]
    fn test_4_2_no_moves_ends_game() {
        let mut session = session_with(
            no_room_for_square3(),
            [Shape::H2, Shape::Square3, Shape::Square3],
        );
        assert_eq!(session.status(), GameStatus::Playing);
        let outcome = session.place_block(0, 0, 0).unwrap();
        assert!(outcome.game_over);
        assert!(session.is_game_over());
        assert_eq!(session.playable_blocks(), [false; 3]);
        assert_eq!(session.place_block(1, 0, 0), Err(SessionError::GameOver));
        assert!(session.preview(1, 0, 0).is_none());
    }

    #[test]
    fn test_4_3_failed_refill_ends_game() {
        let config = GeneratorConfig {
            max_attempts: 0,
            puzzle_samples: 0,
            ..GeneratorConfig::default()
        };
        let mut session =
            session_with_config(Board::new(), [Shape::H2, Shape::H2, Shape::H2], config);
        session.place_block(0, 0, 0).unwrap();
        session.place_block(1, 2, 0).unwrap();
        let outcome = session.place_block(2, 4, 0).unwrap();
        assert!(outcome.game_over);
        assert!(outcome.dealt.is_none());
        assert_eq!(session.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_4_4_restart_leaves_game_over() {
        let mut session = session_with(
            no_room_for_square3(),
            [Shape::H2, Shape::Square3, Shape::Square3],
        );
        session.place_block(0, 0, 0).unwrap();
        assert!(session.is_game_over());

        session.restart().unwrap();
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), 0);
        assert!(session.board().is_empty());
        assert_eq!(session.high_score(), 2);
        assert_eq!(session.generation_count(), 1);
    }

    #[test]
    fn test_4_5_failed_restart_keeps_old_game() {
        let config = GeneratorConfig {
            max_attempts: 0,
            ..GeneratorConfig::default()
        };
        let b = board([
            "#.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let mut session = session_with_config(b, [Shape::H2, Shape::H2, Shape::H2], config);
        session.place_block(0, 2, 0).unwrap();
        let before = *session.board();

        assert_eq!(
            session.restart(),
            Err(SessionError::Deal(GenerateError::Exhausted { attempts: 0 }))
        );
        assert!(session.is_game_over());
        assert_eq!(*session.board(), before);
        assert_eq!(session.score(), 2);
        assert_eq!(session.blocks().iter().filter(|b| b.used).count(), 1);
        assert_eq!(session.place_block(1, 4, 0), Err(SessionError::GameOver));
    }

    #[test]
    fn test_4_6_unplayable_tray_starts_over() {
        let session = session_with(
            no_room_for_square3(),
            [Shape::Square3, Shape::Square3, Shape::Square3],
        );
        assert!(session.is_game_over());
    }

    #[test]
    fn test_4_7_preview_predicts_clear() {
        let b = board([
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "#####...",
        ]);
        let session = session_with(b, [Shape::H3, Shape::H2, Shape::H2]);
        let lines = session.preview(0, 5, 7).unwrap();
        assert_eq!(lines.rows.as_slice(), &[7]);
        assert!(session.preview(0, 6, 7).is_none());
        assert_eq!(*session.board(), b);
    }
}

mod high_score {
    use super::*;

    struct Broken;

    impl HighScoreStore for Broken {
        fn load(&self) -> Result<u64, StoreError> {
            Err(std::io::Error::other("unreadable").into())
        }

        fn save(&mut self, _score: u64) -> Result<(), StoreError> {
            Err(std::io::Error::other("read-only").into())
        }
    }

    #[test]
    fn test_5_1_persisted_across_sessions() {
        let path = std::env::temp_dir().join(format!("blast-session-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut session = Session::from_state(
            Board::new(),
            tray([Shape::Square3, Shape::H2, Shape::H2]),
            BlockGenerator::seeded(0, GeneratorConfig::default()),
            ScoreConfig::default(),
            Box::new(JsonFileHighScore::new(&path)),
        );
        session.place_block(0, 0, 0).unwrap();
        assert_eq!(session.high_score(), 9);

        let stored = JsonFileHighScore::new(&path).load().unwrap();
        assert_eq!(stored, 9);

        let next = Session::new(
            BlockGenerator::seeded(1, GeneratorConfig::default()),
            ScoreConfig::default(),
            Box::new(JsonFileHighScore::new(&path)),
        )
        .unwrap();
        assert_eq!(next.high_score(), 9);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_5_2_broken_store_does_not_stop_play() {
        let mut session = Session::from_state(
            Board::new(),
            tray([Shape::Square3, Shape::H2, Shape::H2]),
            BlockGenerator::seeded(0, GeneratorConfig::default()),
            ScoreConfig::default(),
            Box::new(Broken),
        );
        assert_eq!(session.high_score(), 0);
        session.place_block(0, 0, 0).unwrap();
        assert_eq!(session.score(), 9);
        assert_eq!(session.high_score(), 9);
    }

    #[test]
    fn test_5_3_lower_score_keeps_record() {
        let mut session = Session::from_state(
            Board::new(),
            tray([Shape::H2, Shape::H2, Shape::H2]),
            BlockGenerator::seeded(0, GeneratorConfig::default()),
            ScoreConfig::default(),
            Box::new(MemoryHighScore::new(500)),
        );
        session.place_block(0, 0, 0).unwrap();
        assert_eq!(session.high_score(), 500);
    }
}
