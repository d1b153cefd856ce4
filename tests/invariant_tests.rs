//! Property-based tests for board invariants.
//!
//! Run with: cargo test --release invariant

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use colonial_twilight::board::{Alignment, Board, Control, Forces, Location, PieceKind, Space, TrackKind, Toward};
use colonial_twilight::bot::FlnBot;
use colonial_twilight::core::{GameContext, GameOptions, RulesError};
use colonial_twilight::rules::{possible_actions, ActionChoice, Player};

fn total(board: &Board, kind: PieceKind) -> u32 {
    let pools = [Location::Available, Location::Casualties, Location::OutOfPlay];
    let off_map: u32 = pools.iter().map(|l| board.count_at(*l, kind)).sum();
    off_map + board.total(|s| s.count(kind))
}

fn fln_guerrillas(board: &Board) -> u32 {
    total(board, PieceKind::FlnUnderground) + total(board, PieceKind::FlnActive)
}

fn choice() -> impl Strategy<Value = Option<ActionChoice>> {
    prop_oneof![Just(None), proptest::sample::select(ActionChoice::ALL.to_vec()).prop_map(Some)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Control is derived from piece strength alone.
    #[test]
    fn prop_control_follows_strength(
        ft in 0u32..4, fp in 0u32..4, at in 0u32..4, ap in 0u32..4, gb in 0u32..2,
        fu in 0u32..6, fa in 0u32..6, fb in 0u32..2,
    ) {
        let mut forces = Forces::territory();
        for (kind, n) in [
            (PieceKind::FrenchTroops, ft),
            (PieceKind::FrenchPolice, fp),
            (PieceKind::AlgerianTroops, at),
            (PieceKind::AlgerianPolice, ap),
            (PieceKind::GovBase, gb),
            (PieceKind::FlnUnderground, fu),
            (PieceKind::FlnActive, fa),
            (PieceKind::FlnBase, fb),
        ] {
            forces.add(kind, n as i32).unwrap();
        }
        let gov = ft + fp + at + ap + gb;
        let fln = fu + fa + fb;
        let expected = if gov > fln {
            Control::Gov
        } else if fln > gov {
            Control::Fln
        } else {
            Control::Uncontrolled
        };
        prop_assert_eq!(forces.control(), Some(expected));
        prop_assert_eq!(Control::from_strength(gov, fln), expected);
    }

    /// Resource tracks saturate at their bounds instead of failing.
    #[test]
    fn prop_resources_clamped(start in 0i32..=50, deltas in proptest::collection::vec(-60i32..60, 1..20)) {
        let mut board = Board::new();
        board.set_track(TrackKind::FlnResources, start).unwrap();
        let mut expected = start;
        for delta in deltas {
            expected = (expected + delta).clamp(0, 50);
            prop_assert_eq!(board.shift_track(TrackKind::FlnResources, delta).unwrap(), expected);
        }
    }

    /// The France track refuses to leave its range and keeps its value.
    #[test]
    fn prop_france_track_hard(start in 0i32..=5, delta in -10i32..10) {
        let mut board = Board::new();
        board.set_track(TrackKind::France, start).unwrap();
        match board.shift_track(TrackKind::France, delta) {
            Ok(value) => prop_assert_eq!(value, start + delta),
            Err(RulesError::TrackOutOfRange { .. }) => {
                prop_assert!(!(0..=5).contains(&(start + delta)));
                prop_assert_eq!(board.france_track(), start);
            }
            Err(other) => prop_assert!(false, "unexpected {}", other),
        }
    }

    /// Alignment moves one step at a time and stops at the extremes.
    #[test]
    fn prop_alignment_steps(moves in proptest::collection::vec(any::<bool>(), 1..12)) {
        let mut board = Board::new();
        let batna = board.id_of("Batna").unwrap();
        let mut level = 0i32;
        for oppose in moves {
            let toward = if oppose { Toward::Oppose } else { Toward::Support };
            let next = level + if oppose { 1 } else { -1 };
            let result = board.space_mut(batna).shift(toward);
            if (-1..=1).contains(&next) {
                prop_assert!(result.is_ok());
                level = next;
            } else {
                prop_assert!(matches!(result, Err(RulesError::AlignmentAtExtreme { .. })), "expected AlignmentAtExtreme, got {:?}", result);
            }
            let expected = match level {
                -1 => Alignment::Support,
                0 => Alignment::Neutral,
                _ => Alignment::Oppose,
            };
            prop_assert_eq!(board.space(batna).alignment(), expected);
        }
    }

    /// A bot half-round on the short scenario stays legal and never creates
    /// or destroys pieces.
    #[test]
    fn prop_bot_half_round_conserves_pieces(seed in any::<u64>(), previous in choice()) {
        let mut ctx = GameContext::new(GameOptions::default().with_seed(seed)).unwrap();
        let before: Vec<u32> = PieceKind::ALL.iter().map(|k| total(&ctx.board, *k)).collect();
        let guerrillas = fln_guerrillas(&ctx.board);
        let possible = possible_actions(previous);

        let conducted = FlnBot::new().play(&mut ctx, previous, &possible).unwrap();

        prop_assert!(possible.contains(&conducted));
        prop_assert_eq!(fln_guerrillas(&ctx.board), guerrillas);
        for kind in [PieceKind::FlnBase, PieceKind::FrenchTroops, PieceKind::FrenchPolice, PieceKind::GovBase] {
            let i = PieceKind::ALL.iter().position(|k| *k == kind).unwrap();
            prop_assert_eq!(total(&ctx.board, kind), before[i]);
        }
        prop_assert!((0..=50).contains(&ctx.board.fln_resources()));
        prop_assert_eq!(ctx.board.fln_resources(), 15 - ctx.turn.cost());
        prop_assert!(!ctx.board.has(|s: &Space| s.bases() > s.max_bases()));
    }
}
