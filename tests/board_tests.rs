//! Board integration tests on the short scenario.

use colonial_twilight::board::{
    Alignment, Board, BoardSnapshot, Control, ControlChange, Location, PieceKind, Space, TrackKind,
};
use colonial_twilight::core::{RulesError, Scenario};
use colonial_twilight::turn::{Operation, Step, Target, Turn};

fn short() -> Board {
    Board::load(Scenario::Short).unwrap()
}

// =============================================================================
// Scenario Setup
// =============================================================================

/// Test that the short scenario sets tracks and pools as printed.
#[test]
fn test_short_scenario_tracks_and_pools() {
    let board = short();

    assert_eq!(board.fln_resources(), 15);
    assert_eq!(board.gov_resources(), 20);
    assert_eq!(board.commitment(), 15);
    assert_eq!(board.france_track(), 4);
    assert_eq!(board.track(TrackKind::France).letter(), 'E');
    assert_eq!(board.border_zone_track(), 3);

    assert_eq!(board.available().gov_bases(), 2);
    assert_eq!(board.available().french_police(), 4);
    assert_eq!(board.available().fln_bases(), 7);
    assert_eq!(board.available().fln_underground(), 8);
    assert_eq!(board.out_of_play().fln_underground(), 5);
}

/// Test that victory aggregates are computed after loading.
#[test]
fn test_short_scenario_victory_tracks() {
    let board = short();

    // 8 FLN bases + 11 population at Oppose
    assert_eq!(board.opposition_bases(), 19);
    // commitment 15 + Constantine, Algiers and Oran at Support
    assert_eq!(board.support_commitment(), 22);
    assert_eq!(board.compute_opposition_bases(), board.opposition_bases());
}

/// Test that the map carries the expected pieces.
#[test]
fn test_short_scenario_pieces() {
    let board = short();

    assert_eq!(board.total(Space::guerrillas), 17);
    assert_eq!(board.total(Space::fln_bases), 8);
    assert_eq!(board.count(|s| s.fln_bases() > 0), 6);
    assert_eq!(board.resettled_sectors(), 3);
    assert!(board.has(|s| s.is_country() && s.independent()));
    assert!(!board.has(|s| s.fln_active() > 0));
}

/// Test the map geography.
#[test]
fn test_map_geography() {
    let board = short();

    assert_eq!(board.spaces().len(), 30);
    assert_eq!(board.count(Space::is_sector), 25);
    assert_eq!(board.count(Space::is_city), 3);
    assert_eq!(board.count(Space::is_country), 2);
    assert_eq!(board.count(Space::coastal), 14);
    assert_eq!(board.count(Space::border), 9);
    assert_eq!(board.count(Space::mountain), 21);
}

/// Test that control follows the pieces.
#[test]
fn test_short_scenario_control() {
    let board = short();

    assert_eq!(board.by_name("Philippeville").unwrap().control(), Some(Control::Gov));
    assert_eq!(board.by_name("Tizi Ouzou").unwrap().control(), Some(Control::Fln));
    assert_eq!(board.by_name("Orleansville").unwrap().control(), Some(Control::Uncontrolled));
    assert_eq!(board.by_name("Morocco").unwrap().control(), None);
    assert_eq!(board.by_name("Algiers").unwrap().alignment(), Alignment::Support);
}

/// Test that only the short scenario can be loaded.
#[test]
fn test_other_scenarios_not_implemented() {
    assert!(matches!(Board::load(Scenario::Medium), Err(RulesError::NotImplemented(_))));
    assert!(matches!(Board::load(Scenario::Full), Err(RulesError::NotImplemented(_))));
}

// =============================================================================
// Pieces
// =============================================================================

/// Test that pieces move between pools and spaces without being lost.
#[test]
fn test_transfer_round_trip() {
    let mut board = short();
    let batna = board.id_of("Batna").unwrap();

    board
        .transfer(2, PieceKind::FrenchPolice, Location::Available, Location::Space(batna), false)
        .unwrap();
    board
        .transfer(1, PieceKind::FrenchPolice, Location::Space(batna), Location::Casualties, false)
        .unwrap();

    assert_eq!(board.available().french_police(), 2);
    assert_eq!(board.space(batna).french_police(), 1);
    assert_eq!(board.casualties().french_police(), 1);
    assert_eq!(board.count_at(Location::Casualties, PieceKind::FrenchPolice), 1);
}

/// Test that active guerrillas cannot stay active off the map.
#[test]
fn test_pools_refuse_active_guerrillas() {
    let mut board = short();
    let barika = board.id_of("Barika").unwrap();
    board.space_mut(barika).activate(1).unwrap();

    let err = board
        .transfer(1, PieceKind::FlnActive, Location::Space(barika), Location::Casualties, false)
        .unwrap_err();
    assert!(matches!(err, RulesError::PieceNotAllowed { .. }));

    board
        .transfer(1, PieceKind::FlnActive, Location::Space(barika), Location::Casualties, true)
        .unwrap();
    assert_eq!(board.casualties().fln_underground(), 1);
}

/// Test that removing missing pieces fails and names the space.
#[test]
fn test_not_enough_pieces() {
    let mut board = short();
    let batna = board.id_of("Batna").unwrap();

    let err = board
        .transfer(1, PieceKind::FlnUnderground, Location::Space(batna), Location::Available, false)
        .unwrap_err();
    assert_eq!(
        err,
        RulesError::NotEnoughPieces {
            kind: PieceKind::FlnUnderground.to_string(),
            holder: "Batna".into(),
            have: 0,
            need: 1,
        }
    );
}

/// Test that independent countries take a third base and no more.
#[test]
fn test_country_base_capacity() {
    let mut board = short();
    let morocco = board.id_of("Morocco").unwrap();
    let tizi = board.id_of("Tizi Ouzou").unwrap();

    assert_eq!(board.space(morocco).max_bases(), 3);
    board
        .transfer(1, PieceKind::FlnBase, Location::Available, Location::Space(morocco), false)
        .unwrap();
    let err = board
        .transfer(1, PieceKind::FlnBase, Location::Available, Location::Space(morocco), false)
        .unwrap_err();
    assert!(matches!(err, RulesError::TooManyBases { .. }));

    // Tizi Ouzou holds one FLN base, room for one more base of any side
    board
        .transfer(1, PieceKind::GovBase, Location::Available, Location::Space(tizi), false)
        .unwrap();
    assert!(board
        .transfer(1, PieceKind::GovBase, Location::Available, Location::Space(tizi), false)
        .is_err());
}

// =============================================================================
// Tracks
// =============================================================================

/// Test that resources saturate while the France track fails hard.
#[test]
fn test_track_bounds() {
    let mut board = short();

    assert_eq!(board.shift_track(TrackKind::FlnResources, 100).unwrap(), 50);
    assert_eq!(board.shift_track(TrackKind::FlnResources, -80).unwrap(), 0);

    assert_eq!(board.shift_track(TrackKind::France, 1).unwrap(), 5);
    assert!(matches!(
        board.shift_track(TrackKind::France, 1),
        Err(RulesError::TrackOutOfRange { .. })
    ));
    assert_eq!(board.france_track(), 5);
}

// =============================================================================
// Actions
// =============================================================================

/// Test that applying an Action mutates the board and records control flips.
#[test]
fn test_apply_records_control_change() {
    let mut board = short();
    let batna = board.id_of("Batna").unwrap();
    let mut turn = Turn::new(false);
    turn.operation_in(Operation::Rally, Target::Space(batna), 1)
        .unwrap()
        .transfer(Location::Available, Location::Space(batna), PieceKind::FlnUnderground, 1, false);

    let mut action = turn.last().unwrap().clone();
    board.apply(&mut action).unwrap();

    assert_eq!(board.space(batna).fln_underground(), 1);
    assert_eq!(board.available().fln_underground(), 7);
    // resources are charged by the caller
    assert_eq!(board.fln_resources(), 15);
    match &action.steps()[0] {
        Step::Transfer { dst_control, .. } => assert_eq!(
            *dst_control,
            Some(ControlChange {
                from: Control::Uncontrolled,
                to: Control::Fln
            })
        ),
        other => panic!("unexpected step {other:?}"),
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Test that a bincode snapshot rebuilds an identical board.
#[test]
fn test_snapshot_bytes() {
    let mut board = short();
    let setif = board.id_of("Setif").unwrap();
    board.space_mut(setif).set_terror(2);

    let bytes = board.snapshot().to_bytes().unwrap();
    let restored = Board::from_snapshot(BoardSnapshot::from_bytes(&bytes).unwrap()).unwrap();

    assert_eq!(restored.snapshot(), board.snapshot());
    assert_eq!(restored.space(setif).terror(), 2);
}
