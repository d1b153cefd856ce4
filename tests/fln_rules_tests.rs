//! FLN legality predicates as the board changes.

use colonial_twilight::board::{Alignment, Board, PieceKind};
use colonial_twilight::core::Scenario;
use colonial_twilight::rules::fln::{
    agitate_spaces, extort_spaces, max_agitate_cost, max_placable_guerrillas, may_agitate_in, may_ambush_in,
    may_attack_in, may_extort_in, may_oas_in, may_rally_in, may_subvert_in, may_terror_in, rally_spaces,
    subvert_spaces, terror_spaces,
};

fn short() -> Board {
    Board::load(Scenario::Short).unwrap()
}

fn names(board: &Board, ids: &[colonial_twilight::board::SpaceId]) -> Vec<String> {
    ids.iter().map(|id| board.space(*id).name().to_string()).collect()
}

// =============================================================================
// Rally / Agitate
// =============================================================================

/// Test that countries only rally once independent.
#[test]
fn test_rally_in_countries() {
    let mut board = Board::new();
    let morocco = board.id_of("Morocco").unwrap();
    assert!(!may_rally_in(board.space(morocco)));

    board.space_mut(morocco).declare_independence().unwrap();
    assert!(may_rally_in(board.space(morocco)));
    assert_eq!(rally_spaces(&board).len(), 29);
}

/// Test that a city at Support refuses Rally until it shifts.
#[test]
fn test_rally_in_cities() {
    let mut board = short();
    let algiers = board.id_of("Algiers").unwrap();
    assert!(!may_rally_in(board.space(algiers)));

    board.space_mut(algiers).set_alignment(Alignment::Neutral);
    assert!(may_rally_in(board.space(algiers)));
}

/// Test that a base lets Rally place population plus one guerrillas.
#[test]
fn test_placement_at_bases() {
    let board = short();
    assert_eq!(max_placable_guerrillas(board.by_name("Souk Ahras").unwrap()), 3);
    // countries count as population 1
    assert_eq!(max_placable_guerrillas(board.by_name("Morocco").unwrap()), 2);
    assert_eq!(max_placable_guerrillas(board.by_name("Batna").unwrap()), 1);
}

/// Test that Agitate needs something to remove or shift.
#[test]
fn test_agitate_needs_a_change() {
    let mut board = short();
    let tizi = board.id_of("Tizi Ouzou").unwrap();
    assert!(!may_agitate_in(board.space(tizi)));

    board.space_mut(tizi).set_terror(1);
    assert!(may_agitate_in(board.space(tizi)));
    assert_eq!(max_agitate_cost(board.space(tizi)), 1);

    board.space_mut(tizi).set_alignment(Alignment::Support);
    assert_eq!(max_agitate_cost(board.space(tizi)), 2);
    assert_eq!(names(&board, &agitate_spaces(&board)), vec!["Setif", "Tizi Ouzou"]);
}

/// Test that Agitate needs FLN control or a base.
#[test]
fn test_agitate_needs_presence() {
    let mut board = short();
    let algiers = board.id_of("Algiers").unwrap();
    assert!(!may_agitate_in(board.space(algiers)));

    board.space_mut(algiers).add(PieceKind::FlnBase, 1).unwrap();
    assert!(may_agitate_in(board.space(algiers)));
}

// =============================================================================
// Attack / Terror
// =============================================================================

/// Test that Ambush needs an underground guerrilla where Attack does not.
#[test]
fn test_ambush_needs_underground() {
    let mut board = short();
    let barika = board.id_of("Barika").unwrap();
    board.space_mut(barika).activate(1).unwrap();

    assert!(may_attack_in(board.space(barika)));
    assert!(!may_ambush_in(board.space(barika)));
}

/// Test that terror needs population and an underground guerrilla.
#[test]
fn test_terror_needs_population() {
    let board = short();
    assert!(may_terror_in(board.by_name("Barika").unwrap()));
    // resettled
    assert!(!may_terror_in(board.by_name("Setif").unwrap()));
    assert!(!may_terror_in(board.by_name("Morocco").unwrap()));
    assert_eq!(
        names(&board, &terror_spaces(&board)),
        vec!["Barika", "Tebessa", "Souk Ahras", "Tizi Ouzou", "Bougie", "Orleansville"]
    );
}

// =============================================================================
// Special Activities
// =============================================================================

/// Test that Extort follows FLN control in Algeria.
#[test]
fn test_extort_follows_control() {
    let mut board = short();
    let orleansville = board.id_of("Orleansville").unwrap();
    assert!(!may_extort_in(board.space(orleansville)));

    board.space_mut(orleansville).add(PieceKind::FlnUnderground, 1).unwrap();
    assert!(may_extort_in(board.space(orleansville)));
    assert_eq!(extort_spaces(&board).len(), 5);

    // FLN control without population is not enough
    assert!(board.by_name("Setif").unwrap().fln_control());
    assert!(!may_extort_in(board.by_name("Setif").unwrap()));
}

/// Test that Subvert needs Algerian cubes.
#[test]
fn test_subvert_needs_algerian_cubes() {
    let board = short();
    assert!(may_subvert_in(board.by_name("Orleansville").unwrap()));
    assert!(!may_subvert_in(board.by_name("Tizi Ouzou").unwrap()));
    assert_eq!(
        names(&board, &subvert_spaces(&board)),
        vec!["Barika", "Tebessa", "Souk Ahras", "Orleansville"]
    );
}

/// Test that OAS skips spaces holding terror.
#[test]
fn test_oas_skips_terror() {
    let mut board = short();
    let algiers = board.id_of("Algiers").unwrap();
    assert!(may_oas_in(board.space(algiers)));
    board.space_mut(algiers).set_terror(1);
    assert!(!may_oas_in(board.space(algiers)));
}
