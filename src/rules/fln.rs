//! FLN eligibility predicates.
//!
//! Pure functions of a single space (or the board for the `*_spaces`
//! collectors). They say where an Operation or Special Activity is legal,
//! never whether it is a good idea.

use crate::board::{Board, Space, SpaceId, SpaceKind};

// =============================================================================
// Rally
// =============================================================================

/// Sectors, Cities not at Support and independent Countries.
#[must_use]
pub fn may_rally_in(space: &Space) -> bool {
    match space.kind() {
        SpaceKind::Sector => true,
        SpaceKind::City => !space.support(),
        SpaceKind::Country { independent } => independent,
    }
}

pub fn rally_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_rally_in)
}

/// Agitate needs FLN control or a base, and something to change: either a
/// shift toward Oppose or terror to remove.
#[must_use]
pub fn may_agitate_in(space: &Space) -> bool {
    !space.is_country()
        && (space.fln_control() || space.fln_bases() > 0)
        && (!space.oppose() || space.terror() > 0)
}

pub fn agitate_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_agitate_in)
}

/// Guerrillas a single Rally may place in `space`.
#[must_use]
pub fn max_placable_guerrillas(space: &Space) -> u32 {
    if space.fln_bases() > 0 {
        u32::from(space.pop()) + 1
    } else {
        1
    }
}

/// Full price of Agitate in `space`: every terror marker plus the shift.
#[must_use]
pub fn max_agitate_cost(space: &Space) -> u32 {
    space.terror() + u32::from(!space.oppose())
}

// =============================================================================
// Attack / Ambush
// =============================================================================

#[must_use]
pub fn may_attack_in(space: &Space) -> bool {
    space.guerrillas() > 0 && space.gov() > 0
}

pub fn attack_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_attack_in)
}

/// Ambush is an Attack led by one underground guerrilla.
#[must_use]
pub fn may_ambush_in(space: &Space) -> bool {
    may_attack_in(space) && space.fln_underground() > 0
}

pub fn ambush_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_ambush_in)
}

// =============================================================================
// Terror
// =============================================================================

#[must_use]
pub fn may_terror_in(space: &Space) -> bool {
    !space.is_country() && space.pop() > 0 && space.fln_underground() > 0
}

pub fn terror_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_terror_in)
}

// =============================================================================
// Extort / Subvert / OAS
// =============================================================================

#[must_use]
pub fn may_extort_in(space: &Space) -> bool {
    if space.fln_underground() == 0 {
        return false;
    }
    match space.kind() {
        SpaceKind::Country { independent } => independent,
        _ => space.fln_control() && space.pop() > 0,
    }
}

pub fn extort_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_extort_in)
}

#[must_use]
pub fn may_subvert_in(space: &Space) -> bool {
    space.fln_underground() > 0 && space.algerian_cubes() > 0
}

pub fn subvert_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_subvert_in)
}

#[must_use]
pub fn may_oas_in(space: &Space) -> bool {
    !space.is_country() && space.pop() > 0 && space.terror() == 0
}

pub fn oas_spaces(board: &Board) -> Vec<SpaceId> {
    board.search(may_oas_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;
    use crate::core::Scenario;

    fn short() -> Board {
        Board::load(Scenario::Short).unwrap()
    }

    #[test]
    fn test_rally_spaces() {
        assert_eq!(rally_spaces(&Board::new()).len(), 28);
        // cities start at Support, both countries are independent
        assert_eq!(rally_spaces(&short()).len(), 27);
    }

    #[test]
    fn test_max_placable_guerrillas() {
        let mut board = short();
        assert_eq!(max_placable_guerrillas(board.by_name("Mostaganem").unwrap()), 1);

        let id = board.id_of("Orleansville").unwrap();
        board.space_mut(id).add(PieceKind::FlnBase, 1).unwrap();
        assert_eq!(max_placable_guerrillas(board.space(id)), 3);
    }

    #[test]
    fn test_agitate() {
        assert!(agitate_spaces(&Board::new()).is_empty());

        let mut board = short();
        // bases at Oppose have nothing to agitate; Setif is FLN controlled
        assert_eq!(agitate_spaces(&board), vec![board.id_of("Setif").unwrap()]);

        let bougie = board.id_of("Bougie").unwrap();
        board.space_mut(bougie).set_terror(2);
        assert!(may_agitate_in(board.space(bougie)));
        assert_eq!(max_agitate_cost(board.space(bougie)), 2);
        assert_eq!(max_agitate_cost(board.by_name("Setif").unwrap()), 1);
    }

    #[test]
    fn test_attack_and_ambush() {
        assert!(attack_spaces(&Board::new()).is_empty());
        let board = short();
        assert_eq!(attack_spaces(&board).len(), 7);
        assert_eq!(ambush_spaces(&board).len(), 7);
    }

    #[test]
    fn test_terror() {
        assert!(terror_spaces(&Board::new()).is_empty());
        // resettled Setif and Tlemcen have no population
        assert_eq!(terror_spaces(&short()).len(), 6);
    }

    #[test]
    fn test_extort() {
        assert!(extort_spaces(&Board::new()).is_empty());
        let board = short();
        let names: Vec<&str> = extort_spaces(&board).iter().map(|id| board.space(*id).name()).collect();
        assert_eq!(names, vec!["Tizi Ouzou", "Bougie", "Morocco", "Tunisia"]);
    }

    #[test]
    fn test_subvert() {
        assert!(subvert_spaces(&Board::new()).is_empty());
        assert_eq!(subvert_spaces(&short()).len(), 4);
    }

    #[test]
    fn test_oas() {
        assert_eq!(oas_spaces(&Board::new()).len(), 17);
        assert_eq!(oas_spaces(&short()).len(), 14);
    }
}
