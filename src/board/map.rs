//! Map feed and scenario setups.

use super::board::Board;
use super::forces::PieceKind::{AlgerianPolice as AP, AlgerianTroops as AT, FlnBase as FB, FlnUnderground as FU};
use super::forces::PieceKind::{FrenchPolice as FP, FrenchTroops as FT, GovBase as GB};
use super::forces::{PieceKind, PiecePool};
use super::space::{Alignment, Space, SpaceId, Terrain};
use super::track::TrackKind;
use crate::core::{Result, RulesError, Scenario};

const M: Terrain = Terrain::MOUNTAIN;
const C: Terrain = Terrain::COASTAL;
const B: Terrain = Terrain::BORDER;
const N: Terrain = Terrain::NONE;
const MC: Terrain = M.union(C);
const MB: Terrain = M.union(B);
const CB: Terrain = C.union(B);

enum Feed {
    Sector(&'static str, u8, u8, u8, Terrain),
    City(&'static str, u8, u8, Terrain),
    Country(&'static str),
}

/// Spaces in construction order with their adjacency.
const MAP: [(Feed, &[u8]); 30] = [
    (Feed::Sector("Barika", 1, 1, 1, M), &[1, 2, 3, 7, 8, 11, 19]),
    (Feed::Sector("Batna", 1, 2, 0, M), &[0, 2, 3, 5]),
    (Feed::Sector("Biskra", 1, 3, 0, B), &[0, 1, 5, 25, 26, 29]),
    (Feed::Sector("Oum El Bouaghi", 1, 4, 0, M), &[0, 1, 4, 5, 8, 9]),
    (Feed::Sector("Tebessa", 1, 5, 1, MB), &[3, 5, 9, 29]),
    (Feed::Sector("Negrine", 1, 6, 0, MB), &[1, 2, 3, 4, 29]),
    (Feed::City("Constantine", 2, 2, N), &[7, 8]),
    (Feed::Sector("Setif", 2, 1, 1, MC), &[0, 6, 8, 11, 12]),
    (Feed::Sector("Philippeville", 2, 2, 2, MC), &[0, 3, 7, 6, 9]),
    (Feed::Sector("Souk Ahras", 2, 3, 2, CB), &[3, 4, 8, 29]),
    (Feed::Sector("Tizi Ouzou", 3, 1, 2, MC), &[11, 12, 14]),
    (Feed::Sector("Bordj Bou Arreridj", 3, 2, 1, M), &[0, 7, 10, 12, 14, 26]),
    (Feed::Sector("Bougie", 3, 3, 2, MC), &[7, 10, 11]),
    (Feed::City("Algiers", 4, 3, C), &[14]),
    (Feed::Sector("Medea", 4, 1, 2, MC), &[10, 11, 13, 15, 26, 27]),
    (Feed::Sector("Orleansville", 4, 2, 2, MC), &[14, 20, 23, 27]),
    (Feed::City("Oran", 5, 2, C), &[19]),
    (Feed::Sector("Mecheria", 5, 1, 0, MB), &[18, 21, 24, 28]),
    (Feed::Sector("Tlemcen", 5, 2, 1, CB), &[17, 19, 21, 28]),
    (Feed::Sector("Sidi Bel Abbes", 5, 3, 1, C), &[16, 18, 20, 21, 22]),
    (Feed::Sector("Mostaganem", 5, 4, 2, MC), &[15, 19, 22, 23]),
    (Feed::Sector("Saida", 5, 5, 0, M), &[17, 18, 19, 22, 24]),
    (Feed::Sector("Mascara", 5, 6, 0, M), &[19, 20, 21, 23, 24]),
    (Feed::Sector("Tiaret", 5, 7, 0, M), &[15, 20, 22, 24, 27]),
    (Feed::Sector("Ain Sefra", 5, 8, 0, B), &[17, 21, 22, 23, 25, 27, 28]),
    (Feed::Sector("Laghouat", 5, 9, 0, N), &[2, 24, 26, 27]),
    (Feed::Sector("Sidi Aissa", 6, 1, 0, M), &[0, 2, 11, 14, 25, 27]),
    (Feed::Sector("Ain Oussera", 6, 2, 1, M), &[14, 15, 23, 24, 25, 26]),
    (Feed::Country("Morocco"), &[17, 18, 24]),
    (Feed::Country("Tunisia"), &[2, 4, 5, 9]),
];

/// Build every space of the map, empty and Neutral.
pub(crate) fn spaces() -> Vec<Space> {
    MAP.iter()
        .enumerate()
        .map(|(i, (feed, adjacents))| {
            let id = SpaceId(i as u8);
            let mut space = match *feed {
                Feed::Sector(name, wilaya, sector, pop, terrain) => Space::sector(id, name, wilaya, sector, pop, terrain),
                Feed::City(name, wilaya, pop, terrain) => Space::city(id, name, wilaya, pop, terrain),
                Feed::Country(name) => Space::country(id, name),
            };
            let adjacents: Vec<SpaceId> = adjacents.iter().map(|a| SpaceId(*a)).collect();
            space.set_adjacents(&adjacents);
            space
        })
        .collect()
}

type Placement = (&'static str, &'static [(PieceKind, u32)], Option<Alignment>);

/// Short scenario map setup.
const SHORT: [Placement; 25] = [
    ("Barika", &[(AP, 1), (FU, 1)], Some(Alignment::Oppose)),
    ("Biskra", &[(FP, 1)], None),
    ("Tebessa", &[(AP, 1), (FU, 1)], Some(Alignment::Oppose)),
    ("Negrine", &[(FP, 1)], None),
    ("Constantine", &[(FP, 1)], Some(Alignment::Support)),
    ("Setif", &[(FU, 1)], None),
    ("Philippeville", &[(FT, 4), (AP, 1), (GB, 1)], None),
    ("Souk Ahras", &[(FT, 1), (AP, 1), (GB, 1), (FU, 1), (FB, 1)], Some(Alignment::Oppose)),
    ("Tizi Ouzou", &[(FP, 1), (FU, 1), (FB, 1)], Some(Alignment::Oppose)),
    ("Bordj Bou Arreridj", &[(FP, 1)], None),
    ("Bougie", &[(FP, 1), (FU, 1), (FB, 1)], Some(Alignment::Oppose)),
    ("Algiers", &[(FT, 4), (AT, 1), (FP, 1)], Some(Alignment::Support)),
    ("Medea", &[(AT, 1), (GB, 1)], None),
    ("Orleansville", &[(FP, 1), (AP, 1), (FU, 1), (FB, 1)], Some(Alignment::Oppose)),
    ("Oran", &[(AT, 1), (FP, 1), (AP, 1)], Some(Alignment::Support)),
    ("Mecheria", &[(FP, 1), (AP, 1)], None),
    ("Tlemcen", &[(FP, 2), (FU, 1)], None),
    ("Sidi Bel Abbes", &[(FP, 1), (GB, 1)], None),
    ("Mostaganem", &[(FP, 1)], None),
    ("Mascara", &[(FP, 1)], None),
    ("Tiaret", &[(FP, 1)], None),
    ("Ain Sefra", &[(FP, 1)], None),
    ("Ain Oussera", &[], Some(Alignment::Oppose)),
    ("Morocco", &[(FU, 4), (FB, 2)], None),
    ("Tunisia", &[(FU, 5), (FB, 2)], None),
];

/// Populate `board` for `scenario`.
pub(crate) fn setup(board: &mut Board, scenario: Scenario) -> Result<()> {
    match scenario {
        Scenario::Short => setup_short(board),
        Scenario::Medium => Err(RulesError::NotImplemented("medium scenario")),
        Scenario::Full => Err(RulesError::NotImplemented("full scenario")),
    }
}

fn setup_short(board: &mut Board) -> Result<()> {
    board.set_track(TrackKind::Commitment, 15)?;
    board.set_track(TrackKind::FlnResources, 15)?;
    board.set_track(TrackKind::GovResources, 20)?;
    board.set_track(TrackKind::France, 4)?;
    board.set_track(TrackKind::BorderZone, 3)?;

    board.out_of_play_mut().add(FU, 5)?;
    board.available_mut().add(GB, 2)?;
    board.available_mut().add(FP, 4)?;
    board.available_mut().add(FB, 7)?;
    board.available_mut().add(FU, 8)?;

    for name in ["Morocco", "Tunisia"] {
        let id = board.id_of(name)?;
        board.space_mut(id).declare_independence()?;
    }

    for name in ["Setif", "Tlemcen", "Bordj Bou Arreridj"] {
        let id = board.id_of(name)?;
        board.space_mut(id).resettle()?;
    }

    for (name, pieces, alignment) in SHORT.iter() {
        let id = board.id_of(name)?;
        let space = board.space_mut(id);
        for (kind, n) in pieces.iter() {
            space.add(*kind, *n as i32)?;
        }
        if let Some(alignment) = alignment {
            space.set_alignment(*alignment);
        }
    }

    board.compute_victory_points()
}
