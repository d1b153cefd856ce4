//! The 71-card deck.
//!
//! `CARDS` is the static attribute table; [`Deck`] hands out cards by
//! number, once each.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::definition::{Card, CardFlags, CardId};
use crate::core::{Result, RulesError};

/// Highest card number.
pub const MAX_CARD: u8 = 71;

const S: CardFlags = CardFlags::SINGLE;
const FM: CardFlags = CardFlags::FLN_MARKED;
const FS: CardFlags = CardFlags::FLN_SPECIAL;
const FC: CardFlags = CardFlags::FLN_CAPABILITY;
const FMO: CardFlags = CardFlags::FLN_MOMENTUM;
const GC: CardFlags = CardFlags::GOV_CAPABILITY;
const GMO: CardFlags = CardFlags::GOV_MOMENTUM;
const DC: CardFlags = CardFlags::DUAL_CAPABILITY;
const DMO: CardFlags = CardFlags::DUAL_MOMENTUM;
const NO: CardFlags = CardFlags::NONE;

const fn flags(list: &[CardFlags]) -> CardFlags {
    let mut acc = CardFlags::NONE;
    let mut i = 0;
    while i < list.len() {
        acc = acc.union(list[i]);
        i += 1;
    }
    acc
}

/// Titles and flags, indexed by card number minus one.
const CARDS: [(&str, CardFlags); MAX_CARD as usize] = [
    ("Quadrillage", NO),
    ("Balky Conscripts", FMO),
    ("Leadership Snatch", FM),
    ("Oil & Gas Discoveries", S),
    ("Peace of the Brave", GMO),
    ("Factionalism", NO),
    ("5th Bureau", FM),
    ("Cross-border air strike", FMO),
    ("Beni-Oui-Oui", flags(&[S, FM])),
    ("Moudjahidine", flags(&[FM, FMO])),
    ("Bananes", flags(&[FM, GMO])),
    ("Ventilos", flags(&[FM, FS, GMO])),
    ("SAS", GC),
    ("Protest in Paris", flags(&[S, FM])),
    ("Jean-Paul Sarte", NO),
    ("NATO", NO),
    ("Commandos", FC),
    ("Torture", flags(&[S, FM, DC])),
    ("General Strike", FM),
    ("Sauve qui peut", flags(&[S, FM, FS])),
    ("UN Resolution", NO),
    ("The Government of USA is Convinced...", FM),
    ("Diplomatic Leanings", FM),
    ("Economic Development", FM),
    ("Purge", S),
    ("Casbah", FM),
    ("Covert Movement", FC),
    ("Atrocities and Reprisals", flags(&[S, FM])),
    ("The Call Up", FMO),
    ("Change in Tactics", S),
    ("Intimidation", flags(&[FM, GMO])),
    ("Teleb the Bomb-maker", FC),
    ("Overkill", flags(&[FM, FC])),
    ("Elections", FM),
    ("Napalm", flags(&[FM, GC])),
    ("Assassination", FM),
    ("Integration", NO),
    ("French Economic Crisis", NO),
    ("Retreat into Djebel", NO),
    ("Strategic Movement", FMO),
    ("Egypt", FM),
    ("Czech Arms Deal", FM),
    ("Refugees", FM),
    ("Paranoia", GMO),
    ("Challe Plan", flags(&[GMO, FMO])),
    ("Moghazni", GMO),
    ("Third Force", FM),
    ("Ultras", FM),
    ("Factional Plot", flags(&[FM, FS])),
    ("Bleuite", NO),
    ("Stripey Hole", flags(&[FM, FS])),
    ("Cabinet Shuffle", S),
    ("Population Control", flags(&[FM, GMO])),
    ("Operation 744", flags(&[S, FM, FS])),
    ("Development", FM),
    ("Hardened Attitudes", flags(&[S, FM, FS, DMO])),
    ("Peace Talks", flags(&[S, FM, DMO])),
    ("Army in Waiting", NO),
    ("Bandung Conference", FM),
    ("Soummam Conference", FM),
    ("Morocco and Tunisia Independent", S),
    ("Suez Crisis", S),
    ("OAS", S),
    ("Mobilization", S),
    ("Recall De Gaulle", S),
    ("Coup d'etat", S),
    ("Propaganda!", S),
    ("Propaganda!", S),
    ("Propaganda!", S),
    ("Propaganda!", S),
    ("Propaganda!", S),
];

/// Look up card `num`.
pub fn card(num: u8) -> Result<Card> {
    if num == 0 || num > MAX_CARD {
        return Err(RulesError::UnknownCard(num));
    }
    let (title, flags) = CARDS[usize::from(num - 1)];
    Ok(Card::new(CardId(num), title, flags))
}

/// Every card in number order.
pub fn all_cards() -> impl Iterator<Item = Card> {
    CARDS
        .iter()
        .enumerate()
        .map(|(i, (title, flags))| Card::new(CardId(i as u8 + 1), *title, *flags))
}

/// Cards drawn so far.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    drawn: FxHashSet<u8>,
    history: Vec<CardId>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw card `num`. Each card comes out once; a repeat is rejected.
    pub fn pull(&mut self, num: u8) -> Result<Card> {
        let card = card(num)?;
        if !self.drawn.insert(num) {
            return Err(RulesError::CardAlreadyDrawn(num));
        }
        self.history.push(card.id);
        debug!(card = %card, "card drawn");
        Ok(card)
    }

    /// Cards in draw order.
    #[must_use]
    pub fn history(&self) -> &[CardId] {
        &self.history
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        usize::from(MAX_CARD) - self.drawn.len()
    }
}
