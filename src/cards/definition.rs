//! Card definitions: number, title and attribute flags.
//!
//! Event text is not modelled. A card only carries what the bots look at
//! when deciding whether an Event is worth playing.

use serde::{Deserialize, Serialize};

/// Card number, 1 to 71.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(num: u8) -> Self {
        Self(num)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Card attribute bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFlags(u16);

impl CardFlags {
    pub const NONE: CardFlags = CardFlags(0);
    /// Single-event card; the others are dual.
    pub const SINGLE: CardFlags = CardFlags(1);
    /// Event the FLN bot always considers.
    pub const FLN_MARKED: CardFlags = CardFlags(2);
    /// FLN bot follows special instructions for this card.
    pub const FLN_SPECIAL: CardFlags = CardFlags(4);
    pub const FLN_CAPABILITY: CardFlags = CardFlags(8);
    pub const FLN_MOMENTUM: CardFlags = CardFlags(16);
    pub const GOV_CAPABILITY: CardFlags = CardFlags(32);
    pub const GOV_MOMENTUM: CardFlags = CardFlags(64);
    pub const DUAL_CAPABILITY: CardFlags = CardFlags(128);
    pub const DUAL_MOMENTUM: CardFlags = CardFlags(256);

    #[must_use]
    pub const fn contains(self, other: CardFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: CardFlags) -> CardFlags {
        CardFlags(self.0 | other.0)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl std::ops::BitOr for CardFlags {
    type Output = CardFlags;

    fn bitor(self, rhs: CardFlags) -> CardFlags {
        self.union(rhs)
    }
}

/// First Propaganda card number.
pub const FIRST_PROPAGANDA: u8 = 67;

/// A card of the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub flags: CardFlags,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, title: impl Into<String>, flags: CardFlags) -> Self {
        Self {
            id,
            title: title.into(),
            flags,
        }
    }

    #[must_use]
    pub fn propaganda(&self) -> bool {
        self.id.0 >= FIRST_PROPAGANDA
    }

    #[must_use]
    pub fn single(&self) -> bool {
        self.flags.contains(CardFlags::SINGLE)
    }

    #[must_use]
    pub fn dual(&self) -> bool {
        !self.single()
    }

    #[must_use]
    pub fn fln_marked(&self) -> bool {
        self.flags.contains(CardFlags::FLN_MARKED)
    }

    #[must_use]
    pub fn special(&self) -> bool {
        self.flags.contains(CardFlags::FLN_SPECIAL)
    }

    #[must_use]
    pub fn fln_capability(&self) -> bool {
        self.flags.contains(CardFlags::FLN_CAPABILITY)
    }

    #[must_use]
    pub fn gov_capability(&self) -> bool {
        self.flags.contains(CardFlags::GOV_CAPABILITY)
    }

    #[must_use]
    pub fn dual_capability(&self) -> bool {
        self.flags.contains(CardFlags::DUAL_CAPABILITY)
    }

    /// Any of the three capability kinds.
    #[must_use]
    pub fn capability(&self) -> bool {
        self.fln_capability() || self.gov_capability() || self.dual_capability()
    }

    #[must_use]
    pub fn fln_momentum(&self) -> bool {
        self.flags.contains(CardFlags::FLN_MOMENTUM)
    }

    #[must_use]
    pub fn gov_momentum(&self) -> bool {
        self.flags.contains(CardFlags::GOV_MOMENTUM)
    }

    #[must_use]
    pub fn dual_momentum(&self) -> bool {
        self.flags.contains(CardFlags::DUAL_MOMENTUM)
    }

    /// Whether the FLN bot would gain from the Event.
    ///
    /// Event effects are not modelled, so no card qualifies yet.
    #[must_use]
    pub fn fln_effective(&self) -> bool {
        false
    }

    /// Population worth of the Event to the FLN bot.
    #[must_use]
    pub fn fln_effectiveness(&self) -> u32 {
        0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags = Vec::new();
        if self.fln_capability() {
            tags.push("FLN-capability");
        }
        if self.gov_capability() {
            tags.push("GOV-capability");
        }
        if self.dual_capability() {
            tags.push("DUAL-capability");
        }
        if self.fln_momentum() {
            tags.push("FLN-momentum");
        }
        if self.gov_momentum() {
            tags.push("GOV-momentum");
        }
        if self.dual_momentum() {
            tags.push("DUAL-momentum");
        }
        let kind = if self.single() { "Single" } else { "Dual" };
        write!(f, "{:>2} - {kind:<6} : {}", self.id.0, self.title)?;
        if !tags.is_empty() {
            write!(f, " : {}", tags.join(" "))?;
        }
        Ok(())
    }
}
