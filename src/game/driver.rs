//! Game driver and the placeholder GOV player.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bot::FlnBot;
use crate::cards::{CardId, Deck};
use crate::core::{Faction, GameContext, GameOptions, Result, RulesError};
use crate::rules::engine::{eligibility_swap, possible_actions, ActionChoice, Player};
use crate::turn::Action;

/// The government side has no decision maker yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct GovStub;

impl Player for GovStub {
    fn faction(&self) -> Faction {
        Faction::Gov
    }

    fn play(
        &mut self,
        _ctx: &mut GameContext,
        _previous: Option<ActionChoice>,
        _possible: &[ActionChoice],
    ) -> Result<ActionChoice> {
        Err(RulesError::NotImplemented("government player"))
    }
}

/// What one faction did with one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfRound {
    pub card: CardId,
    pub faction: Faction,
    pub choice: ActionChoice,
    pub actions: Vec<Action>,
}

/// Two players taking turns over the deck.
pub struct Game {
    ctx: GameContext,
    deck: Deck,
    /// First eligible first.
    players: [Box<dyn Player>; 2],
    history: Vec<HalfRound>,
    cards_played: u32,
}

impl Game {
    /// FLN bot first, then the GOV stub, on the scenario of `options`.
    pub fn new(options: GameOptions) -> Result<Self> {
        let ctx = GameContext::new(options)?;
        Ok(Self::with_players(ctx, Box::new(FlnBot), Box::new(GovStub)))
    }

    #[must_use]
    pub fn with_players(ctx: GameContext, first: Box<dyn Player>, second: Box<dyn Player>) -> Self {
        Self {
            ctx,
            deck: Deck::new(),
            players: [first, second],
            history: Vec::new(),
            cards_played: 0,
        }
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Factions in eligibility order for the next card.
    #[must_use]
    pub fn order(&self) -> [Faction; 2] {
        [self.players[0].faction(), self.players[1].faction()]
    }

    #[must_use]
    pub fn history(&self) -> &[HalfRound] {
        &self.history
    }

    #[must_use]
    pub fn cards_played(&self) -> u32 {
        self.cards_played
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Draw card `num` and play both half-rounds on it.
    pub fn play_card(&mut self, num: u8) -> Result<[ActionChoice; 2]> {
        let card = self.deck.pull(num)?;
        if card.propaganda() {
            return Err(RulesError::NotImplemented("propaganda round"));
        }
        self.cards_played += 1;
        info!(card = %card, turn = self.cards_played, first = %self.players[0].faction(), "card");
        self.ctx.card = Some(card);

        let first = self.half_round(0, None)?;
        if first == ActionChoice::Event {
            self.ctx.card = None;
        }
        let second = self.half_round(1, Some(first))?;
        self.ctx.card = None;

        if eligibility_swap(first) {
            self.players.swap(0, 1);
            info!(first = %self.players[0].faction(), "eligibility swapped");
        }
        Ok([first, second])
    }

    fn half_round(&mut self, seat: usize, previous: Option<ActionChoice>) -> Result<ActionChoice> {
        let possible = possible_actions(previous);
        let player = &mut self.players[seat];
        let choice = player.play(&mut self.ctx, previous, &possible)?;
        self.ctx.board.compute_victory_points()?;
        self.history.push(HalfRound {
            card: self.ctx.card.as_ref().map_or(CardId(0), |c| c.id),
            faction: player.faction(),
            choice,
            actions: self.ctx.turn.actions().iter().cloned().collect(),
        });
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Conducts a fixed choice without touching the board.
    struct Scripted(Faction, ActionChoice);

    impl Player for Scripted {
        fn faction(&self) -> Faction {
            self.0
        }

        fn play(
            &mut self,
            ctx: &mut GameContext,
            _previous: Option<ActionChoice>,
            _possible: &[ActionChoice],
        ) -> Result<ActionChoice> {
            ctx.begin_turn(false);
            Ok(self.1)
        }
    }

    fn scripted(first: ActionChoice, second: ActionChoice) -> Game {
        let ctx = GameContext::new(GameOptions::default()).unwrap();
        Game::with_players(
            ctx,
            Box::new(Scripted(Faction::Gov, first)),
            Box::new(Scripted(Faction::Fln, second)),
        )
    }

    #[test]
    fn test_swap_after_op_special() {
        let mut game = scripted(ActionChoice::OpSpecial, ActionChoice::OpLimited);
        assert_eq!(game.play_card(1).unwrap(), [ActionChoice::OpSpecial, ActionChoice::OpLimited]);
        assert_eq!(game.order(), [Faction::Fln, Faction::Gov]);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[0].card, CardId(1));
    }

    #[test]
    fn test_no_swap_after_event() {
        let mut game = scripted(ActionChoice::Event, ActionChoice::OpSpecial);
        game.play_card(2).unwrap();
        assert_eq!(game.order(), [Faction::Gov, Faction::Fln]);
        // the second faction no longer sees the card
        assert_eq!(game.history()[1].card, CardId(0));
    }

    #[test]
    fn test_card_drawn_once() {
        let mut game = scripted(ActionChoice::Pass, ActionChoice::Pass);
        game.play_card(3).unwrap();
        assert_eq!(game.play_card(3).unwrap_err(), RulesError::CardAlreadyDrawn(3));
        assert_eq!(game.cards_played(), 1);
    }

    #[test]
    fn test_propaganda_not_implemented() {
        let mut game = scripted(ActionChoice::Pass, ActionChoice::Pass);
        assert!(matches!(game.play_card(67), Err(RulesError::NotImplemented(_))));
    }

    #[test]
    fn test_fln_bot_then_gov_stub() {
        let mut game = Game::new(GameOptions::default()).unwrap();
        let err = game.play_card(1).unwrap_err();
        assert_eq!(err, RulesError::NotImplemented("government player"));
        // the FLN half-round went through first
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].faction, Faction::Fln);
    }
}
