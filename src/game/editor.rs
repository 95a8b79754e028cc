//! The game editor
//!
//! Orchestrates live editing of one game: every mutating operation appends
//! to or truncates the event log, replays the cursor to the new end (or
//! resets it after a starter declaration), and rebuilds the box score before
//! returning. Read accessors then answer from the cursor and box score
//! directly. One editor instance owns one game; there is no shared state
//! between editing sessions.

use crate::boxscore::Boxscore;
use crate::core::{
    Base, BattingSlot, EventLog, PlayRecord, PlayerId, PlayerName, Position, Roster, RosterPlayer,
    SubstitutionRecord, Team,
};
use crate::game::cursor::GameCursor;
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::game::scoring::{ScoringEngine, StandardRules};
use crate::game::situation::Situation;
use crate::Result;

/// Editing session for a single game
pub struct GameEditor {
    log: EventLog,
    cursor: GameCursor,
    boxscore: Boxscore,
    engine: Box<dyn ScoringEngine>,
    visitor_roster: Roster,
    home_roster: Roster,
    logger: GameLogger,
}

impl GameEditor {
    /// Create an editor over an empty game using the reference rules
    pub fn new(visitor_roster: Roster, home_roster: Roster) -> Self {
        Self::with_engine(visitor_roster, home_roster, Box::new(StandardRules::new()))
    }

    /// Create an editor backed by a specific scoring engine
    pub fn with_engine(
        visitor_roster: Roster,
        home_roster: Roster,
        engine: Box<dyn ScoringEngine>,
    ) -> Self {
        GameEditor {
            log: EventLog::new(),
            cursor: GameCursor::new(),
            boxscore: Boxscore::new(),
            engine,
            visitor_roster,
            home_roster,
            logger: GameLogger::new(),
        }
    }

    /// Set verbosity on the editor's logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    // -- Mutating operations ------------------------------------------------

    /// Record a play at the current game situation
    ///
    /// The inning, half-inning, and batter of record are taken from the
    /// cursor; count and pitch sequence are left as unknown placeholders.
    /// The text is validated by the scoring engine before anything is
    /// appended, so a rejected play leaves the log untouched.
    pub fn add_play(&mut self, text: &str) -> Result<()> {
        self.engine
            .score_play(text, self.cursor.situation().bases_occupied())?;

        let inning = self.inning();
        let team = self.half_inning();
        let batter = self.current_batter().unwrap_or_else(|| PlayerId::new(""));
        self.log.append_play(
            inning,
            team,
            batter,
            PlayRecord::UNKNOWN_COUNT,
            "",
            text,
        );
        self.logger.log(
            VerbosityLevel::Normal,
            format!("play: {text} ({team} {inning})"),
        );
        self.refresh()
    }

    /// Undo the most recent substantive play
    ///
    /// Trailing "NP" placeholders, substitutions, and comments are skipped
    /// so the truncation lands on the last real play; that play and
    /// everything after it are removed, restoring the defensive and batting
    /// configuration that was in effect when it was recorded. Silent no-op
    /// when the log holds no substantive play.
    pub fn delete_play(&mut self) -> Result<()> {
        let Some(id) = self.log.last_substantive_play().map(|event| event.id) else {
            return Ok(());
        };
        self.log.truncate_from(id);
        self.logger
            .log(VerbosityLevel::Normal, "undo: last play removed");
        self.refresh()
    }

    /// Record an in-game substitution
    ///
    /// An "NP" placeholder play is appended first so the substitution is
    /// attributable to a specific point in the play sequence even though it
    /// carries no batting outcome.
    pub fn add_substitute(
        &mut self,
        player: &RosterPlayer,
        team: Team,
        slot: BattingSlot,
        position: Position,
    ) -> Result<()> {
        let inning = self.inning();
        let half = self.half_inning();
        let batter = self.current_batter().unwrap_or_else(|| PlayerId::new(""));
        self.log.append_play(
            inning,
            half,
            batter,
            PlayRecord::UNKNOWN_COUNT,
            "",
            PlayRecord::NO_PLAY_TEXT,
        );
        self.log.append_substitution(SubstitutionRecord {
            player: player.player_id.clone(),
            name: PlayerName::new(player.full_name()),
            team,
            slot,
            position,
        });
        self.logger.log(
            VerbosityLevel::Normal,
            format!(
                "sub: {} ({team} slot {slot}, pos {position})",
                player.full_name()
            ),
        );
        self.refresh()
    }

    /// Append an annotation; derived state is untouched
    pub fn add_comment(&mut self, text: &str) {
        self.log.append_comment(text);
        self.logger
            .log(VerbosityLevel::Verbose, format!("comment: {text}"));
    }

    /// Declare a starting lineup entry
    ///
    /// Starters are only legal before the first play, so the cursor is reset
    /// to the start (re-applying all starters) rather than advanced.
    pub fn set_starter(
        &mut self,
        player: PlayerId,
        name: PlayerName,
        team: Team,
        slot: BattingSlot,
        position: Position,
    ) -> Result<()> {
        self.logger.log(
            VerbosityLevel::Verbose,
            format!("starter: {name} ({team} slot {slot}, pos {position})"),
        );
        self.log.append_starter(SubstitutionRecord {
            player,
            name,
            team,
            slot,
            position,
        });
        self.cursor.reset_to_start(&self.log);
        self.build_boxscore()
    }

    /// Rebuild the box score from the full current log
    ///
    /// Invoked implicitly by every state-mutating call; exposed for callers
    /// that replace the whole log wholesale.
    pub fn build_boxscore(&mut self) -> Result<()> {
        self.boxscore.build(&self.log, self.engine.as_ref())
    }

    fn refresh(&mut self) -> Result<()> {
        self.cursor.advance_to_end(&self.log, self.engine.as_ref())?;
        self.build_boxscore()
    }

    // -- Read accessors -----------------------------------------------------

    pub fn inning(&self) -> u32 {
        self.cursor.inning()
    }

    pub fn half_inning(&self) -> Team {
        self.cursor.batting_team()
    }

    /// Outs in the current half-inning
    ///
    /// A just-completed half reads as the start of the next one: when the
    /// underlying count is 3 this reports 0, never 3.
    pub fn outs(&self) -> u8 {
        let outs = self.cursor.outs();
        if outs == 3 {
            0
        } else {
            outs
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        self.cursor.score(team)
    }

    pub fn hits(&self, team: Team) -> u32 {
        self.cursor.hits(team)
    }

    pub fn errors(&self, team: Team) -> u32 {
        self.cursor.errors(team)
    }

    /// Double plays turned by `team`, from the box score
    pub fn double_plays(&self, team: Team) -> u32 {
        self.boxscore.double_plays(team)
    }

    /// Runners left on base by `team`, including batters who reached and
    /// have neither scored nor been put out
    pub fn left_on_base(&self, team: Team) -> u32 {
        self.cursor.left_on_base(team)
    }

    /// The batter due up, from the batting order
    ///
    /// Slot arithmetic: plate appearances so far mod 9, plus one. None when
    /// the lineup slot has no declared occupant yet.
    pub fn current_batter(&self) -> Option<PlayerId> {
        let team = self.half_inning();
        let slot_number = (self.cursor.batters_faced(team) % 9) as u8 + 1;
        let slot = BattingSlot::new(slot_number)?;
        self.cursor.player(team, slot).cloned()
    }

    pub fn current_runner(&self, base: Base) -> Option<PlayerId> {
        self.cursor.runner(base).cloned()
    }

    pub fn current_player(&self, team: Team, slot: BattingSlot) -> Option<PlayerId> {
        self.cursor.player(team, slot).cloned()
    }

    pub fn current_position(&self, team: Team, slot: BattingSlot) -> Option<Position> {
        self.cursor.position_of(team, slot)
    }

    /// Is the next batter leading off a half-inning?
    pub fn is_leadoff(&self) -> bool {
        self.log.first_play().is_none() || self.cursor.outs() == 3
    }

    /// Standard end-of-game conditions
    ///
    /// A game with no plays is never over. Otherwise: the home team leads in
    /// the bottom of the ninth or later (walk-off territory, no need to
    /// finish the bottom half); or, from the tenth inning on, the visitors
    /// lead at the top of an inning later than the last recorded play,
    /// meaning the previous bottom half completed without the home team
    /// catching up.
    pub fn is_game_over(&self) -> bool {
        let Some(last_play) = self.log.last_play() else {
            return false;
        };

        if self.inning() >= 9
            && self.half_inning() == Team::Home
            && self.score(Team::Home) > self.score(Team::Visitor)
        {
            return true;
        }

        if self.inning() >= 10
            && self.half_inning() == Team::Visitor
            && last_play.inning < self.inning()
            && self.score(Team::Visitor) > self.score(Team::Home)
        {
            return true;
        }

        false
    }

    // -- Collaborator access ------------------------------------------------

    pub fn roster(&self, team: Team) -> &Roster {
        match team {
            Team::Visitor => &self.visitor_roster,
            Team::Home => &self.home_roster,
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn situation(&self) -> &Situation {
        self.cursor.situation()
    }

    pub fn boxscore(&self) -> &Boxscore {
        &self.boxscore
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventKind;
    use crate::game::logger::OutputMode;

    fn editor_with_starters() -> GameEditor {
        let mut editor = GameEditor::new(Roster::new("VIS"), Roster::new("HOM"));
        for slot in 1..=9u8 {
            editor
                .set_starter(
                    PlayerId::new(format!("vis{slot}")),
                    PlayerName::new(format!("Visitor {slot}")),
                    Team::Visitor,
                    BattingSlot::new(slot).unwrap(),
                    Position::from_number(slot).unwrap(),
                )
                .unwrap();
            editor
                .set_starter(
                    PlayerId::new(format!("hom{slot}")),
                    PlayerName::new(format!("Home {slot}")),
                    Team::Home,
                    BattingSlot::new(slot).unwrap(),
                    Position::from_number(slot).unwrap(),
                )
                .unwrap();
        }
        editor
    }

    #[test]
    fn test_empty_editor_defaults() {
        let editor = GameEditor::new(Roster::new("VIS"), Roster::new("HOM"));
        assert!(!editor.is_game_over());
        assert!(editor.is_leadoff());
        assert_eq!(editor.outs(), 0);
        assert_eq!(editor.inning(), 1);
        assert_eq!(editor.half_inning(), Team::Visitor);
        assert_eq!(editor.score(Team::Visitor), 0);
        assert_eq!(editor.score(Team::Home), 0);
        assert!(editor.current_batter().is_none());
    }

    #[test]
    fn test_add_play_records_current_situation() {
        let mut editor = editor_with_starters();
        editor.add_play("S8").unwrap();

        let play = editor.log().last_play().unwrap();
        assert_eq!(play.inning, 1);
        assert_eq!(play.batting_team, Team::Visitor);
        assert_eq!(play.batter, PlayerId::new("vis1"));
        assert_eq!(play.count, PlayRecord::UNKNOWN_COUNT);

        assert_eq!(editor.hits(Team::Visitor), 1);
        assert_eq!(editor.current_runner(Base::First), Some(PlayerId::new("vis1")));
        assert_eq!(editor.current_batter(), Some(PlayerId::new("vis2")));
    }

    #[test]
    fn test_rejected_play_leaves_log_untouched() {
        let mut editor = editor_with_starters();
        let before = editor.log().len();
        assert!(editor.add_play("garbage!").is_err());
        assert_eq!(editor.log().len(), before);
        assert_eq!(editor.outs(), 0);
    }

    #[test]
    fn test_delete_play_on_empty_log_is_noop() {
        let mut editor = editor_with_starters();
        editor.delete_play().unwrap();
        assert!(editor.is_leadoff());
        assert_eq!(editor.log().iter().filter(|e| e.as_play().is_some()).count(), 0);
    }

    #[test]
    fn test_delete_play_undoes_last_play() {
        let mut editor = editor_with_starters();
        editor.add_play("S8").unwrap();
        editor.add_play("HR").unwrap();
        assert_eq!(editor.score(Team::Visitor), 2);

        editor.delete_play().unwrap();
        assert_eq!(editor.score(Team::Visitor), 0);
        assert_eq!(editor.hits(Team::Visitor), 1);
        assert_eq!(editor.current_batter(), Some(PlayerId::new("vis2")));
    }

    #[test]
    fn test_substitution_inserts_placeholder_and_updates_lineup() {
        let mut editor = editor_with_starters();
        editor.add_play("K").unwrap();

        let sub = RosterPlayer::new("benchp01", "Bench", "Player");
        let slot = BattingSlot::new(2).unwrap();
        editor
            .add_substitute(&sub, Team::Visitor, slot, Position::PinchHitter)
            .unwrap();

        // NP placeholder precedes the substitution record
        let kinds: Vec<_> = editor
            .log()
            .iter()
            .rev()
            .take(2)
            .map(|e| match &e.kind {
                EventKind::Play(p) => ("play", p.text.clone()),
                EventKind::Substitution(s) => ("sub", s.name.to_string()),
                _ => ("other", String::new()),
            })
            .collect();
        assert_eq!(kinds[0], ("sub", "Bench Player".to_string()));
        assert_eq!(kinds[1], ("play", "NP".to_string()));

        assert_eq!(
            editor.current_player(Team::Visitor, slot),
            Some(PlayerId::new("benchp01"))
        );
        assert_eq!(
            editor.current_position(Team::Visitor, slot),
            Some(Position::PinchHitter)
        );
        // The substitute is now the batter due up
        assert_eq!(editor.current_batter(), Some(PlayerId::new("benchp01")));
    }

    #[test]
    fn test_comment_does_not_touch_state() {
        let mut editor = editor_with_starters();
        editor.add_play("S8").unwrap();
        let situation = editor.situation().clone();
        let boxscore = editor.boxscore().clone();

        editor.add_comment("rain delay");
        assert_eq!(editor.situation(), &situation);
        assert_eq!(editor.boxscore(), &boxscore);
    }

    #[test]
    fn test_mutations_are_narrated() {
        let mut editor = editor_with_starters();
        editor.logger_mut().set_output_mode(OutputMode::Memory);
        editor.add_play("S8").unwrap();
        editor.delete_play().unwrap();

        let messages: Vec<_> = editor
            .logger()
            .entries()
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages, ["play: S8 (visitor 1)", "undo: last play removed"]);
    }
}
