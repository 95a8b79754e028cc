//! Scoring engine interface and reference rules
//!
//! The editor never interprets play text itself; it hands each play to a
//! [`ScoringEngine`] and applies the returned outcome. [`StandardRules`] is
//! the reference engine: it parses a Retrosheet-flavored subset of play
//! notation with nom and resolves implied runner advances from the current
//! base occupancy.
//!
//! Supported notation: "NP" placeholders; hits S/D/T/HR with optional
//! fielder digits; W and IW walks; HP hit-by-pitch; K strikeouts; E<fielder>
//! errors; bare fielding strings like "8", "63", or "64(1)3" where a
//! parenthesized runner is put out on the bases. An optional "/" modifier
//! section and an optional "." advance section ("B-2", "1-3", "2X3",
//! ";"-separated) follow the primary event.

use crate::core::Base;
use crate::{Result, ScorebookError};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, one_of};
use nom::combinator::{all_consuming, map, opt, value};
use nom::multi::{many1, separated_list1};
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Where a runner (or the batter) ends up after a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Base(Base),
    Home,
    Out,
}

/// Movement of one runner; `runner == None` is the batter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    pub runner: Option<Base>,
    pub to: Destination,
}

/// The state transition one play produces
///
/// Advances are ordered lead runner first (third base down to the batter)
/// so they can be applied in sequence without base collisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// "NP" placeholder: no batting outcome at all
    pub no_play: bool,

    /// Base hit credited to the batter
    pub hit: bool,

    /// Error charged to the fielding team
    pub error: bool,

    /// Two or more outs recorded on one batted ball
    pub double_play: bool,

    /// Counts as an official at-bat (walks and hit-by-pitch do not)
    pub at_bat: bool,

    pub advances: SmallVec<[Advance; 4]>,
}

impl PlayOutcome {
    /// Outcome for a placeholder record
    pub fn no_play() -> Self {
        PlayOutcome {
            no_play: true,
            hit: false,
            error: false,
            double_play: false,
            at_bat: false,
            advances: SmallVec::new(),
        }
    }

    /// Number of outs this play records
    pub fn outs_recorded(&self) -> u8 {
        self.advances
            .iter()
            .filter(|a| a.to == Destination::Out)
            .count() as u8
    }
}

/// The external play-by-play scoring collaborator
///
/// Given raw play text and which bases are currently occupied, computes the
/// per-play state transition. Object-safe so the editor can hold any engine
/// behind `Box<dyn ScoringEngine>`.
pub trait ScoringEngine {
    fn score_play(&self, text: &str, bases_occupied: [bool; 3]) -> Result<PlayOutcome>;
}

// ---------------------------------------------------------------------------
// Parsed representation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunnerToken {
    Batter,
    OnBase(Base),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldingItem {
    /// A fielder handling the ball (digit 1-9)
    Fielder,
    /// A runner retired on the bases, e.g. "(1)" in "64(1)3"
    PutOut(RunnerToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Primary {
    NoPlay,
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    IntentionalWalk,
    HitByPitch,
    Strikeout,
    Error,
    InPlayOut(Vec<FieldingItem>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedAdvance {
    runner: RunnerToken,
    to: Destination,
}

#[derive(Debug, Clone, PartialEq)]
struct ParsedPlay {
    primary: Primary,
    modifiers: Vec<String>,
    advances: Vec<ParsedAdvance>,
}

// ---------------------------------------------------------------------------
// nom grammar
// ---------------------------------------------------------------------------

fn runner_token(input: &str) -> IResult<&str, RunnerToken> {
    alt((
        value(RunnerToken::Batter, char('B')),
        value(RunnerToken::OnBase(Base::First), char('1')),
        value(RunnerToken::OnBase(Base::Second), char('2')),
        value(RunnerToken::OnBase(Base::Third), char('3')),
    ))(input)
}

fn fielders(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_ascii_digit())(input)
}

fn fielding_item(input: &str) -> IResult<&str, FieldingItem> {
    alt((
        value(FieldingItem::Fielder, one_of("123456789")),
        map(
            delimited(char('('), runner_token, char(')')),
            FieldingItem::PutOut,
        ),
    ))(input)
}

fn primary(input: &str) -> IResult<&str, Primary> {
    alt((
        value(Primary::NoPlay, tag("NP")),
        value(Primary::HomeRun, preceded(tag("HR"), fielders)),
        value(Primary::HitByPitch, tag("HP")),
        value(Primary::IntentionalWalk, tag("IW")),
        value(Primary::Walk, char('W')),
        value(Primary::Single, preceded(char('S'), fielders)),
        value(Primary::Double, preceded(char('D'), fielders)),
        value(Primary::Triple, preceded(char('T'), fielders)),
        value(Primary::Strikeout, char('K')),
        value(Primary::Error, preceded(char('E'), one_of("123456789"))),
        map(many1(fielding_item), Primary::InPlayOut),
    ))(input)
}

fn advance(input: &str) -> IResult<&str, ParsedAdvance> {
    map(
        tuple((runner_token, one_of("-X"), one_of("123H"))),
        |(runner, sep, target)| {
            let to = if sep == 'X' {
                Destination::Out
            } else {
                match target {
                    '1' => Destination::Base(Base::First),
                    '2' => Destination::Base(Base::Second),
                    '3' => Destination::Base(Base::Third),
                    _ => Destination::Home,
                }
            };
            ParsedAdvance { runner, to }
        },
    )(input)
}

fn play_text(input: &str) -> IResult<&str, ParsedPlay> {
    map(
        tuple((
            primary,
            opt(preceded(char('/'), take_while(|c: char| c != '.'))),
            opt(preceded(char('.'), separated_list1(char(';'), advance))),
        )),
        |(primary, modifiers, advances)| ParsedPlay {
            primary,
            modifiers: modifiers
                .map(|m: &str| m.split('/').map(str::to_string).collect())
                .unwrap_or_default(),
            advances: advances.unwrap_or_default(),
        },
    )(input)
}

// ---------------------------------------------------------------------------
// Reference engine
// ---------------------------------------------------------------------------

/// Reference scoring rules over the documented notation subset
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl StandardRules {
    pub fn new() -> Self {
        StandardRules
    }
}

const ALL_BASES: [Base; 3] = [Base::First, Base::Second, Base::Third];

/// Destination `earned` bases ahead of `from` (None = batter at the plate)
fn bases_ahead(from: Option<Base>, earned: usize) -> Destination {
    let start = match from {
        Some(base) => base.index() + 1,
        None => 0,
    };
    match start + earned {
        1 => Destination::Base(Base::First),
        2 => Destination::Base(Base::Second),
        3 => Destination::Base(Base::Third),
        _ => Destination::Home,
    }
}

impl ScoringEngine for StandardRules {
    fn score_play(&self, text: &str, bases_occupied: [bool; 3]) -> Result<PlayOutcome> {
        let parsed = all_consuming(play_text)(text)
            .map(|(_, parsed)| parsed)
            .map_err(|_| ScorebookError::InvalidPlayText(text.to_string()))?;

        if parsed.primary == Primary::NoPlay {
            return Ok(PlayOutcome::no_play());
        }

        let mut hit = false;
        let mut error = false;
        let mut at_bat = true;
        let mut double_play = false;

        // Implied destination per occupied base; None means the runner holds
        let mut implied: [Option<Destination>; 3] = [None, None, None];
        let batter_to: Destination;

        match &parsed.primary {
            Primary::NoPlay => unreachable!("handled above"),
            Primary::Single | Primary::Double | Primary::Triple | Primary::HomeRun => {
                hit = true;
                let earned = match parsed.primary {
                    Primary::Single => 1,
                    Primary::Double => 2,
                    Primary::Triple => 3,
                    _ => 4,
                };
                batter_to = bases_ahead(None, earned);
                for base in ALL_BASES {
                    if bases_occupied[base.index()] {
                        implied[base.index()] = Some(bases_ahead(Some(base), earned));
                    }
                }
            }
            Primary::Walk | Primary::IntentionalWalk | Primary::HitByPitch => {
                at_bat = false;
                batter_to = Destination::Base(Base::First);
                // Only forced runners move
                if bases_occupied[0] {
                    implied[0] = Some(Destination::Base(Base::Second));
                    if bases_occupied[1] {
                        implied[1] = Some(Destination::Base(Base::Third));
                        if bases_occupied[2] {
                            implied[2] = Some(Destination::Home);
                        }
                    }
                }
            }
            Primary::Strikeout => {
                batter_to = Destination::Out;
            }
            Primary::Error => {
                error = true;
                batter_to = Destination::Base(Base::First);
            }
            Primary::InPlayOut(items) => {
                let mut putouts = 0usize;
                let mut batter_retired = false;
                for item in items {
                    if let FieldingItem::PutOut(runner) = item {
                        putouts += 1;
                        match runner {
                            RunnerToken::Batter => batter_retired = true,
                            RunnerToken::OnBase(base) => {
                                implied[base.index()] = Some(Destination::Out);
                            }
                        }
                    }
                }
                // With no parenthesized runners the batter is the out;
                // trailing fielders after the last putout retire the batter
                // too ("64(1)3"). "64(1)" alone is a force out with the
                // batter safe at first.
                let batter_out = batter_retired
                    || putouts == 0
                    || matches!(items.last(), Some(FieldingItem::Fielder));
                if batter_out && !batter_retired {
                    putouts += 1;
                }
                batter_to = if batter_out {
                    Destination::Out
                } else {
                    Destination::Base(Base::First)
                };
                if putouts >= 2 {
                    double_play = true;
                }
            }
        }

        if parsed
            .modifiers
            .iter()
            .any(|m| m == "GDP" || m == "LDP" || m == "DP")
        {
            double_play = true;
        }

        let explicit = |runner: RunnerToken| parsed.advances.iter().find(|a| a.runner == runner);

        // Lead runners first so application never collides on a base
        let mut advances: SmallVec<[Advance; 4]> = SmallVec::new();
        for base in [Base::Third, Base::Second, Base::First] {
            let to = match explicit(RunnerToken::OnBase(base)) {
                Some(parsed_advance) => Some(parsed_advance.to),
                None if bases_occupied[base.index()] => implied[base.index()],
                None => None,
            };
            if let Some(to) = to {
                advances.push(Advance {
                    runner: Some(base),
                    to,
                });
            }
        }
        let batter_final = explicit(RunnerToken::Batter)
            .map(|a| a.to)
            .unwrap_or(batter_to);
        advances.push(Advance {
            runner: None,
            to: batter_final,
        });

        Ok(PlayOutcome {
            no_play: false,
            hit,
            error,
            double_play,
            at_bat,
            advances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: [bool; 3] = [false, false, false];
    const RUNNER_ON_FIRST: [bool; 3] = [true, false, false];
    const LOADED: [bool; 3] = [true, true, true];

    fn rules() -> StandardRules {
        StandardRules::new()
    }

    fn advance_of(outcome: &PlayOutcome, runner: Option<Base>) -> Destination {
        outcome
            .advances
            .iter()
            .find(|a| a.runner == runner)
            .map(|a| a.to)
            .expect("runner should have an advance")
    }

    #[test]
    fn test_no_play() {
        let outcome = rules().score_play("NP", EMPTY).unwrap();
        assert!(outcome.no_play);
        assert!(outcome.advances.is_empty());
    }

    #[test]
    fn test_single_empty_bases() {
        let outcome = rules().score_play("S8", EMPTY).unwrap();
        assert!(outcome.hit);
        assert!(outcome.at_bat);
        assert_eq!(outcome.advances.len(), 1);
        assert_eq!(advance_of(&outcome, None), Destination::Base(Base::First));
    }

    #[test]
    fn test_single_advances_all_runners_one_base() {
        let outcome = rules().score_play("S7", LOADED).unwrap();
        assert_eq!(advance_of(&outcome, Some(Base::Third)), Destination::Home);
        assert_eq!(
            advance_of(&outcome, Some(Base::Second)),
            Destination::Base(Base::Third)
        );
        assert_eq!(
            advance_of(&outcome, Some(Base::First)),
            Destination::Base(Base::Second)
        );
        // Lead runner listed first
        assert_eq!(outcome.advances[0].runner, Some(Base::Third));
    }

    #[test]
    fn test_double_scores_from_second() {
        let outcome = rules().score_play("D9", [false, true, false]).unwrap();
        assert_eq!(advance_of(&outcome, Some(Base::Second)), Destination::Home);
        assert_eq!(advance_of(&outcome, None), Destination::Base(Base::Second));
    }

    #[test]
    fn test_home_run_clears_bases() {
        let outcome = rules().score_play("HR", LOADED).unwrap();
        assert!(outcome.hit);
        assert_eq!(outcome.advances.len(), 4);
        assert!(outcome.advances.iter().all(|a| a.to == Destination::Home));
    }

    #[test]
    fn test_walk_forces_only_forced_runners() {
        // Runner on second is not forced by a walk
        let outcome = rules().score_play("W", [false, true, false]).unwrap();
        assert_eq!(outcome.advances.len(), 1);
        assert_eq!(advance_of(&outcome, None), Destination::Base(Base::First));
        assert!(!outcome.at_bat);

        let outcome = rules().score_play("W", LOADED).unwrap();
        assert_eq!(advance_of(&outcome, Some(Base::Third)), Destination::Home);
        assert_eq!(
            advance_of(&outcome, Some(Base::First)),
            Destination::Base(Base::Second)
        );
    }

    #[test]
    fn test_strikeout() {
        let outcome = rules().score_play("K", EMPTY).unwrap();
        assert_eq!(advance_of(&outcome, None), Destination::Out);
        assert!(outcome.at_bat);
        assert_eq!(outcome.outs_recorded(), 1);
    }

    #[test]
    fn test_error_puts_batter_on_first() {
        let outcome = rules().score_play("E6", EMPTY).unwrap();
        assert!(outcome.error);
        assert!(!outcome.hit);
        assert_eq!(advance_of(&outcome, None), Destination::Base(Base::First));
    }

    #[test]
    fn test_groundout() {
        let outcome = rules().score_play("63", EMPTY).unwrap();
        assert_eq!(advance_of(&outcome, None), Destination::Out);
        assert!(!outcome.double_play);
    }

    #[test]
    fn test_ground_double_play() {
        let outcome = rules().score_play("64(1)3", RUNNER_ON_FIRST).unwrap();
        assert!(outcome.double_play);
        assert_eq!(outcome.outs_recorded(), 2);
        assert_eq!(advance_of(&outcome, Some(Base::First)), Destination::Out);
        assert_eq!(advance_of(&outcome, None), Destination::Out);
    }

    #[test]
    fn test_force_out_batter_safe() {
        let outcome = rules().score_play("64(1)", RUNNER_ON_FIRST).unwrap();
        assert!(!outcome.double_play);
        assert_eq!(outcome.outs_recorded(), 1);
        assert_eq!(advance_of(&outcome, None), Destination::Base(Base::First));
    }

    #[test]
    fn test_gdp_modifier_flags_double_play() {
        let outcome = rules().score_play("63/GDP", RUNNER_ON_FIRST).unwrap();
        assert!(outcome.double_play);
    }

    #[test]
    fn test_explicit_advances_override_implied() {
        // Runner from first goes to third on the single
        let outcome = rules().score_play("S9.1-3", RUNNER_ON_FIRST).unwrap();
        assert_eq!(
            advance_of(&outcome, Some(Base::First)),
            Destination::Base(Base::Third)
        );
    }

    #[test]
    fn test_runner_thrown_out_advancing() {
        let outcome = rules().score_play("S8.1X3", RUNNER_ON_FIRST).unwrap();
        assert_eq!(advance_of(&outcome, Some(Base::First)), Destination::Out);
        assert_eq!(outcome.outs_recorded(), 1);
    }

    #[test]
    fn test_multiple_explicit_advances() {
        let outcome = rules().score_play("S8.3-H;1-2", [true, false, true]).unwrap();
        assert_eq!(advance_of(&outcome, Some(Base::Third)), Destination::Home);
        assert_eq!(
            advance_of(&outcome, Some(Base::First)),
            Destination::Base(Base::Second)
        );
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        assert!(rules().score_play("", EMPTY).is_err());
        assert!(rules().score_play("XYZ", EMPTY).is_err());
        assert!(rules().score_play("S8..", EMPTY).is_err());
        assert!(rules().score_play("E0", EMPTY).is_err());
    }

    #[test]
    fn test_modifier_section_is_tolerated() {
        let outcome = rules().score_play("S8/L7.1-2", RUNNER_ON_FIRST).unwrap();
        assert!(outcome.hit);
        assert_eq!(
            advance_of(&outcome, Some(Base::First)),
            Destination::Base(Base::Second)
        );
    }
}
