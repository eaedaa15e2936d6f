use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::config::SquadRules;
use crate::models::{Player, Position, ScoredPlayer, Squad, SquadMember};
use crate::SELECTION_NOTE;

/// Per-position counter, zero for every position on construction
#[derive(Debug, Default, Clone, Copy)]
struct PositionCounts([usize; 4]);

impl PositionCounts {
    fn get(&self, position: Position) -> usize {
        self.0[position.index()]
    }

    fn increment(&mut self, position: Position) {
        self.0[position.index()] += 1;
    }
}

/// Why a candidate was passed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    PositionFull,
    ClubCap,
    OverBudget,
}

/// Greedy first-fit squad builder.
///
/// Consumes candidates already sorted by descending score, in one forward pass
/// with no backtracking. A short squad is a valid result.
#[derive(Debug, Clone)]
pub struct SquadBuilder {
    rules: SquadRules,
}

impl SquadBuilder {
    pub fn new(rules: SquadRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SquadRules {
        &self.rules
    }

    /// Build a squad from score-sorted candidates. Never fails.
    pub fn select(&self, sorted: &[ScoredPlayer], gameweek: u32, deadline: Option<String>) -> Squad {
        let (selected, budget_used) = self.admit(sorted);
        let (starting, bench) = self.split_lineup(&selected);
        let (captain_id, vice_captain_id) = pick_captains(&starting);

        let mut metadata = BTreeMap::new();
        metadata.insert("formation".to_string(), self.rules.formation.label());
        metadata.insert("note".to_string(), SELECTION_NOTE.to_string());

        info!(
            "Selected {} players for GW{} ({} starting, {} bench, budget {:.1}/{:.1})",
            selected.len(),
            gameweek,
            starting.len(),
            bench.len(),
            budget_used,
            self.rules.budget_limit
        );

        Squad {
            gameweek,
            deadline,
            budget_used: round_to_tenth(budget_used),
            budget_limit: self.rules.budget_limit,
            captain_id,
            vice_captain_id,
            starting,
            bench,
            metadata,
        }
    }

    /// First pass: admit candidates in order while every constraint holds
    fn admit<'a>(&self, sorted: &'a [ScoredPlayer]) -> (Vec<&'a Player>, f64) {
        let mut selected: Vec<&Player> = Vec::with_capacity(self.rules.squad_size);
        let mut club_counts: HashMap<u32, usize> = HashMap::new();
        let mut position_counts = PositionCounts::default();
        let mut budget_used = 0.0;

        for candidate in sorted {
            if selected.len() >= self.rules.squad_size {
                break;
            }
            let player = &candidate.player;

            let rejection = if position_counts.get(player.position)
                >= self.rules.quotas.get(player.position)
            {
                Some(Rejection::PositionFull)
            } else if club_counts.get(&player.team_id).copied().unwrap_or(0) >= self.rules.max_per_club {
                Some(Rejection::ClubCap)
            } else if budget_used + player.price > self.rules.budget_limit {
                Some(Rejection::OverBudget)
            } else {
                None
            };

            if let Some(reason) = rejection {
                debug!("Skipped {} ({}, {:.3}): {:?}", player.name, player.position, candidate.score, reason);
                continue;
            }

            *club_counts.entry(player.team_id).or_insert(0) += 1;
            position_counts.increment(player.position);
            budget_used += player.price;
            selected.push(player);
            debug!("Admitted {} ({}, {:.1}m, score {:.3})", player.name, player.position, player.price, candidate.score);
        }

        (selected, budget_used)
    }

    /// Second pass: the first players of each position, in selection order, start
    fn split_lineup(&self, selected: &[&Player]) -> (Vec<SquadMember>, Vec<SquadMember>) {
        let mut starting = Vec::new();
        let mut bench = Vec::new();
        let mut counts = PositionCounts::default();

        for &player in selected {
            if counts.get(player.position) < self.rules.formation.get(player.position) {
                counts.increment(player.position);
                starting.push(SquadMember { player: player.clone(), is_starting: true });
            } else {
                bench.push(SquadMember { player: player.clone(), is_starting: false });
            }
        }

        (starting, bench)
    }
}

impl Default for SquadBuilder {
    fn default() -> Self {
        Self::new(SquadRules::default())
    }
}

/// Round to one decimal place on the exact value, halves to even
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// First starter with the highest predicted points, ties going to the earliest
fn highest_predicted<'a, I>(members: I) -> Option<&'a SquadMember>
where
    I: IntoIterator<Item = &'a SquadMember>,
{
    members.into_iter().reduce(|best, member| {
        if member.player.predicted_points > best.player.predicted_points {
            member
        } else {
            best
        }
    })
}

/// Captain and vice-captain from the starting lineup.
///
/// With a single starter the vice-captain falls back to the captain.
fn pick_captains(starting: &[SquadMember]) -> (Option<u32>, Option<u32>) {
    let Some(captain) = highest_predicted(starting).map(|m| m.player.id) else {
        return (None, None);
    };

    let others: Vec<&SquadMember> = starting.iter().filter(|m| m.player.id != captain).collect();
    let vice = if others.is_empty() {
        highest_predicted(starting)
    } else {
        highest_predicted(others)
    };

    (Some(captain), vice.map(|m| m.player.id))
}
