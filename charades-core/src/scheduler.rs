use serde::Serialize;

/// Which team plays next and whether that turn closes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnPosition {
    pub team_index: usize,
    pub round_index: u32,
    pub is_last_turn: bool,
}

pub struct RoundScheduler;

impl RoundScheduler {
    /// Derive the active team and round from the number of completed turns.
    ///
    /// Teams rotate in order; the round advances once every team has played.
    /// The round is clamped to the final round so that reading the position
    /// after the last turn never overshoots. Returns `None` for an empty team
    /// list, which setup validation rules out.
    pub fn position(
        turns_completed: usize,
        total_teams: usize,
        rounds_per_team: u32,
    ) -> Option<TurnPosition> {
        if total_teams == 0 {
            return None;
        }

        let last_round = rounds_per_team.saturating_sub(1);
        let team_index = turns_completed % total_teams;
        let round = turns_completed / total_teams;
        let round_index = u32::try_from(round).unwrap_or(u32::MAX).min(last_round);

        Some(TurnPosition {
            team_index,
            round_index,
            is_last_turn: round_index == last_round && team_index == total_teams - 1,
        })
    }

    /// Total number of turns a game with this shape plays.
    pub fn total_turns(total_teams: usize, rounds_per_team: u32) -> usize {
        total_teams * rounds_per_team as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_and_rounds() {
        for teams in 1..=5usize {
            for rounds in 1..=4u32 {
                for n in 0..(teams * rounds as usize + teams) {
                    let pos = RoundScheduler::position(n, teams, rounds).unwrap();
                    assert_eq!(pos.team_index, n % teams);
                    assert_eq!(pos.round_index, ((n / teams) as u32).min(rounds - 1));
                }
            }
        }
    }

    #[test]
    fn test_last_turn_flagged_exactly_once() {
        for teams in 1..=5usize {
            for rounds in 1..=4u32 {
                let total = RoundScheduler::total_turns(teams, rounds);
                let last_turns: Vec<usize> = (0..total)
                    .filter(|&n| RoundScheduler::position(n, teams, rounds).unwrap().is_last_turn)
                    .collect();
                assert_eq!(last_turns, vec![total - 1], "teams={} rounds={}", teams, rounds);
            }
        }
    }

    #[test]
    fn test_round_clamped_after_final_turn() {
        // 2 teams, 2 rounds: turn 4 would be round 2 without clamping
        let pos = RoundScheduler::position(4, 2, 2).unwrap();
        assert_eq!(pos.round_index, 1);
        assert_eq!(pos.team_index, 0);
    }

    #[test]
    fn test_zero_teams() {
        assert_eq!(RoundScheduler::position(0, 0, 3), None);
    }
}
