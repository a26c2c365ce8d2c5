use charades_types::{Standing, StandingsReport, Team, TurnRecord};
use std::cmp::Ordering;
use std::collections::HashMap;

pub struct ResultAggregator;

impl ResultAggregator {
    /// Fold finalized turns into per-team totals and rank the teams.
    ///
    /// Ordering: most correct answers, then least total time, then fewest
    /// passes. Teams equal on all three share a rank; the next distinct team
    /// takes its 1-based position (1, 1, 3). Turns for unknown team codes are
    /// skipped.
    pub fn compute_standings(teams: &[Team], turns: &[TurnRecord]) -> StandingsReport {
        let mut standings: Vec<Standing> = teams
            .iter()
            .map(|team| Standing {
                team_code: team.code.clone(),
                team_name: team.name.clone(),
                total_correct: 0,
                total_time: 0,
                total_pass: 0,
                rank: 0,
            })
            .collect();

        let index_by_code: HashMap<&str, usize> = teams
            .iter()
            .enumerate()
            .map(|(i, team)| (team.code.as_str(), i))
            .collect();

        for turn in turns {
            let Some(&i) = index_by_code.get(turn.team_code.as_str()) else {
                continue;
            };
            let standing = &mut standings[i];
            standing.total_correct += turn.correct_count;
            standing.total_time += turn.elapsed_sec;
            standing.total_pass += turn.used_pass;
        }

        // Stable sort keeps team order among exact ties
        standings.sort_by(Self::compare);

        let mut current_rank = 1;
        for i in 0..standings.len() {
            if i > 0 && Self::compare(&standings[i - 1], &standings[i]) != Ordering::Equal {
                current_rank = i as u32 + 1;
            }
            standings[i].rank = current_rank;
        }

        let winners = standings.iter().filter(|s| s.rank == 1).cloned().collect();

        StandingsReport { standings, winners }
    }

    fn compare(a: &Standing, b: &Standing) -> Ordering {
        b.total_correct
            .cmp(&a.total_correct)
            .then(a.total_time.cmp(&b.total_time))
            .then(a.total_pass.cmp(&b.total_pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(code: &str) -> Team {
        Team {
            code: code.to_string(),
            name: format!("Team {}", code),
            color: "BLUE".to_string(),
            color_hex: "#3B82F6".to_string(),
            order_index: 0,
        }
    }

    fn turn(code: &str, correct: u32, elapsed: u32, pass: u32) -> TurnRecord {
        TurnRecord {
            team_code: code.to_string(),
            round_index: 0,
            correct_count: correct,
            used_pass: pass,
            elapsed_sec: elapsed,
            started_at: chrono::Utc::now().to_rfc3339(),
            ended_at: chrono::Utc::now().to_rfc3339(),
            words: Vec::new(),
        }
    }

    fn summary(report: &StandingsReport) -> Vec<(&str, u32)> {
        report
            .standings
            .iter()
            .map(|s| (s.team_code.as_str(), s.rank))
            .collect()
    }

    #[test]
    fn test_forced_end_scenario() {
        let teams = vec![team("A"), team("B")];
        let turns = vec![turn("A", 3, 60, 1), turn("B", 5, 45, 0)];

        let report = ResultAggregator::compute_standings(&teams, &turns);

        assert_eq!(summary(&report), vec![("B", 1), ("A", 2)]);
        let b = &report.standings[0];
        assert_eq!((b.total_correct, b.total_time, b.total_pass), (5, 45, 0));
        let a = &report.standings[1];
        assert_eq!((a.total_correct, a.total_time, a.total_pass), (3, 60, 1));
        assert_eq!(report.winners.len(), 1);
        assert_eq!(report.winners[0].team_code, "B");
    }

    #[test]
    fn test_exact_tie_shares_first_place() {
        let teams = vec![team("A"), team("B")];
        let turns = vec![turn("A", 4, 30, 1), turn("B", 4, 30, 1)];

        let report = ResultAggregator::compute_standings(&teams, &turns);

        assert_eq!(summary(&report), vec![("A", 1), ("B", 1)]);
        assert_eq!(report.winners.len(), 2);
    }

    #[test]
    fn test_tie_breaking_keys_in_order() {
        let teams = vec![team("A"), team("B"), team("C"), team("D")];
        let turns = vec![
            turn("A", 5, 50, 2), // same correct as B, slower
            turn("B", 5, 40, 2),
            turn("C", 5, 40, 1), // same correct/time as B, fewer passes
            turn("D", 6, 90, 3), // most correct wins regardless of time
        ];

        let report = ResultAggregator::compute_standings(&teams, &turns);

        assert_eq!(summary(&report), vec![("D", 1), ("C", 2), ("B", 3), ("A", 4)]);
    }

    #[test]
    fn test_rank_skips_after_tie() {
        let teams = vec![team("A"), team("B"), team("C")];
        let turns = vec![turn("A", 2, 10, 0), turn("B", 2, 10, 0), turn("C", 1, 10, 0)];

        let report = ResultAggregator::compute_standings(&teams, &turns);

        assert_eq!(summary(&report), vec![("A", 1), ("B", 1), ("C", 3)]);
    }

    #[test]
    fn test_turns_accumulate_across_rounds() {
        let teams = vec![team("A"), team("B")];
        let turns = vec![
            turn("A", 2, 30, 1),
            turn("B", 3, 30, 0),
            turn("A", 4, 20, 0),
            turn("B", 1, 25, 2),
        ];

        let report = ResultAggregator::compute_standings(&teams, &turns);

        let a = report.standings.iter().find(|s| s.team_code == "A").unwrap();
        assert_eq!((a.total_correct, a.total_time, a.total_pass), (6, 50, 1));
        assert_eq!(a.rank, 1);
    }

    #[test]
    fn test_unknown_team_codes_ignored() {
        let teams = vec![team("A")];
        let turns = vec![turn("A", 1, 10, 0), turn("Z", 99, 1, 0)];

        let report = ResultAggregator::compute_standings(&teams, &turns);

        assert_eq!(report.standings.len(), 1);
        assert_eq!(report.standings[0].total_correct, 1);
    }

    #[test]
    fn test_no_turns_everyone_ties() {
        let teams = vec![team("A"), team("B"), team("C")];
        let report = ResultAggregator::compute_standings(&teams, &[]);
        assert!(report.standings.iter().all(|s| s.rank == 1));
        assert_eq!(report.winners.len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let teams = vec![team("A"), team("B"), team("C")];
        let turns = vec![turn("C", 3, 20, 1), turn("A", 3, 20, 1), turn("B", 7, 60, 0)];

        let first = ResultAggregator::compute_standings(&teams, &turns);
        let second = ResultAggregator::compute_standings(&teams, &turns);

        assert_eq!(first, second);
    }
}
