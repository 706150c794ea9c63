use super::Move;

/// Result of a single round, seen from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum RoundOutcome {
    #[display("Player Wins")]
    PlayerWins,
    #[display("Computer Wins")]
    ComputerWins,
    #[display("Draw")]
    Draw,
}

impl RoundOutcome {
    /// Decides a round.
    ///
    /// Total over all nine pairings: equal moves draw, otherwise the side whose
    /// move dominates the other's wins.
    ///
    /// ```
    /// use rps_engine::{Move, RoundOutcome};
    ///
    /// assert_eq!(RoundOutcome::resolve(Move::Rock, Move::Scissors), RoundOutcome::PlayerWins);
    /// assert_eq!(RoundOutcome::resolve(Move::Scissors, Move::Rock), RoundOutcome::ComputerWins);
    /// assert_eq!(RoundOutcome::resolve(Move::Paper, Move::Paper), RoundOutcome::Draw);
    /// ```
    #[must_use]
    pub fn resolve(player: Move, computer: Move) -> Self {
        if player == computer {
            Self::Draw
        } else if player.beats() == computer {
            Self::PlayerWins
        } else {
            Self::ComputerWins
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_moves_draw() {
        for m in Move::ALL {
            assert_eq!(RoundOutcome::resolve(m, m), RoundOutcome::Draw);
        }
    }

    #[test]
    fn test_full_table() {
        use Move::{Paper, Rock, Scissors};
        use RoundOutcome::{ComputerWins, PlayerWins};

        let cases = [
            (Rock, Scissors, PlayerWins),
            (Scissors, Paper, PlayerWins),
            (Paper, Rock, PlayerWins),
            (Scissors, Rock, ComputerWins),
            (Paper, Scissors, ComputerWins),
            (Rock, Paper, ComputerWins),
        ];
        for (player, computer, expected) in cases {
            assert_eq!(
                RoundOutcome::resolve(player, computer),
                expected,
                "{player} vs {computer}"
            );
        }
    }

    #[test]
    fn test_resolution_is_antisymmetric() {
        for a in Move::ALL {
            for b in Move::ALL {
                let forward = RoundOutcome::resolve(a, b);
                let backward = RoundOutcome::resolve(b, a);
                match forward {
                    RoundOutcome::Draw => assert!(backward.is_draw()),
                    RoundOutcome::PlayerWins => assert!(backward.is_computer_wins()),
                    RoundOutcome::ComputerWins => assert!(backward.is_player_wins()),
                }
            }
        }
    }
}
