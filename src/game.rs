//! Game lifecycle rules: `initialized → in_progress → completed`.

use log::info;

use crate::common::GameError;
use crate::domain::GameStatus;
use crate::ship::Owner;

/// Per-owner fleet completion, as reported by placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetReadiness {
    pub human: bool,
    pub computer: bool,
}

/// Whether each side's fleet has been fully destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetLosses {
    pub human: bool,
    pub computer: bool,
}

impl FleetLosses {
    pub fn any(&self) -> bool {
        self.human || self.computer
    }
}

impl GameStatus {
    /// Admit `initialized → in_progress`. Both fleets must be complete.
    pub fn start(self, readiness: FleetReadiness) -> Result<GameStatus, GameError> {
        if !readiness.human {
            return Err(GameError::NotAcceptable { owner: Owner::Human });
        }
        if !readiness.computer {
            return Err(GameError::NotAcceptable { owner: Owner::Computer });
        }
        if self != GameStatus::Initialized {
            return Err(GameError::InvalidTransition {
                from: self,
                to: GameStatus::InProgress,
            });
        }
        info!("game started");
        Ok(GameStatus::InProgress)
    }

    /// Placement is only open before the game starts.
    pub fn ensure_placing(self) -> Result<(), GameError> {
        match self {
            GameStatus::Initialized => Ok(()),
            status => Err(GameError::InvalidPhase { status }),
        }
    }

    /// Shooting is only open while the game is running.
    pub fn ensure_shooting(self) -> Result<(), GameError> {
        match self {
            GameStatus::InProgress => Ok(()),
            status => Err(GameError::InvalidPhase { status }),
        }
    }

    /// Status after a shot/counter-shot pair. `None` means unchanged.
    pub fn after_shots(self, losses: FleetLosses) -> Result<Option<GameStatus>, GameError> {
        self.ensure_shooting()?;
        if losses.any() {
            Ok(Some(GameStatus::Completed))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READY: FleetReadiness = FleetReadiness { human: true, computer: true };

    #[test]
    fn start_requires_both_fleets() {
        let partial = FleetReadiness { human: true, computer: false };
        assert_eq!(
            GameStatus::Initialized.start(partial),
            Err(GameError::NotAcceptable { owner: Owner::Computer })
        );
        assert_eq!(GameStatus::Initialized.start(READY), Ok(GameStatus::InProgress));
    }

    #[test]
    fn start_only_from_initialized() {
        for from in [GameStatus::InProgress, GameStatus::Completed] {
            assert_eq!(
                from.start(READY),
                Err(GameError::InvalidTransition { from, to: GameStatus::InProgress })
            );
        }
    }

    #[test]
    fn completion_follows_losses() {
        let running = GameStatus::InProgress;
        assert_eq!(running.after_shots(FleetLosses::default()), Ok(None));
        let lost = FleetLosses { human: false, computer: true };
        assert_eq!(running.after_shots(lost), Ok(Some(GameStatus::Completed)));
    }

    #[test]
    fn completed_rejects_further_shots() {
        let done = GameStatus::Completed;
        assert_eq!(
            done.ensure_shooting(),
            Err(GameError::InvalidPhase { status: done })
        );
        assert!(done.after_shots(FleetLosses { human: true, computer: true }).is_err());
    }
}
