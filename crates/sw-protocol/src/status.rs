//! Robot lifecycle states and the commands that change them.

/// Where a robot is in its explore loop.
///
/// ```text
/// StandBy ──start──▶ ScanCell ──▶ PathFind ──▶ MoveRobot ──┐
///                       ▲            │   ▲         │       │
///                       │            │   └─blocked─┘       │
///                       └────────────┼──arrived────────────┘
///                                    ▼
///                    ShutDown ──confirmed──▶ ExitLoop
/// ```
///
/// Codes are the legacy integer encoding, kept for log and CSV output.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotStatus {
    /// Registered, waiting for the coordinator to start the run.
    #[default]
    StandBy,
    ScanCell,
    PathFind,
    MoveRobot,
    /// Nothing left to do; about to tell the coordinator.
    ShutDown,
    /// Shutdown confirmed; the robot's loop returns.
    ExitLoop,
}

impl RobotStatus {
    pub fn code(self) -> i8 {
        match self {
            RobotStatus::StandBy   => 0,
            RobotStatus::ScanCell  => 1,
            RobotStatus::PathFind  => 2,
            RobotStatus::MoveRobot => 3,
            RobotStatus::ShutDown  => -1,
            RobotStatus::ExitLoop  => -2,
        }
    }

    pub fn from_code(code: i8) -> Option<RobotStatus> {
        match code {
            0  => Some(RobotStatus::StandBy),
            1  => Some(RobotStatus::ScanCell),
            2  => Some(RobotStatus::PathFind),
            3  => Some(RobotStatus::MoveRobot),
            -1 => Some(RobotStatus::ShutDown),
            -2 => Some(RobotStatus::ExitLoop),
            _  => None,
        }
    }

    /// `true` once the robot is leaving or has left the run.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, RobotStatus::ShutDown | RobotStatus::ExitLoop)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RobotStatus::StandBy   => "stand_by",
            RobotStatus::ScanCell  => "scan_cell",
            RobotStatus::PathFind  => "path_find",
            RobotStatus::MoveRobot => "move_robot",
            RobotStatus::ShutDown  => "shut_down",
            RobotStatus::ExitLoop  => "exit_loop",
        }
    }
}

impl std::fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinator → robot message.  Delivered without waiting for the robot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotCommand {
    SetState(RobotStatus),
}
