//! Behaviour switches for a robot.

use std::time::Duration;

/// Which protocol features a robot uses.
///
/// The flags are independent; the presets name the common combinations.
///
/// | Preset                                   | reservations | collision checks |
/// |------------------------------------------|--------------|------------------|
/// | [`informed`](Self::informed)             | yes          | no               |
/// | [`uninformed`](Self::uninformed)         | no           | no               |
/// | `informed().with_collision_checks()`     | yes          | yes              |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobotOptions {
    /// Reserve each frontier target before walking to it, and learn from the
    /// coordinator's map when the target turns out to be explored.
    pub reservations: bool,
    /// Ask the coordinator before every step whether the next cell is free.
    pub collision_checks: bool,
    /// Pause before every step, pacing the swarm like a turn-based
    /// simulation.
    pub step_delay: Option<Duration>,
}

impl RobotOptions {
    pub fn informed() -> Self {
        RobotOptions { reservations: true, collision_checks: false, step_delay: None }
    }

    /// Explores on its own knowledge only; never reserves.
    pub fn uninformed() -> Self {
        RobotOptions { reservations: false, collision_checks: false, step_delay: None }
    }

    pub fn with_collision_checks(mut self) -> Self {
        self.collision_checks = true;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = Some(delay);
        self
    }
}

impl Default for RobotOptions {
    fn default() -> Self {
        Self::informed()
    }
}
