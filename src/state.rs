use std::fmt;

/// The round's finite state machine. Owned exclusively by the engine and
/// handed out by `&mut` only during the update phase of a tick.
///
/// ```text
/// Init --start--> GameLoop
/// GameLoop --self/boundary collision--> Dead
/// Dead --lose overlay shown--> ShowScore
/// ShowScore --quit--> Exit
/// GameLoop --quit--> Exit
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RoundState {
    Init,
    GameLoop,
    Dead,
    ShowScore,
    Exit,
}

impl RoundState {
    /// Dead is terminal for the round: a new round reconstructs the snake,
    /// the food and this state from scratch rather than resuming.
    pub fn transition(&mut self, new_state: RoundState) {
        tracing::info!(old = %self, new = %new_state, "round state change");
        *self = new_state;
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundState::Init => "Initialization",
            RoundState::GameLoop => "Game Loop",
            RoundState::Dead => "Dead Snake",
            RoundState::ShowScore => "Show Score",
            RoundState::Exit => "Exiting",
        };
        f.write_str(name)
    }
}
