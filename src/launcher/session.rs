//! Session model: login, selected profile, and the launch phase machine

use std::fmt;

/// Game-mode profile offered by the profile selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    /// "Choose profile" sentinel shown before a real choice
    Placeholder,
    Survival,
    Creative,
    Adventure,
    Hardcore,
}

impl Profile {
    /// Selector order, placeholder first
    pub const ALL: [Profile; 5] = [
        Profile::Placeholder,
        Profile::Survival,
        Profile::Creative,
        Profile::Adventure,
        Profile::Hardcore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Profile::Placeholder => "Choose profile ▼",
            Profile::Survival => "Survival",
            Profile::Creative => "Creative",
            Profile::Adventure => "Adventure",
            Profile::Hardcore => "Hardcore",
        }
    }

    pub fn is_placeholder(self) -> bool {
        matches!(self, Profile::Placeholder)
    }

    /// Next entry in selector order, wrapping
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous entry in selector order, wrapping
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::Survival
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginState {
    #[default]
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

/// Launch sequence state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Idle,
    Checking,
    Launching,
    /// Running with the profile that was selected when it started
    Running { profile: Profile },
}

/// The launcher's whole session. Owned by the controller, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub login: LoginState,
    pub profile: Profile,
    pub phase: GamePhase,
}

impl SessionState {
    pub fn logged_in(&self) -> bool {
        self.login == LoginState::LoggedIn
    }

    pub fn game_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running { .. })
    }

    /// Launch sequence in progress but not yet running
    pub fn launching(&self) -> bool {
        matches!(self.phase, GamePhase::Checking | GamePhase::Launching)
    }
}
