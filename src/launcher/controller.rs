//! Launcher controller
//!
//! Owns the [`SessionState`] and turns the five launcher controls into state
//! transitions and timed follow-ups. Every follow-up is a cancellable timer:
//! aborting a login or logging out mid-launch cancels the pending step, so a
//! stale completion can never overwrite newer state.
//!
//! Notifications are not rendered here. They collect in an outbox stamped
//! with the virtual time they were raised and the app drains them into the
//! toast queue.

use std::time::Duration;
use tracing::{debug, info};

use crate::config::Timings;
use crate::launcher::scheduler::{Scheduler, TimerHandle};
use crate::launcher::session::{GamePhase, LoginState, Profile, SessionState};
use crate::ui::notification::Notification;

/// Input from one of the launcher controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    LoginClicked,
    StartGameClicked,
    ProfileSelected(Profile),
    SettingsClicked,
    DiscordClicked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ControllerTimer {
    LoginComplete,
    FilesChecked,
    LaunchComplete,
    GameExited,
}

pub struct LauncherController {
    session: SessionState,
    timings: Timings,
    player_name: String,
    scheduler: Scheduler<ControllerTimer>,
    login_timer: Option<TimerHandle>,
    game_timer: Option<TimerHandle>,
    outbox: Vec<(Duration, Notification)>,
}

impl LauncherController {
    /// Create a logged-out, idle controller
    pub fn new(timings: Timings, player_name: impl Into<String>) -> Self {
        Self {
            session: SessionState::default(),
            timings,
            player_name: player_name.into(),
            scheduler: Scheduler::new(),
            login_timer: None,
            game_timer: None,
            outbox: Vec::new(),
        }
    }

    /// Current session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Handle a control event
    pub fn handle(&mut self, event: UiEvent) {
        debug!("Launcher event: {:?}", event);
        match event {
            UiEvent::LoginClicked => self.toggle_login(),
            UiEvent::StartGameClicked => self.start_game(),
            UiEvent::ProfileSelected(profile) => self.select_profile(profile),
            UiEvent::SettingsClicked => {
                self.notify(Notification::info("Settings").message("Settings are under construction..."));
            }
            UiEvent::DiscordClicked => {
                self.notify(Notification::info("Discord").message("Opening Discord..."));
            }
        }
    }

    /// Advance the controller clock, firing due timers in order
    pub fn advance(&mut self, delta: Duration) {
        let target = self.scheduler.now() + delta;
        while let Some(timer) = self.scheduler.next_due(target) {
            self.on_timer(timer);
        }
        self.scheduler.settle(target);
    }

    /// Cancel everything pending and return to the initial session
    pub fn reset(&mut self) {
        debug!("Dropping {} pending controller timers", self.scheduler.pending());
        self.scheduler.clear();
        self.login_timer = None;
        self.game_timer = None;
        self.session = SessionState::default();
        self.outbox.clear();
        info!("Launcher session reset");
    }

    /// Take notifications raised since the last drain
    pub fn drain_notifications(&mut self) -> Vec<(Duration, Notification)> {
        std::mem::take(&mut self.outbox)
    }

    fn notify(&mut self, notification: Notification) {
        let at = self.scheduler.now();
        self.outbox.push((at, notification));
    }

    fn toggle_login(&mut self) {
        match self.session.login {
            LoginState::LoggedOut => {
                info!("Logging in as {}", self.player_name);
                self.session.login = LoginState::LoggingIn;
                self.login_timer = Some(
                    self.scheduler
                        .after(self.timings.login_delay(), ControllerTimer::LoginComplete),
                );
            }
            LoginState::LoggingIn => {
                if let Some(handle) = self.login_timer.take() {
                    self.scheduler.cancel(handle);
                }
                info!("Login cancelled");
                self.session.login = LoginState::LoggedOut;
                self.notify(Notification::info("Login cancelled"));
            }
            LoginState::LoggedIn => {
                info!("Logged out");
                self.session.login = LoginState::LoggedOut;
                self.notify(Notification::info("Logged out"));

                if self.session.launching() {
                    if let Some(handle) = self.game_timer.take() {
                        self.scheduler.cancel(handle);
                    }
                    self.session.phase = GamePhase::Idle;
                    self.notify(
                        Notification::warning("Launch cancelled")
                            .message("You logged out before the game started"),
                    );
                }
            }
        }
    }

    fn start_game(&mut self) {
        if !self.session.logged_in() {
            self.notify(Notification::warning("Please log in before starting the game!"));
            return;
        }

        match self.session.phase {
            GamePhase::Idle => {}
            GamePhase::Running { .. } => {
                self.notify(Notification::info("The game is already running!"));
                return;
            }
            GamePhase::Checking | GamePhase::Launching => {
                self.notify(Notification::info("The game is already starting!"));
                return;
            }
        }

        info!("Launch requested with profile {}", self.session.profile);
        self.session.phase = GamePhase::Checking;
        self.game_timer = Some(
            self.scheduler
                .after(self.timings.check_files(), ControllerTimer::FilesChecked),
        );
    }

    fn select_profile(&mut self, profile: Profile) {
        self.session.profile = profile;
        if !profile.is_placeholder() {
            self.notify(Notification::info(format!("Selected profile: {}", profile)));
        }
    }

    fn on_timer(&mut self, timer: ControllerTimer) {
        debug!("Controller timer fired: {:?}", timer);
        match timer {
            ControllerTimer::LoginComplete => {
                self.login_timer = None;
                if self.session.login == LoginState::LoggingIn {
                    self.session.login = LoginState::LoggedIn;
                    info!("Login complete");
                    self.notify(Notification::success("Login successful! Welcome back!"));
                }
            }
            ControllerTimer::FilesChecked => {
                if self.session.phase == GamePhase::Checking {
                    self.session.phase = GamePhase::Launching;
                    debug!("Game files checked, launching");
                    self.game_timer = Some(
                        self.scheduler
                            .after(self.timings.launch(), ControllerTimer::LaunchComplete),
                    );
                }
            }
            ControllerTimer::LaunchComplete => {
                if self.session.phase == GamePhase::Launching && self.session.logged_in() {
                    let profile = self.session.profile;
                    self.session.phase = GamePhase::Running { profile };
                    info!("Game running with profile {}", profile);
                    self.notify(Notification::success("Game launched successfully!"));
                    self.game_timer = Some(
                        self.scheduler
                            .after(self.timings.session(), ControllerTimer::GameExited),
                    );
                }
            }
            ControllerTimer::GameExited => {
                self.game_timer = None;
                if self.session.game_running() {
                    self.session.phase = GamePhase::Idle;
                    info!("Game exited");
                    self.notify(Notification::info("The game has exited"));
                }
            }
        }
    }

    // ── Display accessors ───────────────────────────────────────────────────

    /// Text on the login control
    pub fn login_label(&self) -> String {
        match self.session.login {
            LoginState::LoggedOut => "Log in".to_string(),
            LoginState::LoggingIn => "Logging in...".to_string(),
            LoginState::LoggedIn => self.player_name.clone(),
        }
    }

    /// Text on the start control
    pub fn start_label(&self) -> &'static str {
        match self.session.phase {
            GamePhase::Idle => "Start game",
            GamePhase::Checking | GamePhase::Launching => "Starting...",
            GamePhase::Running { .. } => "Game running",
        }
    }

    /// Text for the version/status line
    pub fn status_line(&self) -> String {
        match self.session.phase {
            GamePhase::Idle => "Ready to play".to_string(),
            GamePhase::Checking => "Checking game files...".to_string(),
            GamePhase::Launching => "Launching Minecraft...".to_string(),
            GamePhase::Running { profile } => format!("{} - running", profile),
        }
    }

    /// Start control accepts clicks only while idle
    pub fn start_enabled(&self) -> bool {
        self.session.phase == GamePhase::Idle
    }
}
