//! The single record the UI renders from

use goldrush_domain::{SessionMode, Snapshot, UserStatus};

/// Where the view composer's state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Startup identity token is being validated
    Checking,
    LoggedOut,
    AdminActive,
    UserActive,
}

/// Which top-level view to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Admin,
    User,
}

/// Progress of the replay animation.
///
/// Independent of [`ViewState::replay_active`]: a finished replay keeps live
/// updates suspended until the user resumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayStatus {
    #[default]
    Idle,
    /// `frame` frames of `total` have been shown
    Playing { frame: usize, total: usize },
    Finished { total: usize },
}

/// Everything the client displays.
///
/// Owned by the view composer; the live sync loop and the replay engine only
/// write into it through the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub checking: bool,
    pub mode: SessionMode,
    /// Displayed world (admin)
    pub world: Option<Snapshot>,
    /// Displayed participant status (user)
    pub status: Option<UserStatus>,
    /// Suppresses live updates, whether or not a replay is animating
    pub replay_active: bool,
    pub replay: ReplayStatus,
    /// Inline validation message for the login form
    pub login_error: Option<String>,
    /// Most recent transport failure, kept for diagnostics only
    pub last_error: Option<String>,
}

impl ViewState {
    /// Fresh client state: every load starts by checking for an identity token.
    pub fn new() -> Self {
        Self {
            checking: true,
            mode: SessionMode::Unresolved,
            world: None,
            status: None,
            replay_active: false,
            replay: ReplayStatus::Idle,
            login_error: None,
            last_error: None,
        }
    }

    /// State after logout or a failed startup check
    pub fn logged_out() -> Self {
        Self {
            checking: false,
            ..Self::new()
        }
    }

    pub fn phase(&self) -> Phase {
        if self.checking {
            return Phase::Checking;
        }
        match self.mode {
            SessionMode::Unresolved => Phase::LoggedOut,
            SessionMode::Admin { .. } => Phase::AdminActive,
            SessionMode::User { .. } => Phase::UserActive,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.phase() {
            Phase::Checking => Screen::Loading,
            Phase::LoggedOut => Screen::Login,
            Phase::AdminActive if self.world.is_some() => Screen::Admin,
            Phase::UserActive if self.status.is_some() => Screen::User,
            Phase::AdminActive | Phase::UserActive => Screen::Loading,
        }
    }

    /// An identity is set but its first payload has not arrived.
    ///
    /// The loading screen must still offer logout here: a wrong credential
    /// never produces data.
    pub fn awaiting_data(&self) -> bool {
        matches!(self.phase(), Phase::AdminActive | Phase::UserActive)
            && self.screen() == Screen::Loading
    }

    /// Live sync may run only with an identity and no replay
    pub fn wants_live_sync(&self) -> bool {
        !self.checking && self.mode.is_active() && !self.replay_active
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
