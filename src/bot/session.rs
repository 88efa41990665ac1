//! Per-user session state. One entry per user, created lazily on first
//! contact, alive for the process lifetime. DashMap gives per-shard
//! locking so two users' messages never contend on each other's state.

use dashmap::DashMap;

/// What the bot is waiting for from this user, if anything. A single
/// enum instead of independent flags: two inputs can never be pending
/// at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AwaitingInput {
    #[default]
    None,
    TokenAddress,
    WithdrawAmount,
}

#[derive(Debug, Clone)]
pub struct UserSession {
    pub wallet: String,
    pub balance_sol: f64,
    pub private_key: String,
    pub awaiting: AwaitingInput,
    pub withdraw_amount: Option<String>,
}

pub struct SessionStore {
    sessions: DashMap<i64, UserSession>,
    default_wallet: String,
    default_private_key: String,
}

impl SessionStore {
    pub fn new(default_wallet: String, default_private_key: String) -> Self {
        Self {
            sessions: DashMap::new(),
            default_wallet,
            default_private_key,
        }
    }

    fn default_session(&self) -> UserSession {
        UserSession {
            wallet: self.default_wallet.clone(),
            balance_sol: 0.0,
            private_key: self.default_private_key.clone(),
            awaiting: AwaitingInput::None,
            withdraw_amount: None,
        }
    }

    /// Runs `f` against the user's session, creating it first if this is
    /// the user's first contact. The shard lock is held for the duration
    /// of `f`, so reads and updates within one call are atomic.
    pub fn with_session<T>(&self, user_id: i64, f: impl FnOnce(&mut UserSession) -> T) -> T {
        let mut entry = self
            .sessions
            .entry(user_id)
            .or_insert_with(|| self.default_session());
        f(entry.value_mut())
    }

    pub fn set_awaiting(&self, user_id: i64, awaiting: AwaitingInput) {
        self.with_session(user_id, |s| s.awaiting = awaiting);
    }

    /// Reads and clears the pending-input state in one locked step, so a
    /// second message from the same user cannot observe a stale flag
    /// while the first is still being handled.
    pub fn take_awaiting(&self, user_id: i64) -> AwaitingInput {
        self.with_session(user_id, |s| std::mem::take(&mut s.awaiting))
    }

    pub fn wallet(&self, user_id: i64) -> String {
        self.with_session(user_id, |s| s.wallet.clone())
    }

    pub fn set_balance(&self, user_id: i64, balance_sol: f64) {
        self.with_session(user_id, |s| s.balance_sol = balance_sol);
    }

    pub fn private_key(&self, user_id: i64) -> String {
        self.with_session(user_id, |s| s.private_key.clone())
    }

    pub fn set_private_key(&self, user_id: i64, key: String) {
        self.with_session(user_id, |s| s.private_key = key);
    }

    pub fn set_withdraw_amount(&self, user_id: i64, amount: String) {
        self.with_session(user_id, |s| s.withdraw_amount = Some(amount));
    }
}
