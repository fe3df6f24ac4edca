//! Current-user store.

use tracing::debug;

use crate::model::User;
use crate::reactive::Observable;

/// Owns the session's authenticated user, if any.
///
/// `None` means unauthenticated or still loading; that is a normal state,
/// never an error. The fetch layer commits login, logout and profile
/// refreshes through the setters.
pub struct UserStore {
    current_user: Observable<Option<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            current_user: Observable::new(None),
        }
    }

    /// The current authenticated user (tracked read).
    pub fn current_user(&self) -> Option<User> {
        self.current_user.get()
    }

    /// Commit a fetched or refreshed user record.
    pub fn set_current_user(&self, user: User) {
        debug!(user_id = %user.id, "current user set");
        self.current_user.set(Some(user));
    }

    /// Clear the session user (logout).
    pub fn clear_current_user(&self) {
        debug!("current user cleared");
        self.current_user.set(None);
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
