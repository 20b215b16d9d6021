use prakriti_core::model::{AdminAccount, User};

/// Who is currently signed in. The app holds at most one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    User(User),
    Admin(AdminAccount),
}

impl Session {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin(_))
    }

    /// The signed-in user, if this is a user session.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::User(user) => Some(user),
            Session::Admin(_) => None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Session::User(user) => user.name(),
            Session::Admin(admin) => admin.name(),
        }
    }
}
