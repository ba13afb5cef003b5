//! The signed-in user and their team, as held by the session context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::records::{User, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_user: User,
    pub team: Vec<User>,
    pub loaded_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn member(&self, id: &UserId) -> Option<&User> {
        if &self.current_user.id == id {
            return Some(&self.current_user);
        }
        self.team.iter().find(|u| &u.id == id)
    }

    /// Owners and admins manage the studio's records and team.
    pub fn can_manage(&self) -> bool {
        matches!(self.current_user.role, UserRole::Owner | UserRole::Admin)
    }

    pub fn display_name(&self, id: &UserId) -> Option<&str> {
        self.member(id).map(|u| u.full_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: UserId::new(id),
            full_name: format!("User {id}"),
            email: format!("{id}@studio.test"),
            role,
            avatar_path: None,
        }
    }

    #[test]
    fn looks_up_current_user_and_team() {
        let snapshot = SessionSnapshot {
            current_user: user("me", UserRole::Admin),
            team: vec![user("a", UserRole::Coach), user("b", UserRole::Member)],
            loaded_at: Utc::now(),
        };
        assert_eq!(snapshot.display_name(&UserId::new("me")), Some("User me"));
        assert_eq!(snapshot.display_name(&UserId::new("b")), Some("User b"));
        assert!(snapshot.member(&UserId::new("zz")).is_none());
        assert!(snapshot.can_manage());
    }
}
