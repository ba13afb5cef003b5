use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::UserId;
use crate::query::Searchable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Owner,
    Admin,
    Coach,
    #[default]
    Member,
}

/// A studio team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub avatar_path: Option<String>,
}

impl_record!(User, UserId, "users");

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.email.as_str()]
    }
}
