//! Signed-in user and team lookup.
//!
//! The Auth endpoint identifies the caller; the profile itself lives in the
//! `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use studio_core::ports::SessionPort;
use studio_core::records::{Record, User};
use studio_core::{BackendError, UserId};

use super::client::{read_json, send};
use super::SupabaseClient;

#[derive(Deserialize)]
struct AuthUser {
    id: UserId,
}

pub struct SupabaseSessionAdapter {
    client: Arc<SupabaseClient>,
}

impl SupabaseSessionAdapter {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionPort for SupabaseSessionAdapter {
    async fn current_user(&self) -> Result<User, BackendError> {
        let auth_url = self.client.url("auth/v1/user");
        let auth: AuthUser = read_json(send(self.client.request(Method::GET, &auth_url)).await?).await?;

        let builder = self
            .client
            .request(Method::GET, &self.client.rest_url(User::TABLE))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", auth.id))]);
        let mut rows: Vec<User> = read_json(send(builder).await?).await?;
        if rows.is_empty() {
            return Err(BackendError::NotFound);
        }
        Ok(rows.swap_remove(0))
    }

    async fn team_members(&self) -> Result<Vec<User>, BackendError> {
        let builder = self
            .client
            .request(Method::GET, &self.client.rest_url(User::TABLE))
            .query(&[("select", "*"), ("order", "full_name.asc")]);
        read_json(send(builder).await?).await
    }
}
