use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use studio_core::onboarding::OnboardingSubmission;
use studio_core::ports::OnboardingSubmissionPort;
use studio_core::{BackendError, OrganizationId};
use tracing::info;

use super::client::{read_json, send};
use super::SupabaseClient;

pub const COMPLETE_ONBOARDING_RPC: &str = "rpc/complete_onboarding";

/// The RPC may return the bare id or a row holding it.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedOrganization {
    Id(OrganizationId),
    Row { organization_id: OrganizationId },
    Rows(Vec<CreatedOrganizationRow>),
}

#[derive(Deserialize)]
struct CreatedOrganizationRow {
    organization_id: OrganizationId,
}

/// Writes the whole wizard draft in one call.
pub struct SupabaseOnboardingSubmitter {
    client: Arc<SupabaseClient>,
}

impl SupabaseOnboardingSubmitter {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OnboardingSubmissionPort for SupabaseOnboardingSubmitter {
    async fn submit(
        &self,
        submission: &OnboardingSubmission,
    ) -> Result<OrganizationId, BackendError> {
        let url = self.client.rest_url(COMPLETE_ONBOARDING_RPC);
        let builder = self.client.request(Method::POST, &url).json(submission);
        let created: CreatedOrganization = read_json(send(builder).await?).await?;

        let organization_id = match created {
            CreatedOrganization::Id(id) | CreatedOrganization::Row { organization_id: id } => id,
            CreatedOrganization::Rows(rows) => rows
                .into_iter()
                .next()
                .map(|row| row.organization_id)
                .ok_or_else(|| BackendError::Decode("onboarding returned no organization".into()))?,
        };

        info!(organization_id = %organization_id, "onboarding submitted");
        Ok(organization_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn submission() -> OnboardingSubmission {
        OnboardingSubmission {
            owner_full_name: "Ana Reyes".into(),
            owner_email: "ana@reyes-interiors.com".into(),
            owner_phone: None,
            owner_job_title: Some("Principal".into()),
            organization_name: Some("Reyes Interiors".into()),
            organization_website: None,
            organization_email: None,
            organization_phone: None,
            locations: Vec::new(),
            teams: Vec::new(),
            staff: Vec::new(),
        }
    }

    fn submitter(server: &Server) -> SupabaseOnboardingSubmitter {
        let client = SupabaseClient::new(server.url(), "anon-key").unwrap();
        SupabaseOnboardingSubmitter::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_submit_posts_flat_draft_and_reads_bare_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/rpc/complete_onboarding")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "owner_full_name": "Ana Reyes",
                "organization_name": "Reyes Interiors"
            })))
            .with_status(200)
            .with_body(r#""org-42""#)
            .create_async()
            .await;

        let id = submitter(&server).submit(&submission()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(id, OrganizationId::new("org-42"));
    }

    #[tokio::test]
    async fn test_submit_reads_row_shaped_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/v1/rpc/complete_onboarding")
            .with_status(200)
            .with_body(r#"[{"organization_id":"org-7"}]"#)
            .create_async()
            .await;

        let id = submitter(&server).submit(&submission()).await.unwrap();

        assert_eq!(id, OrganizationId::new("org-7"));
    }

    #[tokio::test]
    async fn test_submit_surfaces_rejection_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/v1/rpc/complete_onboarding")
            .with_status(400)
            .with_body(r#"{"message":"organization name taken"}"#)
            .create_async()
            .await;

        let err = submitter(&server).submit(&submission()).await.unwrap_err();

        assert_eq!(
            err,
            BackendError::Rejected {
                status: 400,
                message: "organization name taken".into()
            }
        );
    }
}
