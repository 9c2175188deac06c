// Member endpoints (`/members`), including renewal and CSV import.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::GymClient;
use crate::error::Error;
use crate::types::{MemberPayload, MemberResponse, RenewPayload, ResourceId};

impl GymClient {
    pub async fn list_members(&self) -> Result<Vec<MemberResponse>, Error> {
        let members: Option<Vec<MemberResponse>> = self.get("members").await?;
        Ok(members.unwrap_or_default())
    }

    pub async fn create_member(&self, body: &MemberPayload) -> Result<(), Error> {
        self.post_no_response("members", body).await
    }

    pub async fn update_member(&self, id: &ResourceId, body: &MemberPayload) -> Result<(), Error> {
        self.put_no_response(&format!("members/{id}"), body).await
    }

    pub async fn delete_member(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&format!("members/{id}")).await
    }

    /// Extend a membership: `PUT /members/{id}/renew`.
    pub async fn renew_member(&self, id: &ResourceId, body: &RenewPayload) -> Result<(), Error> {
        self.put_no_response(&format!("members/{id}/renew"), body)
            .await
    }

    /// Upload a CSV file to `POST /members/import`.
    ///
    /// Returns the backend's human-readable result text unchanged.
    pub async fn import_members(&self, path: &Path) -> Result<String, Error> {
        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "members.csv".to_owned(), |n| n.to_string_lossy().into_owned());
        debug!(file = %file_name, bytes = contents.len(), "uploading member import");

        let part = Part::bytes(contents)
            .file_name(file_name)
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        self.post_multipart_text("members/import", form).await
    }
}
