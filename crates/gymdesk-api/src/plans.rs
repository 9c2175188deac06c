// Plan endpoints (`/plans`).

use crate::client::GymClient;
use crate::error::Error;
use crate::types::{PlanPayload, PlanResponse, ResourceId};

impl GymClient {
    pub async fn list_plans(&self) -> Result<Vec<PlanResponse>, Error> {
        // Some backends answer an empty collection with `null`.
        let plans: Option<Vec<PlanResponse>> = self.get("plans").await?;
        Ok(plans.unwrap_or_default())
    }

    pub async fn create_plan(&self, body: &PlanPayload) -> Result<(), Error> {
        self.post_no_response("plans", body).await
    }

    pub async fn update_plan(&self, id: &ResourceId, body: &PlanPayload) -> Result<(), Error> {
        self.put_no_response(&format!("plans/{id}"), body).await
    }

    pub async fn delete_plan(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&format!("plans/{id}")).await
    }
}
