// ── GymDesk facade ──
//
// Owns the API client and the current snapshot. Reads come from the
// snapshot; every successful mutation re-fetches it. A failed fetch
// leaves the previous snapshot in place.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;
use gymdesk_api::{AuthContext, GymClient, LoginSession, ResourceId};
use secrecy::SecretString;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::DeskConfig;
use crate::error::CoreError;
use crate::import::{ImportOutcome, ImportReport};
use crate::membership::CalendarDay;
use crate::model::{AdminProfile, EntityId, Member, Plan};
use crate::snapshot::Snapshot;
use crate::validation::{
    FormMode, MemberDraft, PlanDraft, RenewalDraft, check_import_path, validate_login,
};

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct GymDesk {
    inner: Arc<DeskInner>,
}

struct DeskInner {
    client: GymClient,
    snapshot: ArcSwap<Snapshot>,
}

impl GymDesk {
    /// Build a desk from configuration. Does no I/O.
    pub fn new(config: &DeskConfig) -> Result<Self, CoreError> {
        let auth = match &config.token {
            Some(token) => AuthContext::with_token(token.clone()),
            None => AuthContext::new(),
        };
        let client = GymClient::new(config.url.as_str(), &config.transport(), Arc::new(auth))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an already-built client.
    pub fn with_client(client: GymClient) -> Self {
        Self {
            inner: Arc::new(DeskInner {
                client,
                snapshot: ArcSwap::from_pointee(Snapshot::default()),
            }),
        }
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        self.inner.client.auth()
    }

    pub fn base_url(&self) -> &Url {
        self.inner.client.base_url()
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth().is_authenticated()
    }

    // ── Session ──────────────────────────────────────────────────

    pub async fn login(
        &self,
        identifier: &str,
        password: &SecretString,
    ) -> Result<LoginSession, CoreError> {
        let identifier = validate_login(identifier, password)?;
        Ok(self.inner.client.login(&identifier, password).await?)
    }

    /// Drop the token and the cached data. Returns `true` if a session was active.
    pub fn logout(&self) -> bool {
        self.inner.snapshot.store(Arc::new(Snapshot::default()));
        let was_active = self.inner.client.logout();
        if was_active {
            info!("logged out");
        }
        was_active
    }

    pub async fn profile(&self) -> Result<AdminProfile, CoreError> {
        Ok(self.inner.client.profile().await?.into())
    }

    // ── Snapshot ─────────────────────────────────────────────────

    /// The current snapshot. Cheap; never blocks.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.load_full()
    }

    /// Fetch members and plans together and publish them as one snapshot.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CoreError> {
        let client = &self.inner.client;
        let (members, plans) = tokio::try_join!(client.list_members(), client.list_plans())?;

        let snapshot = Arc::new(Snapshot {
            members: members.into_iter().map(Member::from).collect(),
            plans: plans.into_iter().map(Plan::from).collect(),
            fetched_at: Some(Utc::now()),
        });
        info!(
            members = snapshot.members.len(),
            plans = snapshot.plans.len(),
            "snapshot refreshed"
        );
        self.inner.snapshot.store(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "refresh after change failed; keeping previous data");
        }
    }

    // ── Members ──────────────────────────────────────────────────

    /// Create a member. A missing end date is filled from the plan length.
    pub async fn create_member(
        &self,
        draft: &MemberDraft,
        today: CalendarDay,
    ) -> Result<(), CoreError> {
        let mut draft = draft.clone();
        draft.fill_suggested_end_date(&self.snapshot().plans);
        let payload = draft.validate(FormMode::Create, today)?;

        debug!(name = %payload.name, "creating member");
        self.inner.client.create_member(&payload).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn update_member(
        &self,
        id: &EntityId,
        draft: &MemberDraft,
        today: CalendarDay,
    ) -> Result<(), CoreError> {
        let payload = draft.validate(FormMode::Edit, today)?;
        self.inner
            .client
            .update_member(&ResourceId::from(id), &payload)
            .await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_member(&self, id: &EntityId) -> Result<(), CoreError> {
        self.inner.client.delete_member(&ResourceId::from(id)).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn renew_member(
        &self,
        member: &Member,
        draft: &RenewalDraft,
    ) -> Result<(), CoreError> {
        let payload = draft.validate(member.end_date)?;
        self.inner
            .client
            .renew_member(&ResourceId::from(&member.id), &payload)
            .await?;
        info!(member_id = %member.id, new_end = %payload.new_end_date, "membership renewed");
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Upload a CSV roster. Backend-reported failures come back as a
    /// rejected report rather than an error.
    pub async fn import_members(&self, path: &Path) -> Result<ImportReport, CoreError> {
        check_import_path(path)?;

        let report = match self.inner.client.import_members(path).await {
            Ok(message) => ImportReport::from_message(message),
            Err(gymdesk_api::Error::Api { message, .. }) => ImportReport::rejected(message),
            Err(e) => return Err(e.into()),
        };

        info!(outcome = %report.outcome, "import finished");
        if report.outcome != ImportOutcome::Rejected {
            self.refresh_after_mutation().await;
        }
        Ok(report)
    }

    // ── Plans ────────────────────────────────────────────────────

    pub async fn create_plan(&self, draft: &PlanDraft) -> Result<(), CoreError> {
        let payload = draft.validate()?;
        self.inner.client.create_plan(&payload).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn update_plan(&self, id: &EntityId, draft: &PlanDraft) -> Result<(), CoreError> {
        let payload = draft.validate()?;
        self.inner
            .client
            .update_plan(&ResourceId::from(id), &payload)
            .await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_plan(&self, id: &EntityId) -> Result<(), CoreError> {
        self.inner.client.delete_plan(&ResourceId::from(id)).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }
}
