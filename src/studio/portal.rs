use std::time::{SystemTime, UNIX_EPOCH};

use futures::stream::{BoxStream, StreamExt};
use tracing::{info, warn};

use crate::core::TextGenerator;

use super::auth::{AuthService, Session};
use super::catalogue::{
    self, Collection, Lead, NewLead, NewProject, Project, Service, decode_or_defaults,
    decode_snapshot,
};
use super::error::StudioError;
use super::prompts;
use super::store::{CollectionPath, DocumentId, DocumentStore};

const DEFAULT_APP_ID: &str = "sanora-interior-organic";
const APP_ID_ENV_VAR: &str = "SANORA_APP_ID";
const AUTH_TOKEN_ENV_VAR: &str = "SANORA_AUTH_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    /// Namespace under `artifacts/` that holds this site's collections
    pub app_id: String,
    /// Token for a non-anonymous session; anonymous sign-in when absent
    pub auth_token: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            auth_token: None,
        }
    }
}

impl StudioConfig {
    /// Read `SANORA_APP_ID` and `SANORA_AUTH_TOKEN`, keeping defaults for unset or blank values.
    pub fn from_env() -> Self {
        let non_blank = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v: &String| !v.trim().is_empty())
        };
        Self {
            app_id: non_blank(APP_ID_ENV_VAR).unwrap_or_else(|| DEFAULT_APP_ID.to_string()),
            auth_token: non_blank(AUTH_TOKEN_ENV_VAR),
        }
    }

    pub fn with_app_id(mut self, app_id: String) -> Self {
        self.app_id = app_id;
        self
    }

    pub fn with_auth_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }
}

/// Application core behind the public site and the studio portal.
pub struct Studio<S, A, G> {
    store: S,
    auth: A,
    generator: G,
    config: StudioConfig,
}

impl<S, A, G> Studio<S, A, G>
where
    S: DocumentStore,
    A: AuthService,
    G: TextGenerator,
{
    pub fn new(store: S, auth: A, generator: G, config: StudioConfig) -> Self {
        Self {
            store,
            auth,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection_path(&self, collection: Collection) -> CollectionPath {
        CollectionPath::public_data(&self.config.app_id, collection)
    }

    /// Token sign-in when a non-blank token is configured, anonymous otherwise.
    pub async fn sign_in(&self) -> Result<Session, StudioError> {
        let session = match self.config.auth_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => self.auth.sign_in_with_token(token).await?,
            _ => self.auth.sign_in_anonymously().await?,
        };
        Ok(session)
    }

    fn require_session(&self) -> Result<Session, StudioError> {
        self.auth.current_session().ok_or(StudioError::NotSignedIn)
    }

    /// Portfolio projects, or the built-in catalogue while none are published.
    pub async fn projects(&self) -> Result<BoxStream<'static, Vec<Project>>, StudioError> {
        self.require_session()?;
        let snapshots = self
            .store
            .subscribe(&self.collection_path(Collection::Projects))
            .await?;
        Ok(snapshots
            .map(|snapshot| decode_or_defaults(&snapshot, catalogue::default_projects))
            .boxed())
    }

    pub async fn services(&self) -> Result<BoxStream<'static, Vec<Service>>, StudioError> {
        self.require_session()?;
        let snapshots = self
            .store
            .subscribe(&self.collection_path(Collection::Services))
            .await?;
        Ok(snapshots
            .map(|snapshot| decode_or_defaults(&snapshot, catalogue::default_services))
            .boxed())
    }

    pub async fn leads(&self) -> Result<BoxStream<'static, Vec<Lead>>, StudioError> {
        self.require_session()?;
        let snapshots = self
            .store
            .subscribe(&self.collection_path(Collection::Leads))
            .await?;
        Ok(snapshots
            .map(|snapshot| decode_snapshot::<Lead>(&snapshot))
            .boxed())
    }

    #[tracing::instrument(
        name = "add_project",
        skip(self, project),
        fields(name = %project.name),
        err
    )]
    pub async fn add_project(&self, project: NewProject) -> Result<DocumentId, StudioError> {
        self.require_session()?;
        project.validate().map_err(StudioError::InvalidRecord)?;

        let fields = catalogue::to_fields(&project, "createdAt", now_millis())
            .map_err(StudioError::InvalidRecord)?;
        let id = self
            .store
            .add(&self.collection_path(Collection::Projects), fields)
            .await?;
        info!(id = %id, "project published");
        Ok(id)
    }

    #[tracing::instrument(name = "submit_lead", skip(self, lead), err)]
    pub async fn submit_lead(&self, lead: NewLead) -> Result<DocumentId, StudioError> {
        self.require_session()?;
        lead.validate().map_err(StudioError::InvalidRecord)?;

        let fields = catalogue::to_fields(&lead, "timestamp", now_millis())
            .map_err(StudioError::InvalidRecord)?;
        let id = self
            .store
            .add(&self.collection_path(Collection::Leads), fields)
            .await?;
        info!(id = %id, "consultation request received");
        Ok(id)
    }

    #[tracing::instrument(name = "delete_record", skip(self), err)]
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), StudioError> {
        self.require_session()?;
        self.store
            .delete(&self.collection_path(collection), id)
            .await?;
        Ok(())
    }

    /// Draft a design concept from a visitor's brief.
    ///
    /// A blank brief is rejected before any request is made.
    pub async fn draft_concept(&self, brief: &str) -> Result<Option<String>, StudioError> {
        if brief.trim().is_empty() {
            return Err(StudioError::EmptyBrief);
        }
        self.generate(prompts::vision_concept(brief)).await
    }

    pub async fn suggest_blurb(&self, project: &Project) -> Result<Option<String>, StudioError> {
        self.generate(prompts::project_blurb(project)).await
    }

    async fn generate(
        &self,
        prompt: crate::core::GenerationPrompt,
    ) -> Result<Option<String>, StudioError> {
        match self.generator.generate_text(&prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(error = %e, "generation failed");
                Err(e.into())
            }
        }
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
