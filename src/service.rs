// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Authenticated, authorized CRUD over registered schemas.
//!
//! [`AdminService`] is the transport-independent core of an admin surface.
//! An HTTP layer maps requests onto it:
//!
//! | Route | Operation | Permission |
//! |-------|-----------|------------|
//! | `POST {base}login/` | [`login`](AdminService::login) | none |
//! | `GET {base}{schema}s/` | [`list`](AdminService::list) | `view_{schema}` |
//! | `POST {base}{schema}s/` | [`create`](AdminService::create) | `add_{schema}` |
//! | `GET {base}{schema}s/{id}/` | [`get`](AdminService::get) | `view_{schema}` |
//! | `PATCH {base}{schema}s/{id}/` | [`update`](AdminService::update) | `change_{schema}` |
//! | `DELETE {base}{schema}s/{id}/` | [`delete`](AdminService::delete) | `delete_{schema}` |
//!
//! The session token goes through [`authenticate`](AdminService::authenticate)
//! to obtain a [`Principal`], which every other operation takes explicitly.
//! Writes run form coercion, then the schema's field mappers, then storage;
//! nothing reaches storage when an earlier stage fails.

use std::sync::Arc;

use vent_core::{
    Action, AuthError, Authorizer, Claims, CredentialAuthenticator, EntityData, GetOptions,
    QueryOptions, RecordData, SchemaConfig, SelectOption, SortDirection, TokenAuthenticator,
    TokenGenerator, ID_FIELD
};

use crate::{
    config::AdminConfig,
    error::{AdminError, AdminResult},
    form::coerce_form,
    principal::Principal,
    registry::SchemaRegistry
};

/// Navigation entry for one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLink {
    /// Schema name.
    pub name: String,
    /// URL of the record list.
    pub url:  String
}

/// Admin operations over a [`SchemaRegistry`].
#[derive(Clone)]
pub struct AdminService {
    config:              AdminConfig,
    registry:            Arc<SchemaRegistry>,
    authorizer:          Authorizer,
    credentials:         Arc<dyn CredentialAuthenticator>,
    token_generator:     Arc<dyn TokenGenerator>,
    token_authenticator: Arc<dyn TokenAuthenticator>
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("authorizer", &self.authorizer)
            .finish_non_exhaustive()
    }
}

impl AdminService {
    /// Start configuring a service.
    pub fn builder(config: AdminConfig, registry: impl Into<Arc<SchemaRegistry>>) -> AdminServiceBuilder {
        AdminServiceBuilder {
            config,
            registry: registry.into(),
            authorizer: Authorizer::default(),
            credentials: None,
            token_generator: None,
            token_authenticator: None
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Registered schemas.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Navigation entries sorted by schema name.
    pub fn navigation(&self) -> Vec<SchemaLink> {
        self.registry
            .iter()
            .map(|schema| SchemaLink {
                name: schema.name().to_owned(),
                url:  self.config.schema_url(schema)
            })
            .collect()
    }

    /// Exchange a login identifier and password for a session token.
    ///
    /// Unknown identifiers and wrong passwords fail alike with
    /// [`AdminError::InvalidCredentials`].
    pub async fn login(&self, identifier: &str, password: &str) -> AdminResult<String> {
        let users = self.user_schema()?;
        let mut found = users
            .client()
            .list(
                QueryOptions::new()
                    .filter(self.config.login_field.as_str(), identifier)
                    .limit(1)
            )
            .await
            .map_err(AdminError::storage)?;

        if found.len() != 1 {
            tracing::info!("login rejected: unknown identifier");
            return Err(AdminError::InvalidCredentials);
        }
        let user = found.remove(0);

        let Some(hash) = user
            .get(&self.config.password_field)
            .and_then(|v| v.string_value().ok())
        else {
            tracing::warn!(user = user.id(), field = %self.config.password_field, "user has no password hash");
            return Err(AdminError::InvalidCredentials);
        };

        match self.credentials.authenticate(password, hash) {
            Ok(()) => {}
            Err(AuthError::PasswordMismatch) => {
                tracing::info!(user = user.id(), "login rejected: wrong password");
                return Err(AdminError::InvalidCredentials);
            }
            Err(err) => return Err(err.into())
        }

        let claims = Claims::for_user(user.id(), self.config.token_ttl())?;
        let token = self.token_generator.generate(&claims)?;
        tracing::info!(user = user.id(), "login succeeded");
        Ok(token)
    }

    /// Resolve a session token into a principal.
    ///
    /// No token (or an empty one) yields [`Principal::Anonymous`]. A valid
    /// token yields the user with groups and permissions loaded.
    pub async fn authenticate(&self, token: Option<&str>) -> AdminResult<Principal> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(Principal::Anonymous);
        };
        let claims = self.token_authenticator.authenticate(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .user_schema()?
            .client()
            .get(user_id, GetOptions::with_edges(self.authorizer.edge_paths()))
            .await
            .map_err(AdminError::storage)?;
        tracing::debug!(user = user_id, "principal resolved");
        Ok(Principal::User(user))
    }

    /// Check that `principal` may perform `action` on `schema`.
    ///
    /// # Errors
    ///
    /// [`AdminError::Unauthenticated`] for an anonymous principal,
    /// [`AdminError::Forbidden`] for a missing permission.
    pub fn authorize(
        &self,
        principal: &Principal,
        schema: &SchemaConfig,
        action: Action
    ) -> AdminResult<()> {
        let Principal::User(user) = principal else {
            return Err(AdminError::Unauthenticated);
        };
        self.authorizer
            .authorize(user, [schema.permission(action)])
            .map_err(AdminError::from)
    }

    /// Records of a schema. Unordered queries are ordered by id.
    pub async fn list(
        &self,
        principal: &Principal,
        schema: &str,
        mut opts: QueryOptions
    ) -> AdminResult<Vec<EntityData>> {
        let schema = self.authorized(principal, schema, Action::View)?;
        self.registry.resolve_edges(schema.name(), &opts.with_edges)?;
        if opts.order_by.is_none() {
            opts = opts.order_by(ID_FIELD, SortDirection::Asc);
        }
        schema
            .client()
            .list(opts)
            .await
            .map_err(AdminError::storage)
    }

    /// One record with every declared relation loaded.
    pub async fn get(&self, principal: &Principal, schema: &str, id: i64) -> AdminResult<EntityData> {
        let schema = self.authorized(principal, schema, Action::View)?;
        schema
            .client()
            .get(id, GetOptions::with_edges(schema.edge_names()))
            .await
            .map_err(AdminError::storage)
    }

    /// Create a record from submitted form data.
    pub async fn create(
        &self,
        principal: &Principal,
        schema: &str,
        submitted: &RecordData
    ) -> AdminResult<EntityData> {
        let schema = self.authorized(principal, schema, Action::Add)?;
        let data = Self::prepare_write(schema, submitted)?;
        let created = schema
            .client()
            .create(data)
            .await
            .map_err(AdminError::storage)?;
        tracing::info!(schema = schema.name(), id = created.id(), actor = ?principal.id(), "record created");
        Ok(created)
    }

    /// Update a record from submitted form data.
    pub async fn update(
        &self,
        principal: &Principal,
        schema: &str,
        id: i64,
        submitted: &RecordData
    ) -> AdminResult<()> {
        let schema = self.authorized(principal, schema, Action::Change)?;
        let data = Self::prepare_write(schema, submitted)?;
        schema
            .client()
            .update(id, data)
            .await
            .map_err(AdminError::storage)?;
        tracing::info!(schema = schema.name(), id, actor = ?principal.id(), "record updated");
        Ok(())
    }

    /// Delete a record.
    pub async fn delete(&self, principal: &Principal, schema: &str, id: i64) -> AdminResult<()> {
        let schema = self.authorized(principal, schema, Action::Delete)?;
        schema
            .client()
            .delete(id)
            .await
            .map_err(AdminError::storage)?;
        tracing::info!(schema = schema.name(), id, actor = ?principal.id(), "record deleted");
        Ok(())
    }

    /// Choices for a relation field of `schema`.
    pub async fn relation_options(
        &self,
        principal: &Principal,
        schema: &str,
        field: &str
    ) -> AdminResult<Vec<SelectOption>> {
        let schema = self.authorized(principal, schema, Action::View)?;
        let relation = schema
            .get_edge(field)
            .ok_or_else(|| AdminError::UnknownField {
                schema: schema.name().to_owned(),
                field:  field.to_owned()
            })?;
        schema
            .client()
            .relation_options(relation)
            .await
            .map_err(AdminError::storage)
    }

    fn authorized(
        &self,
        principal: &Principal,
        schema: &str,
        action: Action
    ) -> AdminResult<&Arc<SchemaConfig>> {
        let schema = self.registry.require(schema)?;
        self.authorize(principal, schema, action)?;
        Ok(schema)
    }

    fn prepare_write(schema: &SchemaConfig, submitted: &RecordData) -> AdminResult<RecordData> {
        let mut data = coerce_form(schema, submitted)?;
        schema.apply_field_mappers(&mut data)?;
        Ok(data)
    }

    fn user_schema(&self) -> AdminResult<&Arc<SchemaConfig>> {
        self.registry.require(&self.config.user_schema)
    }
}

/// Builder returned by [`AdminService::builder`].
pub struct AdminServiceBuilder {
    config:              AdminConfig,
    registry:            Arc<SchemaRegistry>,
    authorizer:          Authorizer,
    credentials:         Option<Arc<dyn CredentialAuthenticator>>,
    token_generator:     Option<Arc<dyn TokenGenerator>>,
    token_authenticator: Option<Arc<dyn TokenAuthenticator>>
}

impl AdminServiceBuilder {
    /// Password checker used by [`AdminService::login`].
    #[must_use]
    pub fn credentials(mut self, credentials: impl CredentialAuthenticator + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// One service that both issues and verifies tokens.
    #[must_use]
    pub fn tokens<T>(mut self, tokens: T) -> Self
    where
        T: TokenGenerator + TokenAuthenticator + 'static
    {
        let tokens = Arc::new(tokens);
        let generator: Arc<dyn TokenGenerator> = tokens.clone();
        let authenticator: Arc<dyn TokenAuthenticator> = tokens;
        self.token_generator = Some(generator);
        self.token_authenticator = Some(authenticator);
        self
    }

    /// Separate token issuer and verifier.
    #[must_use]
    pub fn token_services(
        mut self,
        generator: Arc<dyn TokenGenerator>,
        authenticator: Arc<dyn TokenAuthenticator>
    ) -> Self {
        self.token_generator = Some(generator);
        self.token_authenticator = Some(authenticator);
        self
    }

    /// Permission graph vocabulary.
    #[must_use]
    pub fn authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Argon2 credentials and HS256 tokens signed with `secret`, valid for
    /// the configured lifetime.
    #[cfg(feature = "auth")]
    #[must_use]
    pub fn default_auth(self, secret: impl vent_core::SecretProvider + 'static) -> Self {
        let ttl = self.config.token_ttl();
        self.credentials(vent_auth::Argon2Credentials::default())
            .tokens(vent_auth::JwtTokens::new(secret).with_ttl(ttl))
    }

    /// Validate and assemble the service.
    ///
    /// # Errors
    ///
    /// [`AdminError::Config`] for invalid settings or a missing auth
    /// service, [`AdminError::UnknownSchema`] when the user schema or a
    /// relation target is not registered.
    pub fn build(self) -> AdminResult<AdminService> {
        self.config.validate()?;
        self.registry.require(&self.config.user_schema)?;
        self.registry.check_relations()?;

        let missing = |what: &str| AdminError::Config(format!("{what} is not configured"));
        let service = AdminService {
            credentials: self.credentials.ok_or_else(|| missing("credential authenticator"))?,
            token_generator: self.token_generator.ok_or_else(|| missing("token generator"))?,
            token_authenticator: self
                .token_authenticator
                .ok_or_else(|| missing("token authenticator"))?,
            config: self.config,
            registry: self.registry,
            authorizer: self.authorizer
        };
        tracing::info!(
            base_path = %service.config.base_path,
            schemas = service.registry.len(),
            "admin service ready"
        );
        Ok(service)
    }
}
