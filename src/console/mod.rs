//! The console shell: wires the token store, HTTP client, session store and
//! route guard around one durable storage, and exposes the views and forms the
//! CLI drives. Protected views run through [`RouteGuard`] first and then mount
//! the layout, which loads the current profile like the browser layout does on
//! mount.

pub mod article;
pub mod login;
pub mod routes;

use crate::{
    api::{ApiClient, ApiError},
    config::AppConfig,
    guard::{Guarded, RouteGuard},
    navigation::{History, Navigator, HOME_PATH, LOGIN_PATH},
    session::{SessionStore, TokenStore, UserProfile},
    storage::{FileStorage, Storage},
};
use article::{ArticlePage, ArticleQuery, Channel, PublishForm};
use login::LoginForm;
use routes::Route;
use std::{future::Future, sync::Arc};
use tracing::{debug, instrument};

/// Body of a protected view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Articles(ArticlePage),
    Publish { channels: Vec<Channel> },
}

/// A protected view mounted inside the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub profile: UserProfile,
    pub content: Content,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    Page(Page),
    NotFound(String),
}

#[derive(Debug)]
pub struct Console {
    history: Arc<History>,
    tokens: TokenStore,
    api: ApiClient,
    session: SessionStore,
    guard: RouteGuard,
}

impl Console {
    /// Opens a console over the configured storage file.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let storage = FileStorage::new(&config.storage_path);
        Self::with_storage(config, Arc::new(storage))
    }

    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn with_storage(config: &AppConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let history = Arc::new(History::new(HOME_PATH));
        let tokens = TokenStore::new(storage);
        let api = ApiClient::new(config, tokens.clone(), history.clone())?;
        let session = SessionStore::new(api.clone());
        history.on_reload(session.reload_hook());
        let guard = RouteGuard::new(tokens.clone(), history.clone());

        Ok(Self {
            history,
            tokens,
            api,
            session,
            guard,
        })
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.history.location()
    }

    /// Navigates to `path` and renders it. Protected views redirect to the
    /// login view when no token is stored, without touching the network.
    ///
    /// # Errors
    /// Errors from loading the view's data propagate unchanged.
    #[instrument(skip(self))]
    pub async fn open(&self, path: &str) -> Result<Guarded<View>, ApiError> {
        let Some(route) = Route::resolve(path) else {
            debug!("no route for {}", path);
            return Ok(Guarded::Rendered(View::NotFound(path.to_string())));
        };

        if !route.is_protected() {
            self.history.navigate(route.path());
            return Ok(Guarded::Rendered(View::Login));
        }

        match self.guard.render(|| route) {
            Guarded::Redirected(to) => Ok(Guarded::Redirected(to)),
            Guarded::Rendered(route) => {
                self.history.navigate(route.path());
                let page = self.mount(route).await?;
                Ok(Guarded::Rendered(View::Page(page)))
            }
        }
    }

    async fn mount(&self, route: Route) -> Result<Page, ApiError> {
        let profile = self.session.fetch_user_info().await?;
        let content = match route {
            Route::Publish => Content::Publish {
                channels: article::fetch_channels(&self.api).await?,
            },
            Route::Home | Route::Article | Route::Login => {
                Content::Articles(article::fetch_articles(&self.api, ArticleQuery::default()).await?)
            }
        };

        Ok(Page {
            route,
            profile,
            content,
        })
    }

    /// Validates the form, logs in and moves to the home view.
    ///
    /// # Errors
    /// `Validation` for a malformed form; login errors propagate unchanged and
    /// leave the console on its current view.
    pub async fn submit_login(&self, form: &LoginForm) -> Result<(), ApiError> {
        let request = form.validate()?;
        self.session.login(&request).await?;
        self.history.navigate(HOME_PATH);
        Ok(())
    }

    /// # Errors
    /// Returns `ApiError::Storage` if the token cannot be erased.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.logout()?;
        self.history.navigate(LOGIN_PATH);
        Ok(())
    }

    /// Publishes from the publish view. Signed out, nothing is sent and the
    /// console moves to the login view.
    ///
    /// # Errors
    /// `Validation` for a malformed form; request errors propagate unchanged.
    pub async fn publish(&self, form: &PublishForm) -> Result<Guarded<String>, ApiError> {
        self.guarded(|| async move {
            let article = form.validate()?;
            article::create_article(&self.api, &article).await
        })
        .await
    }

    /// # Errors
    /// Request errors propagate unchanged.
    pub async fn channels(&self) -> Result<Guarded<Vec<Channel>>, ApiError> {
        self.guarded(|| article::fetch_channels(&self.api)).await
    }

    /// # Errors
    /// Request errors propagate unchanged.
    pub async fn articles(&self, query: ArticleQuery) -> Result<Guarded<ArticlePage>, ApiError> {
        self.guarded(|| article::fetch_articles(&self.api, query)).await
    }

    /// # Errors
    /// Request errors propagate unchanged.
    pub async fn profile(&self) -> Result<Guarded<UserProfile>, ApiError> {
        self.guarded(|| self.session.fetch_user_info()).await
    }

    /// Runs `call` only when the route guard lets the caller in.
    async fn guarded<T, F, Fut>(&self, call: F) -> Result<Guarded<T>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match self.guard.render(call) {
            Guarded::Redirected(to) => Ok(Guarded::Redirected(to)),
            Guarded::Rendered(pending) => pending.await.map(Guarded::Rendered),
        }
    }
}
