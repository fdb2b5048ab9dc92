mod auth;
mod calendar;
mod config_cmd;
mod diary;
mod dog;
mod health;
mod home;
mod log;

pub use auth::AuthCommand;
pub use calendar::CalendarCommand;
pub use config_cmd::ConfigCommand;
pub use diary::DiaryCommand;
pub use dog::DogCommand;
pub use health::HealthCommand;
pub use home::HomeCommand;
pub use log::LogCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use pawsome_core::{Backend, Dog, HealthStore};

use crate::config::Config;
use crate::session::{SavedState, SessionError, SessionStore};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const NOT_LOGGED_IN: &str = "Not logged in. Run 'paw auth login' first.";
const NO_ACTIVE_DOG: &str = "No dog selected. Add one with 'paw dog add'.";

/// The signed-in store plus the file its client state is saved to.
pub struct Workspace {
    pub store: HealthStore<Backend>,
    sessions: SessionStore,
}

impl Workspace {
    /// Restores the saved session and fetches the user's records.
    ///
    /// An expired session is refreshed first; if that fails the saved
    /// session is dropped and `None` is returned.
    pub async fn restore(config: &Config) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        let backend = Backend::new(config.backend()?);
        let sessions = SessionStore::new(config.data_dir.value.clone());
        let mut state = sessions.load()?;

        let session = match state.session.take() {
            Some(saved) if saved.is_expired() => {
                match backend.refresh_session(&saved.refresh_token).await {
                    Ok(refreshed) => Some(refreshed),
                    Err(e) => {
                        tracing::warn!("Session refresh failed: {}", e);
                        None
                    }
                }
            }
            other => other,
        };

        let Some(session) = session else {
            sessions.save(&state)?;
            return Ok(None);
        };

        let mut store = HealthStore::new(backend);
        store.set_active_dog(state.active_dog_id.take());
        store.set_session(Some(session)).await;

        // The saved selection may point at a dog deleted elsewhere.
        if store.active_dog().is_none() {
            let first = store.dogs().first().map(|d| d.id.clone());
            store.set_active_dog(first);
        }

        let workspace = Self { store, sessions };
        workspace.save()?;
        Ok(Some(workspace))
    }

    /// Like [`Workspace::restore`], failing when nobody is signed in.
    pub async fn open(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        Self::restore(config).await?.ok_or_else(|| NOT_LOGGED_IN.into())
    }

    /// Writes the current session and selected dog back to disk.
    pub fn save(&self) -> Result<(), SessionError> {
        self.sessions.save(&SavedState {
            session: self.store.session().cloned(),
            active_dog_id: self.store.active_dog_id().map(String::from),
        })
    }

    pub fn forget(&self) -> Result<bool, SessionError> {
        self.sessions.clear()
    }

    pub fn active_dog_id(&self) -> Result<String, Box<dyn std::error::Error>> {
        self.store
            .active_dog_id()
            .map(String::from)
            .ok_or_else(|| NO_ACTIVE_DOG.into())
    }

    pub fn active_dog(&self) -> Result<&Dog, Box<dyn std::error::Error>> {
        self.store.active_dog().ok_or_else(|| NO_ACTIVE_DOG.into())
    }

    /// Finds a dog by id, falling back to an exact name match.
    pub fn find_dog(&self, key: &str) -> Result<&Dog, Box<dyn std::error::Error>> {
        find_dog(self.store.dogs(), key).ok_or_else(|| format!("Dog not found: {}", key).into())
    }
}

fn find_dog<'a>(dogs: &'a [Dog], key: &str) -> Option<&'a Dog> {
    dogs.iter()
        .find(|d| d.id == key)
        .or_else(|| dogs.iter().find(|d| d.name == key))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}
