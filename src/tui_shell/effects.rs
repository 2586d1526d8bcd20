//! Messages between views, the app and worker threads.

use crate::error::ApiError;
use crate::listing::ListTicket;
use crate::model::{AdminProfile, Category, Page, Resource, Section, Vocabulary, Word};
use crate::remote::{Ack, RemoteClient};
use crate::selector::{CascadeTicket, OptionSource, SelectOption};

use super::View;

/// Work run on a worker thread against a clone of the app's client.
pub(super) type Job = Box<dyn FnOnce(&RemoteClient) -> Outcome + Send + 'static>;

/// One listing page of any resource.
#[derive(Debug)]
pub(super) enum AnyPage {
    Vocabulary(Page<Vocabulary>),
    Section(Page<Section>),
    Category(Page<Category>),
    Word(Page<Word>),
}

/// Result of a job, delivered back to the screen that spawned it.
#[derive(Debug)]
pub(super) enum Outcome {
    Options {
        ticket: CascadeTicket,
        result: Result<Vec<SelectOption>, ApiError>,
    },
    List {
        ticket: ListTicket,
        result: Result<AnyPage, ApiError>,
    },
    Word(Result<Word, ApiError>),
    Deleted(Result<Ack, ApiError>),
    Submitted(Result<Ack, ApiError>),
    Uploaded(Result<String, ApiError>),
    /// Login plus admin check; carries the new token.
    LoggedIn(Result<(String, AdminProfile), ApiError>),
    Profile(Result<AdminProfile, ApiError>),
}

impl Outcome {
    pub(super) fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Options { result, .. } => result.as_ref().err(),
            Outcome::List { result, .. } => result.as_ref().err(),
            Outcome::Word(r) => r.as_ref().err(),
            Outcome::Deleted(r) | Outcome::Submitted(r) => r.as_ref().err(),
            Outcome::Uploaded(r) => r.as_ref().err(),
            Outcome::LoggedIn(r) => r.as_ref().err(),
            Outcome::Profile(r) => r.as_ref().err(),
        }
    }
}

/// Confirmed through a modal before it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum PendingAction {
    Delete { resource: Resource, id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TextInputAction {
    LoginPhone,
    LoginPassword,
    UploadPath,
}

impl TextInputAction {
    pub(super) fn is_secret(self) -> bool {
        matches!(self, TextInputAction::LoginPassword)
    }
}

/// What a view asks the app to do after handling input or an outcome.
pub(super) enum Effect {
    Spawn(Job),
    Push(Box<dyn View>),
    Pop,
    /// Pop, then let the screen below refetch.
    PopAndRefresh,
    Status(String),
    Error(String),
    /// Blocking message box.
    Alert { title: String, message: String },
    Confirm {
        title: String,
        lines: Vec<String>,
        action: PendingAction,
    },
    TextInput {
        title: String,
        prompt: String,
        action: TextInputAction,
        initial: Option<String>,
        lines: Vec<String>,
    },
    /// Start the phone/password prompts.
    Login,
    Logout,
    Quit,
}

pub(super) fn options_job(ticket: CascadeTicket) -> Effect {
    Effect::Spawn(Box::new(move |client: &RemoteClient| {
        let result = client.fetch_options(ticket.resource, ticket.ticket.scope.as_deref());
        Outcome::Options { ticket, result }
    }))
}

pub(super) fn options_jobs(tickets: Vec<CascadeTicket>) -> Vec<Effect> {
    tickets.into_iter().map(options_job).collect()
}
