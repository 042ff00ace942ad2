//! Import dialog: runs the wizard against an `ImportService`
//!
//! The dialog owns one wizard session and executes the commands the wizard
//! asks for, feeding the completions back in. Whoever opens the dialog
//! supplies the hooks for "import finished" and "dialog closed"; the wizard
//! itself knows nothing about who opened it.

use log::debug;

use super::app::ImportWizard;
use super::command::Command;
use super::error::ImportError;
use super::msg::Msg;
use super::service::ImportService;
use super::state::{ImportOutcome, State};

type SuccessHook = Box<dyn FnMut(&ImportOutcome) + Send>;
type CloseHook = Box<dyn FnMut() + Send>;

/// Callbacks supplied by the owner of the dialog
#[derive(Default)]
pub struct DialogHooks {
    on_success: Option<SuccessHook>,
    on_close: Option<CloseHook>,
}

impl DialogHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the user closes the dialog from the result step, before
    /// the session is discarded (e.g. to refresh the client list)
    pub fn on_success(mut self, hook: impl FnMut(&ImportOutcome) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Called whenever the dialog closes, after `on_success`
    pub fn on_close(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }
}

pub struct ImportDialog<S: ImportService> {
    service: S,
    state: State,
    hooks: DialogHooks,
}

impl<S: ImportService> ImportDialog<S> {
    /// Open the dialog with a fresh session
    pub fn open(service: S, hooks: DialogHooks) -> Self {
        Self {
            service,
            state: ImportWizard::init(),
            hooks,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Apply a user action and run whatever it triggers until the wizard
    /// settles again
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            let command = ImportWizard::update(&mut self.state, msg);
            next = self.perform(command).await;
        }
    }

    async fn perform(&mut self, command: Command) -> Option<Msg> {
        match command {
            Command::None => None,
            Command::Check { session, file } => {
                let result = self
                    .service
                    .check(&file)
                    .await
                    .map_err(|e| ImportError::check_failed(&e));
                Some(Msg::CheckCompleted { session, result })
            }
            Command::Confirm { session, request } => {
                let result = self
                    .service
                    .confirm(&request)
                    .await
                    .map_err(|e| ImportError::confirm_failed(&e));
                Some(Msg::ConfirmCompleted { session, result })
            }
            Command::Closed { outcome } => {
                if let Some(outcome) = &outcome {
                    debug!("Import finished, notifying owner");
                    if let Some(hook) = self.hooks.on_success.as_mut() {
                        hook(outcome);
                    }
                }
                if let Some(hook) = self.hooks.on_close.as_mut() {
                    hook();
                }
                None
            }
        }
    }
}
