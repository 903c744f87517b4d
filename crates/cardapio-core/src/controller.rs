// ── Screen controller ──
//
// Generic CRUD orchestration for one resource screen: load the
// collection, manage the edit form, gate submits behind validation,
// reload after every successful write. State is observable through a
// `watch` channel; consumers read snapshots, never live references.
//
// All mutating operations (load, submit, remove) are serialized behind a
// single in-flight flag: a second call while one is running fails fast
// with `CoreError::Busy` and changes nothing. Nothing is retried
// automatically; retry is a user action.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::resource::Resource;
use crate::validate::FieldError;

// ── State ────────────────────────────────────────────────────────────

/// Collection state of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// At rest, holding the last successfully loaded collection.
    Idle(Vec<T>),
    /// A load is in flight.
    Loading,
    /// The last load failed; the collection is empty until a reload
    /// succeeds.
    LoadFailed(String),
}

/// Whether the open form creates a new item or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Edit-form state, independent of the collection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState<F> {
    Closed,
    Open {
        form: F,
        mode: FormMode,
        submitting: bool,
        /// Inline field violations from the last submit attempt.
        field_errors: Vec<FieldError>,
        /// Non-field failure of the last submit attempt (API or network).
        submit_error: Option<String>,
    },
}

impl<F> FormState<F> {
    fn opened(form: F, mode: FormMode) -> Self {
        Self::Open {
            form,
            mode,
            submitting: false,
            field_errors: Vec::new(),
            submit_error: None,
        }
    }
}

/// Full observable state of one screen.
#[derive(Debug, Clone)]
pub struct ScreenState<T, F> {
    pub load: LoadState<T>,
    pub form: FormState<F>,
}

/// Affirmative confirmation signal for destructive operations.
///
/// Collecting it is a presentation concern; the controller refuses to
/// delete without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Dismissed,
}

// ── Controller ───────────────────────────────────────────────────────

/// CRUD state machine for one resource screen.
pub struct ScreenController<R: Resource> {
    resource: R,
    state: watch::Sender<ScreenState<R::Item, R::Form>>,
    in_flight: AtomicBool,
}

impl<R: Resource> ScreenController<R> {
    /// Create a controller at rest with an empty collection. Call
    /// [`load`](Self::load) to populate it.
    pub fn new(resource: R) -> Self {
        let (state, _) = watch::channel(ScreenState {
            load: LoadState::Idle(Vec::new()),
            form: FormState::Closed,
        });
        Self {
            resource,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    // ── State observation ────────────────────────────────────────

    /// Current state snapshot.
    pub fn snapshot(&self) -> ScreenState<R::Item, R::Form> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<R::Item, R::Form>> {
        self.state.subscribe()
    }

    /// The loaded collection, empty while loading or after a failure.
    pub fn items(&self) -> Vec<R::Item> {
        match &self.state.borrow().load {
            LoadState::Idle(items) => items.clone(),
            LoadState::Loading | LoadState::LoadFailed(_) => Vec::new(),
        }
    }

    // ── Collection lifecycle ─────────────────────────────────────

    /// Fetch the collection from the API.
    ///
    /// On failure the previous collection is dropped and the error is
    /// surfaced in [`LoadState::LoadFailed`] as well as returned.
    pub async fn load(&self) -> Result<(), CoreError> {
        let _guard = self.begin()?;
        self.state
            .send_modify(|s| s.load = LoadState::Loading);

        match self.resource.list().await {
            Ok(items) => {
                debug!(count = items.len(), "collection loaded");
                self.state.send_modify(|s| s.load = LoadState::Idle(items));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "collection load failed");
                self.state
                    .send_modify(|s| s.load = LoadState::LoadFailed(err.to_string()));
                Err(err)
            }
        }
    }

    // ── Form lifecycle ───────────────────────────────────────────

    /// Open an empty create form, replacing any open form.
    pub fn open_create(&self) {
        self.state
            .send_modify(|s| s.form = FormState::opened(R::Form::default(), FormMode::Create));
    }

    /// Open an edit form pre-filled from an existing item, replacing any
    /// open form.
    pub fn open_edit(&self, item: &R::Item) {
        let form = R::form_from(item);
        let mode = FormMode::Edit(R::id_of(item));
        self.state
            .send_modify(|s| s.form = FormState::opened(form, mode));
    }

    /// Close the form, discarding the draft unconditionally.
    pub fn cancel(&self) {
        self.state.send_modify(|s| s.form = FormState::Closed);
    }

    /// Replace the open form's edit buffer (keystroke-level updates from
    /// the presentation layer). No-op while the form is closed.
    pub fn set_form(&self, form: R::Form) {
        self.state.send_modify(|s| {
            if let FormState::Open {
                form: current,
                field_errors,
                submit_error,
                ..
            } = &mut s.form
            {
                *current = form;
                field_errors.clear();
                *submit_error = None;
            }
        });
    }

    /// Submit the open form.
    ///
    /// Validation failure re-opens the same form with field errors
    /// attached and performs no network call. An API failure preserves
    /// the draft so the user can correct and retry. On success the
    /// collection is reloaded in full, then the form closes.
    pub async fn submit(&self) -> Result<(), CoreError> {
        let _guard = self.begin()?;

        let opened = {
            let state = self.state.borrow();
            match &state.form {
                FormState::Open { form, mode, .. } => Some((form.clone(), *mode)),
                FormState::Closed => None,
            }
        };
        let Some((form, mode)) = opened else {
            debug!("submit with no open form ignored");
            return Ok(());
        };

        self.state.send_modify(|s| {
            if let FormState::Open {
                submitting,
                field_errors,
                submit_error,
                ..
            } = &mut s.form
            {
                *submitting = true;
                field_errors.clear();
                *submit_error = None;
            }
        });

        let outcome = match mode {
            FormMode::Create => self.resource.create(&form).await,
            FormMode::Edit(id) => self.resource.update(id, &form).await,
        };

        match outcome {
            Ok(()) => {
                debug!(?mode, "submit accepted, reloading collection");
                let reload = self.reload_inner().await;
                self.state.send_modify(|s| s.form = FormState::Closed);
                reload
            }
            Err(CoreError::Validation(errors)) => {
                self.state.send_modify(|s| {
                    if let FormState::Open {
                        submitting,
                        field_errors,
                        ..
                    } = &mut s.form
                    {
                        *submitting = false;
                        *field_errors = errors.clone();
                    }
                });
                Err(CoreError::Validation(errors))
            }
            Err(err) => {
                warn!(error = %err, "submit failed");
                self.state.send_modify(|s| {
                    if let FormState::Open {
                        submitting,
                        submit_error,
                        ..
                    } = &mut s.form
                    {
                        *submitting = false;
                        *submit_error = Some(err.to_string());
                    }
                });
                Err(err)
            }
        }
    }

    /// Delete one item, given an affirmative confirmation.
    ///
    /// Without confirmation nothing happens. On success the collection is
    /// reloaded in full; on failure it is left untouched and the error is
    /// returned.
    pub async fn remove(&self, id: i64, confirmation: Confirmation) -> Result<(), CoreError> {
        if confirmation != Confirmation::Confirmed {
            debug!(id, "delete dismissed");
            return Ok(());
        }

        let _guard = self.begin()?;

        self.resource.delete(id).await.inspect_err(|err| {
            warn!(id, error = %err, "delete failed");
        })?;

        debug!(id, "item deleted, reloading collection");
        self.reload_inner().await
    }

    // ── Internals ────────────────────────────────────────────────

    /// Reload the collection without touching the in-flight flag (the
    /// caller already holds it).
    async fn reload_inner(&self) -> Result<(), CoreError> {
        self.state.send_modify(|s| s.load = LoadState::Loading);
        match self.resource.list().await {
            Ok(items) => {
                self.state.send_modify(|s| s.load = LoadState::Idle(items));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "reload after write failed");
                self.state
                    .send_modify(|s| s.load = LoadState::LoadFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Claim the in-flight slot or fail fast with `Busy`.
    fn begin(&self) -> Result<InFlightGuard<'_>, CoreError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Ok(InFlightGuard(&self.in_flight))
        } else {
            Err(CoreError::Busy)
        }
    }
}

/// Releases the in-flight slot when the operation completes, on every
/// exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
