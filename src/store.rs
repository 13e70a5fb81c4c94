//! Task store and sync controller.
//!
//! [`TaskStore`] holds the local mirror of the server's task list plus the
//! editor state. It never changes `tasks` on its own: every operation is
//! split into an *issue* step that produces a [`Request`] and an *apply* step
//! that folds the matching [`Outcome`] back in once the API has answered.
//! [`execute`] runs a request against a [`TaskApi`]. The TUI spawns it and
//! feeds outcomes back through a channel; [`SyncController`] awaits it inline.

use tracing::{debug, error};

use crate::api::{ApiError, TaskApi};
use crate::model::{Task, TaskDraft, TaskId, TaskUpdate};

/// A call to make against the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the whole collection
    Load,
    /// Submit a new task from the editor
    Create(TaskDraft),
    /// Submit edits to an existing task from the editor
    Save { id: TaskId, draft: TaskDraft },
    /// Send a task back with `completed` already flipped
    Toggle(Task),
    Delete(TaskId),
}

/// The API's answer to a [`Request`]
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Saved {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    Toggled {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    Deleted {
        id: TaskId,
        result: Result<(), ApiError>,
    },
}

impl Outcome {
    /// What was being attempted, for log lines
    fn action(&self) -> &'static str {
        match self {
            Outcome::Loaded(_) => "fetching tasks",
            Outcome::Created(_) | Outcome::Saved { .. } => "saving task",
            Outcome::Toggled { .. } => "updating task",
            Outcome::Deleted { .. } => "deleting task",
        }
    }
}

/// Run a request against the API
pub async fn execute<A>(api: &A, request: Request) -> Outcome
where
    A: TaskApi + ?Sized,
{
    debug!(?request, "sending request");
    match request {
        Request::Load => Outcome::Loaded(api.list().await),
        Request::Create(draft) => Outcome::Created(api.create(&draft).await),
        Request::Save { id, draft } => {
            let result = api.update(&id, &TaskUpdate::Draft(draft)).await;
            Outcome::Saved { id, result }
        }
        Request::Toggle(task) => {
            let id = task.id.clone();
            let result = api.update(&id, &TaskUpdate::Full(task)).await;
            Outcome::Toggled { id, result }
        }
        Request::Delete(id) => {
            let result = api.delete(&id).await;
            Outcome::Deleted { id, result }
        }
    }
}

/// Local task list and editor state
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    editing: Option<Task>,
    draft: TaskDraft,
    loading: bool,
    show_modal: bool,
    pending_delete: Option<TaskId>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in the order the server returned them
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Find a task by an id typed by the user.
    ///
    /// Falls back to comparing printed forms, so `123` also finds a task whose
    /// id arrived as the string `"123"`.
    pub fn find_typed(&self, typed: &TaskId) -> Option<&Task> {
        self.find(typed).or_else(|| {
            let typed = typed.to_string();
            self.tasks.iter().find(|t| t.id.to_string() == typed)
        })
    }

    /// The task open in the editor, if editing rather than creating
    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    /// A submit is in flight
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn show_modal(&self) -> bool {
        self.show_modal
    }

    /// Id awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&TaskId> {
        self.pending_delete.as_ref()
    }

    pub fn begin_load(&self) -> Request {
        Request::Load
    }

    /// Start submitting the editor draft.
    ///
    /// Returns `None` (and changes nothing) when the title is blank.
    pub fn begin_submit(&mut self) -> Option<Request> {
        if !self.draft.is_submittable() {
            return None;
        }
        self.loading = true;
        let draft = self.draft.clone();
        Some(match &self.editing {
            Some(task) => Request::Save {
                id: task.id.clone(),
                draft,
            },
            None => Request::Create(draft),
        })
    }

    pub fn begin_toggle(&self, task: &Task) -> Request {
        Request::Toggle(task.toggled())
    }

    /// Ask for a delete; nothing is sent until [`resolve_remove`] confirms it.
    ///
    /// [`resolve_remove`]: TaskStore::resolve_remove
    pub fn request_remove(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    /// Answer the pending delete question
    pub fn resolve_remove(&mut self, confirmed: bool) -> Option<Request> {
        let id = self.pending_delete.take()?;
        if confirmed {
            Some(Request::Delete(id))
        } else {
            debug!(%id, "delete declined");
            None
        }
    }

    /// Open the editor, seeded from `task` or blank for a new one
    pub fn open_editor(&mut self, task: Option<&Task>) {
        match task {
            Some(task) => {
                self.editing = Some(task.clone());
                self.draft = TaskDraft::from_task(task);
            }
            None => {
                self.editing = None;
                self.draft = TaskDraft::default();
            }
        }
        self.show_modal = true;
    }

    /// Close the editor, discarding the draft
    pub fn close_editor(&mut self) {
        self.show_modal = false;
        self.editing = None;
        self.draft = TaskDraft::default();
    }

    /// Fold an API answer into local state.
    ///
    /// Only successful outcomes touch `tasks`. Failures are logged and handed
    /// back to the caller. Submit outcomes close the editor and clear
    /// `loading` either way.
    pub fn apply(&mut self, outcome: Outcome) -> Result<(), ApiError> {
        let action = outcome.action();
        let result = match outcome {
            Outcome::Loaded(result) => result.map(|tasks| {
                debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
            }),
            Outcome::Created(result) => {
                self.settle_submit();
                result.map(|task| self.tasks.push(task))
            }
            Outcome::Saved { id, result } => {
                self.settle_submit();
                result.map(|task| self.replace(&id, task))
            }
            Outcome::Toggled { id, result } => result.map(|task| self.replace(&id, task)),
            Outcome::Deleted { id, result } => result.map(|()| self.tasks.retain(|t| t.id != id)),
        };
        if let Err(e) = &result {
            error!(error = %e, "error {}", action);
        }
        result
    }

    fn settle_submit(&mut self) {
        self.loading = false;
        self.close_editor();
    }

    fn replace(&mut self, id: &TaskId, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| &t.id == id) {
            *slot = task;
        }
    }
}

/// A [`TaskStore`] wired to an API, for callers that can simply await
pub struct SyncController<A> {
    api: A,
    store: TaskStore,
}

impl<A: TaskApi> SyncController<A> {
    pub fn new(api: A) -> Self {
        SyncController {
            api,
            store: TaskStore::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    async fn run(&mut self, request: Request) -> Result<(), ApiError> {
        let outcome = execute(&self.api, request).await;
        self.store.apply(outcome)
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        let request = self.store.begin_load();
        self.run(request).await
    }

    /// Submit the draft. A blank title is a silent no-op.
    pub async fn submit(&mut self) -> Result<(), ApiError> {
        match self.store.begin_submit() {
            Some(request) => self.run(request).await,
            None => Ok(()),
        }
    }

    pub async fn toggle(&mut self, task: &Task) -> Result<(), ApiError> {
        let request = self.store.begin_toggle(task);
        self.run(request).await
    }

    /// Delete `id` if `confirm` agrees; declining sends nothing
    pub async fn remove<F>(&mut self, id: &TaskId, confirm: F) -> Result<(), ApiError>
    where
        F: FnOnce(&TaskId) -> bool,
    {
        self.store.request_remove(id.clone());
        let confirmed = confirm(id);
        match self.store.resolve_remove(confirmed) {
            Some(request) => self.run(request).await,
            None => Ok(()),
        }
    }
}
