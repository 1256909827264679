//! Transfer/consult dialog state machine
//!
//! ```text
//! Closed --select_role--> RoleSelected --load--> OrgDataLoaded --open--> Open
//! Open --submit--> Submitting --ok--> Closed
//!                  Submitting --err--> Open   (selection kept)
//! Open/OrgDataLoaded/RoleSelected --cancel--> Closed   (selection discarded)
//! ```
//!
//! Fetching is split into [`TransferDialog::begin_load`] and
//! [`TransferDialog::complete_load`] so that results for a superseded role
//! selection are dropped instead of overwriting newer data.

mod comment;

use std::fmt;
use std::future::Future;

use log::{debug, error, info, warn};

use crate::client::DirectoryApi;
use crate::client::models::{NextNode, Organization, Person, TransferKind, TransferRequest};
use crate::error::{DialogError, Error, Result, ValidationError};
use crate::selection::{Classification, NodeKind, SelectionEntry, SelectionState};
use crate::tree::{self, OrganizationItem, TreeMode, build_organization_tree};

pub use comment::{COMMENT_MAX_CHARS, Comment};

/// Where the dialog is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    RoleSelected,
    OrgDataLoaded,
    Open,
    Submitting,
}

impl DialogPhase {
    fn label(self) -> &'static str {
        match self {
            DialogPhase::Closed => "closed",
            DialogPhase::RoleSelected => "waiting for organization data",
            DialogPhase::OrgDataLoaded => "loaded but not open",
            DialogPhase::Open => "open",
            DialogPhase::Submitting => "submitting",
        }
    }
}

impl fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Organizations and users fetched for one role
#[derive(Debug, Clone, Default)]
pub struct RoleData {
    pub organizations: Vec<Organization>,
    pub users: Vec<Person>,
}

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    role_id: u64,
}

/// State of one transfer (or consult) dialog for a workflow item
#[derive(Debug)]
pub struct TransferDialog {
    task_id: u64,
    kind: TransferKind,
    initial_main: Vec<SelectionEntry>,
    initial_to_know: Vec<SelectionEntry>,
    unmatched: Vec<SelectionEntry>,

    phase: DialogPhase,
    role: Option<NextNode>,
    generation: u64,
    loaded: Option<RoleData>,
    mode: TreeMode,
    tree: Vec<OrganizationItem>,
    selection: SelectionState,
    comment: Comment,
}

impl TransferDialog {
    pub fn new(task_id: u64, kind: TransferKind) -> Self {
        Self {
            task_id,
            kind,
            initial_main: Vec::new(),
            initial_to_know: Vec::new(),
            unmatched: Vec::new(),
            phase: DialogPhase::Closed,
            role: None,
            generation: 0,
            loaded: None,
            mode: TreeMode::default(),
            tree: Vec::new(),
            selection: SelectionState::default(),
            comment: Comment::default(),
        }
    }

    /// Receivers pre-selected every time the dialog opens.
    ///
    /// Entries are matched against the tree by kind and id on `open`; the
    /// tree's names replace the seeded ones.
    pub fn with_receivers(
        mut self,
        main: Vec<SelectionEntry>,
        to_know: Vec<SelectionEntry>,
    ) -> Self {
        self.initial_main = main;
        self.initial_to_know = to_know;
        self
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    pub fn kind(&self) -> TransferKind {
        self.kind
    }

    pub fn role(&self) -> Option<&NextNode> {
        self.role.as_ref()
    }

    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    pub fn tree(&self) -> &[OrganizationItem] {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// Seeded receivers that the last `open` could not find in the tree
    pub fn unmatched_receivers(&self) -> &[SelectionEntry] {
        &self.unmatched
    }

    fn require(&self, expected: &[DialogPhase], action: &'static str) -> Result<()> {
        if expected.contains(&self.phase) {
            Ok(())
        } else {
            Err(DialogError::InvalidTransition {
                state: self.phase.label(),
                action,
            }
            .into())
        }
    }

    /// Pick the next workflow step. Any fetch still in flight becomes stale.
    pub fn select_role(&mut self, role: NextNode) -> Result<()> {
        self.require(
            &[
                DialogPhase::Closed,
                DialogPhase::RoleSelected,
                DialogPhase::OrgDataLoaded,
            ],
            "select a role",
        )?;

        debug!("Role selected: {} ({})", role.name, role.id);
        self.generation += 1;
        self.role = Some(role);
        self.loaded = None;
        self.phase = DialogPhase::RoleSelected;
        Ok(())
    }

    /// Start fetching data for the selected role.
    ///
    /// Only the most recently issued ticket is honoured by `complete_load`.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        self.require(&[DialogPhase::RoleSelected], "load organization data")?;
        let role_id = self
            .role
            .as_ref()
            .map(|r| r.id)
            .ok_or_else(|| Error::Other("No role selected".to_string()))?;

        self.generation += 1;
        Ok(LoadTicket {
            generation: self.generation,
            role_id,
        })
    }

    /// Deliver a fetch result.
    ///
    /// Returns `Ok(false)` when the ticket is stale and the result was dropped.
    /// A failed fetch is logged and returned; the dialog stays unopened in
    /// `RoleSelected` so the caller can retry.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<RoleData>,
    ) -> Result<bool> {
        if ticket.generation != self.generation || self.phase != DialogPhase::RoleSelected {
            debug!(
                "Discarding stale organization data for role {}",
                ticket.role_id
            );
            return Ok(false);
        }

        match result {
            Ok(data) => {
                debug!(
                    "Loaded {} organizations and {} users for role {}",
                    data.organizations.len(),
                    data.users.len(),
                    ticket.role_id
                );
                self.loaded = Some(data);
                self.phase = DialogPhase::OrgDataLoaded;
                Ok(true)
            }
            Err(err) => {
                error!(
                    "Failed to load organization data for role {}: {}",
                    ticket.role_id, err
                );
                Err(err)
            }
        }
    }

    /// Fetch organizations and role users concurrently and deliver them
    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let ticket = self.begin_load()?;
        let result = futures::try_join!(
            api.fetch_organizations(),
            api.fetch_users_for_role(ticket.role_id)
        )
        .map(|(organizations, users)| RoleData {
            organizations,
            users,
        });

        self.complete_load(ticket, result).map(|_| ())
    }

    /// Build the tree and seed the selection
    pub fn open(&mut self) -> Result<()> {
        self.require(&[DialogPhase::OrgDataLoaded], "open")?;
        let (role, data) = match (self.role.as_ref(), self.loaded.as_ref()) {
            (Some(role), Some(data)) => (role, data),
            _ => return Err(Error::Other("Organization data missing".to_string())),
        };

        self.mode = TreeMode::for_role(role);
        self.tree = build_organization_tree(&data.organizations, &data.users, self.mode);

        let mut unmatched = Vec::new();
        let main = self.match_seeds(&self.initial_main, &mut unmatched);
        let to_know = self.match_seeds(&self.initial_to_know, &mut unmatched);
        self.selection = SelectionState::new(main, to_know);
        self.unmatched = unmatched;
        self.comment = Comment::default();
        self.phase = DialogPhase::Open;
        Ok(())
    }

    fn match_seeds(
        &self,
        seeds: &[SelectionEntry],
        unmatched: &mut Vec<SelectionEntry>,
    ) -> Vec<SelectionEntry> {
        let mut found = Vec::with_capacity(seeds.len());
        for seed in seeds {
            match tree::find(&self.tree, seed.kind, seed.id) {
                Some(item) => found.push(item.to_entry()),
                None => {
                    warn!(
                        "Receiver {:?} {} is not selectable for this role; dropped",
                        seed.kind, seed.id
                    );
                    unmatched.push(seed.clone());
                }
            }
        }
        found
    }

    pub fn toggle_main(&mut self, entry: SelectionEntry) -> Result<()> {
        self.toggle(Classification::Main, entry)
    }

    pub fn toggle_to_know(&mut self, entry: SelectionEntry) -> Result<()> {
        self.toggle(Classification::ToKnow, entry)
    }

    fn toggle(&mut self, classification: Classification, entry: SelectionEntry) -> Result<()> {
        self.require(&[DialogPhase::Open], "change the selection")?;
        self.selection.toggle(classification, entry);
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.require(&[DialogPhase::Open], "clear the selection")?;
        self.selection.clear();
        Ok(())
    }

    /// Set the comment; input past the limit is cut off
    pub fn set_comment(&mut self, text: &str) -> Result<()> {
        self.require(&[DialogPhase::Open], "edit the comment")?;
        self.comment.set(text);
        Ok(())
    }

    /// Check the current selection and comment and assemble the request
    pub fn validate(&self) -> Result<TransferRequest> {
        let role = self
            .role
            .as_ref()
            .ok_or_else(|| Error::Other("No role selected".to_string()))?;

        let len = self.comment.char_count();
        if len > COMMENT_MAX_CHARS {
            return Err(ValidationError::CommentTooLong {
                len,
                max: COMMENT_MAX_CHARS,
            }
            .into());
        }

        let (selected_user_ids, selected_org_ids) = self.resolve(self.selection.main(), &[]);
        let (to_know_user_ids, to_know_org_ids) =
            self.resolve(self.selection.to_know(), &selected_user_ids);

        if selected_user_ids.is_empty()
            && selected_org_ids.is_empty()
            && to_know_user_ids.is_empty()
            && to_know_org_ids.is_empty()
        {
            return Err(ValidationError::EmptySelection.into());
        }

        Ok(TransferRequest {
            task_id: self.task_id,
            role_id: role.id,
            kind: self.kind,
            comment: self.comment.as_str().to_string(),
            selected_user_ids,
            to_know_user_ids,
            selected_org_ids,
            to_know_org_ids,
        })
    }

    /// Split entries into (user ids, org ids).
    ///
    /// In user mode organizations expand to the users below them. User ids in
    /// `exclude` are dropped so main handlers never also appear as to-know.
    fn resolve(&self, entries: &[SelectionEntry], exclude: &[u64]) -> (Vec<u64>, Vec<u64>) {
        let mut users: Vec<u64> = Vec::new();
        let mut orgs: Vec<u64> = Vec::new();
        let push_user = |id: u64, users: &mut Vec<u64>| {
            if !exclude.contains(&id) && !users.contains(&id) {
                users.push(id);
            }
        };

        for entry in entries {
            match (entry.kind, self.mode) {
                (NodeKind::User, _) => push_user(entry.id, &mut users),
                (NodeKind::Org, TreeMode::Org) => {
                    if !orgs.contains(&entry.id) {
                        orgs.push(entry.id);
                    }
                }
                (NodeKind::Org, TreeMode::User) => {
                    if let Some(item) = tree::find(&self.tree, NodeKind::Org, entry.id) {
                        for id in tree::descendant_person_ids(item) {
                            push_user(id, &mut users);
                        }
                    }
                }
            }
        }

        (users, orgs)
    }

    /// Validate and move to `Submitting`.
    ///
    /// On a validation error the dialog stays `Open`.
    pub fn begin_submit(&mut self) -> Result<TransferRequest> {
        self.require(&[DialogPhase::Open], "submit")?;
        let request = self.validate()?;
        self.phase = DialogPhase::Submitting;
        Ok(request)
    }

    /// Record the submit outcome.
    ///
    /// Success closes and resets the dialog; failure returns to `Open` with
    /// the selection and comment intact.
    pub fn finish_submit(&mut self, result: Result<()>) -> Result<()> {
        self.require(&[DialogPhase::Submitting], "finish submitting")?;
        match result {
            Ok(()) => {
                info!("Task {} submitted ({:?})", self.task_id, self.kind);
                self.reset();
                Ok(())
            }
            Err(err) => {
                error!("Submit failed for task {}: {}", self.task_id, err);
                self.phase = DialogPhase::Open;
                Err(err)
            }
        }
    }

    /// Validate, hand the request to `submitter`, and record the outcome.
    ///
    /// `submitter` is not called when validation fails.
    pub async fn submit<F, Fut>(&mut self, submitter: F) -> Result<()>
    where
        F: FnOnce(TransferRequest) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let request = self.begin_submit()?;
        let result = submitter(request).await;
        self.finish_submit(result)
    }

    /// Close without submitting; the selection is discarded
    pub fn cancel(&mut self) -> Result<()> {
        match self.phase {
            DialogPhase::Closed => Ok(()),
            DialogPhase::Submitting => Err(DialogError::InvalidTransition {
                state: self.phase.label(),
                action: "cancel",
            }
            .into()),
            _ => {
                debug!("Transfer dialog for task {} cancelled", self.task_id);
                self.reset();
                Ok(())
            }
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.phase = DialogPhase::Closed;
        self.role = None;
        self.loaded = None;
        self.mode = TreeMode::default();
        self.tree.clear();
        self.unmatched.clear();
        self.selection.clear();
        self.comment = Comment::default();
    }
}
