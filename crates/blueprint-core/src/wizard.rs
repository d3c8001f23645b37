//! Wizard session — the five-step answer collection flow.
//!
//! A [`WizardSession`] is owned by whoever drives the wizard (CLI command,
//! request handler, test). It is created on entry, consumed by [`leave`], and
//! finished by a successful [`generate`].
//!
//! ```text
//! Basics(0) ⇄ Features(1) ⇄ Tech(2) ⇄ Design(3) ⇄ Review(4) ─generate→ Project
//! ```
//!
//! Any step can be jumped to directly; all steps edit one shared
//! [`WizardData`]. In a draft-backed session every step change is
//! checkpointed to the draft.
//!
//! [`leave`]: WizardSession::leave
//! [`generate`]: WizardSession::generate

use crate::draft::{self, Draft};
use crate::error::{BlueprintError, Result};
use crate::project::{self, Project};
use crate::prompt::build_prompt;
use crate::template::TechTemplate;
use crate::types::{DocType, WizardData};
use llm_client::TextGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Basics,
    Features,
    Tech,
    Design,
    Review,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Step::Basics,
            Step::Features,
            Step::Tech,
            Step::Design,
            Step::Review,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Step::all()
            .get(index)
            .copied()
            .ok_or(BlueprintError::InvalidStep(index))
    }

    /// Like [`Step::from_index`], but out-of-range indexes land on Review.
    pub fn clamped(index: usize) -> Self {
        Step::all()[index.min(Step::Review.index())]
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Basics => "Basics",
            Step::Features => "Features",
            Step::Tech => "Tech",
            Step::Design => "Design",
            Step::Review => "Review",
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1).ok()
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).map(Step::clamped)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Step {
    type Err = BlueprintError;

    /// Accepts a step index (`2`) or a case-insensitive label (`tech`).
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(index) = s.parse::<usize>() {
            return Step::from_index(index);
        }
        Step::all()
            .iter()
            .copied()
            .find(|step| step.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| BlueprintError::InvalidValue {
                field: "step",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Leaving a session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveRequest {
    /// Nothing unsaved; navigate to the target.
    Proceed(String),
    /// Unsaved edits; ask the user, then call [`WizardSession::stay`] or
    /// [`WizardSession::leave`].
    NeedsConfirmation,
}

// ---------------------------------------------------------------------------
// WizardSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    data: WizardData,
    step: Step,
    dirty: bool,
    draft_id: Option<Uuid>,
    project_id: Option<Uuid>,
    pending_leave: Option<String>,
}

impl WizardSession {
    /// A fresh session with blank answers at the first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a draft at its saved step.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            data: draft.wizard_data.clone(),
            step: Step::clamped(draft.current_step),
            draft_id: Some(draft.id),
            ..Self::default()
        }
    }

    /// Re-open an existing project; generating reuses its id.
    pub fn from_project(project: &Project) -> Self {
        Self {
            data: project.wizard_data.clone(),
            project_id: Some(project.id),
            ..Self::default()
        }
    }

    pub fn resume_draft(root: &Path, id: Uuid) -> Option<Self> {
        draft::get(root, id).map(|d| Self::from_draft(&d))
    }

    pub fn edit_project(root: &Path, id: Uuid) -> Option<Self> {
        project::get(root, id).map(|p| Self::from_project(&p))
    }

    pub fn data(&self) -> &WizardData {
        &self.data
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn draft_id(&self) -> Option<Uuid> {
        self.draft_id
    }

    pub fn project_id(&self) -> Option<Uuid> {
        self.project_id
    }

    pub fn pending_leave(&self) -> Option<&str> {
        self.pending_leave.as_deref()
    }

    // -- editing ------------------------------------------------------------

    /// Mutate the answers in place. Always marks the session dirty.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut WizardData) -> R) -> R {
        self.dirty = true;
        f(&mut self.data)
    }

    /// Replace the whole Tech step with a template's selections.
    pub fn apply_template(&mut self, template: &TechTemplate) {
        self.edit(|data| template.apply_to(&mut data.tech));
    }

    // -- navigation ---------------------------------------------------------

    /// Jump to `step`. Other steps' answers are untouched.
    pub fn go_to(&mut self, root: &Path, step: Step) -> Result<()> {
        self.step = step;
        if self.draft_id.is_some() {
            self.checkpoint(root)?;
        }
        Ok(())
    }

    /// Advance one step. Returns `false` when already at Review.
    pub fn next(&mut self, root: &Path) -> Result<bool> {
        match self.step.next() {
            Some(step) => self.go_to(root, step).map(|_| true),
            None => Ok(false),
        }
    }

    /// Go back one step. Returns `false` when already at Basics.
    pub fn back(&mut self, root: &Path) -> Result<bool> {
        match self.step.prev() {
            Some(step) => self.go_to(root, step).map(|_| true),
            None => Ok(false),
        }
    }

    // -- persistence --------------------------------------------------------

    /// Explicit save. The first save of a session creates its draft.
    pub fn save_draft(&mut self, root: &Path) -> Result<Draft> {
        let saved = self.checkpoint(root)?;
        self.draft_id = Some(saved.id);
        self.dirty = false;
        Ok(saved)
    }

    fn checkpoint(&self, root: &Path) -> Result<Draft> {
        let existing = self.draft_id.and_then(|id| draft::get(root, id));
        let record = match existing {
            Some(mut d) => {
                d.wizard_data = self.data.clone();
                d.current_step = self.step.index();
                d
            }
            None => {
                let mut d = Draft::new(self.data.clone(), self.step.index());
                if let Some(id) = self.draft_id {
                    d.id = id;
                }
                d
            }
        };
        draft::upsert(root, record)
    }

    // -- leaving ------------------------------------------------------------

    pub fn request_leave(&mut self, target: impl Into<String>) -> LeaveRequest {
        let target = target.into();
        if self.dirty {
            self.pending_leave = Some(target);
            LeaveRequest::NeedsConfirmation
        } else {
            LeaveRequest::Proceed(target)
        }
    }

    /// Cancel a pending leave; the session is left exactly as it was.
    pub fn stay(&mut self) {
        self.pending_leave = None;
    }

    /// Discard the session without saving. A previously saved draft is kept.
    /// Returns the pending navigation target, if one was requested.
    pub fn leave(self) -> Option<String> {
        if self.dirty {
            tracing::debug!(draft = ?self.draft_id, "leaving wizard with unsaved changes");
        }
        self.pending_leave
    }

    // -- generation ---------------------------------------------------------

    /// Generate the selected documents and attach them to this session's
    /// project.
    ///
    /// Documents run PRD first, one call at a time. The first failure aborts
    /// the batch and nothing generated by this call is saved; the project
    /// record and any draft stay as they were. On success the project is
    /// saved, the originating draft is deleted and the session is clean.
    pub fn generate(
        &mut self,
        root: &Path,
        generator: &dyn TextGenerator,
        docs: &[DocType],
    ) -> Result<Project> {
        let selected: Vec<DocType> = DocType::all()
            .iter()
            .copied()
            .filter(|d| docs.contains(d))
            .collect();
        if selected.is_empty() {
            return Err(BlueprintError::NoDocumentsSelected);
        }

        let mut project = self.materialize_project(root)?;
        self.project_id = Some(project.id);

        let mut generated = Vec::with_capacity(selected.len());
        for doc in selected {
            let prompt = build_prompt(&self.data, doc);
            tracing::info!(doc = doc.as_str(), project = %project.id, "generating document");
            let text = generator
                .generate(&prompt.instructions, &prompt.content)
                .map_err(|e| {
                    tracing::warn!(doc = doc.as_str(), error = %e, "generation failed; batch aborted");
                    e
                })?;
            generated.push((doc, text));
        }

        for (doc, text) in generated {
            project.set_document(doc, text);
        }
        project.wizard_data = self.data.clone();
        let project = project::upsert(root, project)?;

        if let Some(id) = self.draft_id.take() {
            draft::delete(root, id)?;
        }
        self.dirty = false;
        Ok(project)
    }

    fn materialize_project(&self, root: &Path) -> Result<Project> {
        match self.project_id {
            Some(id) => match project::get(root, id) {
                Some(existing) => Ok(existing),
                None => {
                    let mut fresh = Project::new(self.data.clone());
                    fresh.id = id;
                    project::upsert(root, fresh)
                }
            },
            None => project::create(root, self.data.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Feature, Priority, ProjectTech, TechChoice};
    use llm_client::GenerationError;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Replays canned results in order and records every prompt it saw.
    struct Scripted {
        replies: Mutex<VecDeque<llm_client::Result<String>>>,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<llm_client::Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl TextGenerator for Scripted {
        fn generate(&self, _instructions: &str, content: &str) -> llm_client::Result<String> {
            self.seen.lock().unwrap().push(content.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GenerationError::EmptyOutput))
        }
    }

    fn fill_basics(session: &mut WizardSession) {
        session.edit(|d| {
            d.basics.name = "Ledger".into();
            d.features
                .features
                .push(Feature::new("Sync", "Realtime", Priority::MustHave));
        });
    }

    #[test]
    fn step_indexes_and_labels() {
        assert_eq!(Step::from_index(2).unwrap(), Step::Tech);
        assert!(Step::from_index(5).is_err());
        assert_eq!(Step::clamped(9), Step::Review);
        assert_eq!(Step::Basics.prev(), None);
        assert_eq!(Step::Review.next(), None);
        assert_eq!("design".parse::<Step>().unwrap(), Step::Design);
        assert_eq!("4".parse::<Step>().unwrap(), Step::Review);
    }

    #[test]
    fn navigation_keeps_answers() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        fill_basics(&mut s);
        assert!(s.next(dir.path()).unwrap());
        s.go_to(dir.path(), Step::Review).unwrap();
        assert!(!s.next(dir.path()).unwrap());
        s.go_to(dir.path(), Step::Basics).unwrap();
        assert!(!s.back(dir.path()).unwrap());
        assert_eq!(s.data().basics.name, "Ledger");
        // No draft yet, so navigation writes nothing.
        assert!(draft::list(dir.path()).is_empty());
    }

    #[test]
    fn edits_mark_dirty_and_save_clears() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        assert!(!s.is_dirty());
        fill_basics(&mut s);
        assert!(s.is_dirty());

        let saved = s.save_draft(dir.path()).unwrap();
        assert!(!s.is_dirty());
        assert_eq!(s.draft_id(), Some(saved.id));

        // Second save updates rather than duplicates.
        s.edit(|d| d.basics.core_problem = "Splitting bills".into());
        s.save_draft(dir.path()).unwrap();
        let drafts = draft::list(dir.path());
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].wizard_data.basics.core_problem, "Splitting bills");
        assert_eq!(drafts[0].created_at, saved.created_at);
    }

    #[test]
    fn draft_resumes_at_saved_step_with_data() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        fill_basics(&mut s);
        s.go_to(dir.path(), Step::Tech).unwrap();
        let saved = s.save_draft(dir.path()).unwrap();
        assert_eq!(saved.current_step, 2);

        let resumed = WizardSession::resume_draft(dir.path(), saved.id).unwrap();
        assert_eq!(resumed.step(), Step::Tech);
        assert_eq!(resumed.data().basics.name, "Ledger");
        assert_eq!(resumed.data().features.features[0].name, "Sync");
        assert!(!resumed.is_dirty());
    }

    #[test]
    fn step_change_checkpoints_draft() {
        let dir = TempDir::new().unwrap();
        let d = draft::create_empty(dir.path()).unwrap();
        let mut s = WizardSession::from_draft(&d);
        s.edit(|data| data.basics.name = "Ledger".into());
        s.next(dir.path()).unwrap();

        let stored = draft::get(dir.path(), d.id).unwrap();
        assert_eq!(stored.current_step, 1);
        assert_eq!(stored.wizard_data.basics.name, "Ledger");
    }

    #[test]
    fn resume_missing_draft_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(WizardSession::resume_draft(dir.path(), Uuid::new_v4()).is_none());
    }

    #[test]
    fn template_replaces_tech_wholesale() {
        let mut s = WizardSession::new();
        s.edit(|d| {
            d.tech.language = TechChoice::explicit(["Rust"]);
            d.tech.payment = TechChoice::AiDecide;
        });
        let template = TechTemplate::new(
            "web",
            "",
            ProjectTech {
                framework: TechChoice::explicit(["Next.js"]),
                ..Default::default()
            },
        );
        s.apply_template(&template);
        assert_eq!(s.data().tech, template.tech);
        assert!(s.data().tech.language.is_unspecified());
        assert!(s.is_dirty());
    }

    #[test]
    fn clean_session_leaves_immediately() {
        let mut s = WizardSession::new();
        assert_eq!(
            s.request_leave("/projects"),
            LeaveRequest::Proceed("/projects".into())
        );
    }

    #[test]
    fn dirty_session_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        fill_basics(&mut s);
        let saved = s.save_draft(dir.path()).unwrap();
        s.edit(|d| d.basics.name = "Renamed".into());

        assert_eq!(s.request_leave("/ideas"), LeaveRequest::NeedsConfirmation);
        s.stay();
        assert!(s.pending_leave().is_none());
        assert!(s.is_dirty());
        assert_eq!(s.data().basics.name, "Renamed");

        assert_eq!(s.request_leave("/ideas"), LeaveRequest::NeedsConfirmation);
        assert_eq!(s.leave().as_deref(), Some("/ideas"));
        let kept = draft::get(dir.path(), saved.id).unwrap();
        assert_eq!(kept.wizard_data.basics.name, "Ledger");
    }

    #[test]
    fn generate_requires_a_document() {
        let dir = TempDir::new().unwrap();
        let scripted = Scripted::new(vec![]);
        let mut s = WizardSession::new();
        let err = s.generate(dir.path(), &scripted, &[]).unwrap_err();
        assert!(matches!(err, BlueprintError::NoDocumentsSelected));
        assert!(project::list(dir.path()).is_empty());
        assert!(scripted.calls().is_empty());
    }

    #[test]
    fn generate_prd_from_draft_deletes_draft() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        fill_basics(&mut s);
        let saved = s.save_draft(dir.path()).unwrap();
        s.edit(|d| d.basics.description = "Budgets".into());

        let scripted = Scripted::new(vec![Ok("# PRD: Ledger".into())]);
        let project = s.generate(dir.path(), &scripted, &[DocType::Prd]).unwrap();

        assert_eq!(project.generated_prd.as_deref(), Some("# PRD: Ledger"));
        assert!(project.generated_tdd.is_none());
        assert_eq!(project.wizard_data.basics.description, "Budgets");
        assert!(draft::list(dir.path()).iter().all(|d| d.id != saved.id));
        assert!(!s.is_dirty());
        assert_eq!(s.draft_id(), None);
        assert_eq!(project::get(dir.path(), project.id).unwrap(), project);
    }

    #[test]
    fn generate_runs_prd_before_tdd() {
        let dir = TempDir::new().unwrap();
        let scripted = Scripted::new(vec![Ok("prd".into()), Ok("tdd".into())]);
        let mut s = WizardSession::new();
        let project = s
            .generate(dir.path(), &scripted, &[DocType::Tdd, DocType::Prd])
            .unwrap();
        let calls = scripted.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("Generate a PRD"));
        assert!(calls[1].starts_with("Generate a TDD"));
        assert_eq!(project.generated_prd.as_deref(), Some("prd"));
        assert_eq!(project.generated_tdd.as_deref(), Some("tdd"));
    }

    #[test]
    fn failed_tdd_discards_prd_and_keeps_draft() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        fill_basics(&mut s);
        let saved = s.save_draft(dir.path()).unwrap();

        let scripted = Scripted::new(vec![
            Ok("# PRD".into()),
            Err(GenerationError::Provider("upstream 502".into())),
        ]);
        let err = s
            .generate(dir.path(), &scripted, &[DocType::Prd, DocType::Tdd])
            .unwrap_err();
        assert!(matches!(
            err,
            BlueprintError::Generation(GenerationError::Provider(_))
        ));

        let projects = project::list(dir.path());
        assert_eq!(projects.len(), 1);
        assert!(projects[0].generated_prd.is_none());
        assert!(projects[0].generated_tdd.is_none());
        assert!(draft::get(dir.path(), saved.id).is_some());
        assert_eq!(s.draft_id(), Some(saved.id));
    }

    #[test]
    fn retry_after_failure_reuses_project() {
        let dir = TempDir::new().unwrap();
        let mut s = WizardSession::new();
        let failing = Scripted::new(vec![Err(GenerationError::Unauthorized("bad key".into()))]);
        assert!(s.generate(dir.path(), &failing, &[DocType::Prd]).is_err());

        let ok = Scripted::new(vec![Ok("prd".into())]);
        let project = s.generate(dir.path(), &ok, &[DocType::Prd]).unwrap();
        let projects = project::list(dir.path());
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, project.id);
    }

    #[test]
    fn regenerating_existing_project_keeps_id() {
        let dir = TempDir::new().unwrap();
        let mut existing = project::create_empty(dir.path()).unwrap();
        existing.set_document(DocType::Prd, "old prd".into());
        project::upsert(dir.path(), existing.clone()).unwrap();

        let mut s = WizardSession::edit_project(dir.path(), existing.id).unwrap();
        let scripted = Scripted::new(vec![Ok("new tdd".into())]);
        let updated = s.generate(dir.path(), &scripted, &[DocType::Tdd]).unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.generated_prd.as_deref(), Some("old prd"));
        assert_eq!(updated.generated_tdd.as_deref(), Some("new tdd"));
        assert!(updated.updated_at >= existing.updated_at);
        assert_eq!(project::list(dir.path()).len(), 1);
    }
}
