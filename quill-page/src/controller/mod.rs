mod state;

pub use state::{region, CommentFormState, ModalState};

use std::collections::HashMap;

use thiserror::Error;

use quill_types::{CommentAnchor, Control, ReplyTarget, VoteOutcome, VoteTarget};

use crate::api::{ApiClient, ApiError};
use crate::config::PageConfig;
use crate::dom::Document;
use crate::logging::LogConfig;
use crate::{log_api_call, log_binding, log_modal_state};

#[derive(Debug, Error)]
pub enum ControllerError {
    /// The identifier is outside the grammar the templating layer is
    /// contracted to produce.
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    /// The identifier names an element the controller binds but that cannot
    /// be activated (a form container).
    #[error("Not an activatable control: {0}")]
    NotActivatable(String),

    #[error("Vote failed: {0}")]
    Vote(#[from] ApiError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// What an activation resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// A vote round-trip completed. `applied` is false when the score
    /// element was gone by the time the response arrived.
    Voted { outcome: VoteOutcome, applied: bool },
    /// The shared submit affordance was rebound.
    ReplyBound { form_name: String },
    /// A hide control collapsed its comment form; `changed` is false when
    /// the form was already collapsed.
    CommentHidden { changed: bool },
}

/// The interaction controller: binds page controls to behaviors and mediates
/// between the shared submit affordance and the many possible reply targets.
pub struct Controller {
    api_client: ApiClient,
    log_config: LogConfig,
    modal: Option<ModalState>,
    comment_forms: HashMap<CommentAnchor, CommentFormState>,
    controls: Vec<Control>,
}

impl Controller {
    pub fn new(config: &PageConfig) -> Self {
        Self::with_logging(config, LogConfig::disabled())
    }

    pub fn with_logging(config: &PageConfig, log_config: LogConfig) -> Self {
        Self {
            api_client: ApiClient::new(config),
            log_config,
            modal: None,
            comment_forms: HashMap::new(),
            controls: Vec::new(),
        }
    }

    /// One-shot page-load pass: runs every element identifier through the
    /// grammar, records the bindable controls and collapses every comment
    /// form container. Returns how many controls were bound.
    pub fn bind<D: Document>(&mut self, doc: &mut D) -> usize {
        self.controls.clear();
        self.comment_forms.clear();
        self.modal = None;

        for id in doc.element_ids() {
            let Some(control) = Control::parse(&id) else {
                continue;
            };
            if let Control::CommentForm(anchor) = control {
                doc.set_visible(&id, false);
                self.comment_forms.insert(anchor, CommentFormState::Collapsed);
            }
            self.controls.push(control);
        }

        log_binding!(
            self.log_config,
            "bound {} controls, {} comment forms",
            self.controls.len(),
            self.comment_forms.len()
        );
        self.controls.len()
    }

    /// Controls recorded by the last binding pass.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// The compose interaction currently bound to the shared submit
    /// affordance, if any.
    pub fn modal(&self) -> Option<&ModalState> {
        self.modal.as_ref()
    }

    pub fn comment_form_state(&self, anchor: CommentAnchor) -> CommentFormState {
        self.comment_forms.get(&anchor).copied().unwrap_or_default()
    }

    /// Dispatches a user activation of the element named `id`.
    ///
    /// Identifiers outside the grammar are a template-generation defect and
    /// come back as [`ControllerError::UnknownControl`].
    pub async fn activate<D: Document>(
        &mut self,
        doc: &mut D,
        id: &str,
    ) -> ControllerResult<Activation> {
        let control =
            Control::parse(id).ok_or_else(|| ControllerError::UnknownControl(id.to_string()))?;
        match control {
            Control::Vote(target) => self.submit_vote(doc, &target).await,
            Control::Reply(target) => Ok(self.open_reply(doc, target)),
            Control::HideComment(anchor) => Ok(self.hide_comment_form(doc, anchor)),
            Control::CommentForm(_) => Err(ControllerError::NotActivatable(id.to_string())),
        }
    }

    /// Issues the vote request and writes the returned score into the
    /// element the response names. The update is guarded by an existence
    /// check: the element may have been unbound while the request was in
    /// flight.
    ///
    /// On failure the prior score stays displayed and the error is returned
    /// to the caller instead of being dropped.
    pub async fn submit_vote<D: Document>(
        &mut self,
        doc: &mut D,
        target: &VoteTarget,
    ) -> ControllerResult<Activation> {
        let button = target.control_id();
        log_api_call!(self.log_config, "vote request: button={}", button);

        let outcome = match self.api_client.vote(&button).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log_api_call!(self.log_config, "vote failed: {}", err);
                return Err(err.into());
            }
        };

        let applied = apply_vote_outcome(doc, &outcome);
        log_api_call!(
            self.log_config,
            "vote outcome: {}={} (applied: {})",
            outcome.id,
            outcome.new_score,
            applied
        );
        Ok(Activation::Voted { outcome, applied })
    }

    /// Rebinds the shared submit affordance to `target`: snapshots the
    /// source post into the preview region, clears the previous draft and
    /// preview, and overwrites the modal state wholesale. Comment targets
    /// also expand their collapsible form.
    pub fn open_reply<D: Document>(&mut self, doc: &mut D, target: ReplyTarget) -> Activation {
        let form_name = target.form_name();
        let title = doc.markup(region::QUESTION_TITLE).unwrap_or_default();
        let content = doc.markup(&target.content_source_id()).unwrap_or_default();

        // Clear the previous draft before anything of the new interaction
        // becomes visible.
        doc.set_value(region::DRAFT_INPUT, "");
        doc.set_markup(region::DRAFT_PREVIEW, "");

        doc.set_markup(region::MODAL_TITLE, target.modal_heading());
        if target.shows_question_title() {
            doc.set_markup(region::POST_TITLE, &format!("<h3>{}</h3>", title));
        } else {
            doc.set_markup(region::POST_TITLE, "");
        }
        doc.set_markup(region::POST_CONTENT, &content);
        doc.set_attr(region::SUBMIT, "name", &form_name);

        log_modal_state!(
            self.log_config,
            "submit bound to {} for {:?}",
            form_name,
            target
        );
        self.modal = Some(ModalState {
            target,
            form_name: form_name.clone(),
            title: target.shows_question_title().then_some(title),
            content,
        });

        if let Some(anchor) = target.comment_anchor() {
            self.expand_comment_form(doc, anchor);
        }

        Activation::ReplyBound { form_name }
    }

    /// The `post` transition: expands the container and swaps the post/hide
    /// controls. Returns whether the transition applied.
    fn expand_comment_form<D: Document>(&mut self, doc: &mut D, anchor: CommentAnchor) -> bool {
        let state = self.comment_forms.entry(anchor).or_default();
        if !state.expand() {
            return false;
        }
        doc.set_visible(&anchor.container_id(), true);
        // Whichever spelling the template used, only one of each pair is on
        // the page; writes to the other are no-ops.
        for id in anchor.post_control_spellings() {
            doc.set_visible(&id, false);
        }
        for id in anchor.hide_control_spellings() {
            doc.set_visible(&id, true);
        }
        true
    }

    /// The `hide` transition: collapses the container back to its initial
    /// state and re-reveals the post control.
    pub fn hide_comment_form<D: Document>(
        &mut self,
        doc: &mut D,
        anchor: CommentAnchor,
    ) -> Activation {
        let state = self.comment_forms.entry(anchor).or_default();
        let changed = state.collapse();
        if changed {
            doc.set_visible(&anchor.container_id(), false);
            for id in anchor.post_control_spellings() {
                doc.set_visible(&id, true);
            }
            for id in anchor.hide_control_spellings() {
                doc.set_visible(&id, false);
            }
        }
        Activation::CommentHidden { changed }
    }
}

/// Writes `new_score` into the element the vote response names, verbatim.
/// Returns false without touching the page when the element is gone.
pub fn apply_vote_outcome<D: Document>(doc: &mut D, outcome: &VoteOutcome) -> bool {
    if !doc.contains(&outcome.id) {
        return false;
    }
    doc.set_text(&outcome.id, &outcome.new_score.to_string());
    true
}
