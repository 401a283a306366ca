use std::collections::HashMap;

use shared::domain::DraftText;

pub const TWEET_FORM_ID: &str = "tweet-form";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct TweetForm {
    id: String,
    textarea: String,
}

impl TweetForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            textarea: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.textarea = text.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.textarea
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.textarea = text.into();
    }
}

#[derive(Debug)]
pub struct Document {
    state: DocumentState,
    forms: HashMap<String, TweetForm>,
}

impl Default for Document {
    fn default() -> Self {
        Self::loading()
    }
}

impl Document {
    pub fn loading() -> Self {
        Self {
            state: DocumentState::Loading,
            forms: HashMap::new(),
        }
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DocumentState::Ready
    }

    pub fn finish_loading(&mut self) {
        self.state = DocumentState::Ready;
    }

    pub fn insert_form(&mut self, form: TweetForm) {
        self.forms.insert(form.id.clone(), form);
    }

    pub fn form(&self, id: &str) -> Option<&TweetForm> {
        self.forms.get(id)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut TweetForm> {
        self.forms.get_mut(id)
    }

    /// Fires a submit event for `form_id`, snapshotting the textarea value.
    pub fn submit(&self, form_id: &str) -> Option<SubmitEvent> {
        self.forms
            .get(form_id)
            .map(|form| SubmitEvent::new(form.id.clone(), DraftText::new(form.textarea.clone())))
    }
}

#[derive(Debug, Clone)]
pub struct SubmitEvent {
    form_id: String,
    draft: DraftText,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl SubmitEvent {
    pub fn new(form_id: impl Into<String>, draft: DraftText) -> Self {
        Self {
            form_id: form_id.into(),
            draft,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn draft(&self) -> &DraftText {
        &self.draft
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
