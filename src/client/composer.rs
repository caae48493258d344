//! Post composer: draft text plus the single in-flight create request.

use crate::client::Effect;
use crate::client::identity::SessionUser;
use crate::client::rpc::CreateOutcome;

pub const PLACEHOLDER: &str = "Type some emojis!";
pub const GENERIC_POST_ERROR: &str = "Failed to post! Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    Input(String),
    EnterPressed,
    SubmitClicked,
    CreateFinished { request_id: u64, outcome: CreateOutcome },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    draft: String,
    /// Create issued for the current draft.
    pending: Option<u64>,
    /// Create issued before the last reset; it still blocks new submits.
    orphaned: Option<u64>,
    next_request: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    pub avatar_url: String,
    pub draft: String,
    pub placeholder: &'static str,
    pub input_disabled: bool,
    pub show_submit: bool,
    pub show_spinner: bool,
}

impl Composer {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_posting(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the draft. A create still in flight keeps running but no
    /// longer belongs to any draft.
    pub fn reset(&mut self) {
        self.draft.clear();
        if let Some(id) = self.pending.take() {
            self.orphaned = Some(id);
        }
    }

    fn can_submit(&self) -> bool {
        !self.draft.is_empty() && self.pending.is_none() && self.orphaned.is_none()
    }

    pub fn update(&mut self, event: ComposerEvent) -> Vec<Effect> {
        match event {
            // the input is disabled while posting
            ComposerEvent::Input(text) => {
                if !self.is_posting() {
                    self.draft = text;
                }
                Vec::new()
            }
            ComposerEvent::EnterPressed | ComposerEvent::SubmitClicked => self.submit(),
            ComposerEvent::CreateFinished { request_id, outcome } => self.finish(request_id, outcome),
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if !self.can_submit() {
            return Vec::new();
        }
        let request_id = self.next_request;
        self.next_request += 1;
        self.pending = Some(request_id);
        vec![Effect::CreatePost { request_id, content: self.draft.clone() }]
    }

    fn finish(&mut self, request_id: u64, outcome: CreateOutcome) -> Vec<Effect> {
        // an orphaned create still refreshes the feed and reports failures,
        // but the current draft is not its draft
        let current = self.pending == Some(request_id);
        if current {
            self.pending = None;
        } else if self.orphaned == Some(request_id) {
            self.orphaned = None;
        }
        match outcome {
            CreateOutcome::Created(_) => {
                if current {
                    self.draft.clear();
                }
                vec![Effect::InvalidateFeed]
            }
            CreateOutcome::ValidationError(errors) => {
                let message = errors.first("content").unwrap_or(GENERIC_POST_ERROR);
                vec![Effect::Notify(message.to_string())]
            }
            CreateOutcome::OtherError(_) => vec![Effect::Notify(GENERIC_POST_ERROR.to_string())],
        }
    }

    /// Nothing is rendered without a signed-in user.
    pub fn view(&self, user: Option<&SessionUser>) -> Option<ComposerView> {
        let user = user?;
        Some(ComposerView {
            avatar_url: user.profile_image_url.clone(),
            draft: self.draft.clone(),
            placeholder: PLACEHOLDER,
            input_disabled: self.is_posting(),
            show_submit: self.can_submit(),
            show_spinner: self.is_posting(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::rpc::FieldErrors;
    use crate::models::post::Post;
    use chrono::Utc;
    use uuid::Uuid;

    fn me() -> SessionUser {
        SessionUser { profile_image_url: "https://img/me.png".into() }
    }

    fn typed(text: &str) -> Composer {
        let mut c = Composer::default();
        c.update(ComposerEvent::Input(text.into()));
        c
    }

    /// Sends `trigger` and returns the id of the create it issued.
    fn submit(c: &mut Composer, trigger: ComposerEvent) -> u64 {
        match c.update(trigger).as_slice() {
            [Effect::CreatePost { request_id, .. }] => *request_id,
            other => panic!("expected one create, got {:?}", other),
        }
    }

    fn finished(request_id: u64, outcome: CreateOutcome) -> ComposerEvent {
        ComposerEvent::CreateFinished { request_id, outcome }
    }

    fn post(content: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_draft_offers_no_submit_and_enter_is_noop() {
        let mut c = Composer::default();
        let view = c.view(Some(&me())).unwrap();
        assert!(!view.show_submit);
        assert!(c.update(ComposerEvent::EnterPressed).is_empty());
        assert!(c.update(ComposerEvent::SubmitClicked).is_empty());
        assert!(!c.is_posting());
    }

    #[test]
    fn enter_and_click_issue_one_create() {
        for trigger in [ComposerEvent::EnterPressed, ComposerEvent::SubmitClicked] {
            let mut c = typed("🎉");
            assert!(c.view(Some(&me())).unwrap().show_submit);
            let effects = c.update(trigger);
            assert_eq!(effects, vec![Effect::CreatePost { request_id: 0, content: "🎉".into() }]);
        }
    }

    #[test]
    fn pending_create_disables_input_and_blocks_resubmit() {
        let mut c = typed("🎉");
        c.update(ComposerEvent::EnterPressed);

        let view = c.view(Some(&me())).unwrap();
        assert!(view.input_disabled);
        assert!(view.show_spinner);
        assert!(!view.show_submit);

        assert!(c.update(ComposerEvent::EnterPressed).is_empty());
        assert!(c.update(ComposerEvent::EnterPressed).is_empty());
        c.update(ComposerEvent::Input("🎉🎉".into()));
        assert_eq!(c.draft(), "🎉");
    }

    #[test]
    fn success_clears_draft_and_invalidates_feed() {
        let mut c = typed("🎉");
        let id = submit(&mut c, ComposerEvent::EnterPressed);
        let effects = c.update(finished(id, CreateOutcome::Created(post("🎉"))));
        assert_eq!(effects, vec![Effect::InvalidateFeed]);
        assert_eq!(c.draft(), "");
        assert!(!c.is_posting());
    }

    #[test]
    fn validation_failure_shows_first_content_message_and_keeps_draft() {
        let mut c = typed("🎉");
        let id = submit(&mut c, ComposerEvent::SubmitClicked);
        let mut errors = FieldErrors::new();
        errors.push("content", "too long");
        errors.push("content", "second");

        let effects = c.update(finished(id, CreateOutcome::ValidationError(errors)));
        assert_eq!(effects, vec![Effect::Notify("too long".into())]);
        assert_eq!(c.draft(), "🎉");
        assert!(!c.is_posting());
    }

    #[test]
    fn other_failures_show_generic_message() {
        let mut c = typed("🎉");
        let id = submit(&mut c, ComposerEvent::SubmitClicked);
        let effects = c.update(finished(id, CreateOutcome::OtherError("boom".into())));
        assert_eq!(effects, vec![Effect::Notify(GENERIC_POST_ERROR.into())]);

        let id = submit(&mut c, ComposerEvent::SubmitClicked);
        let mut unrelated = FieldErrors::new();
        unrelated.push("title", "nope");
        let effects = c.update(finished(id, CreateOutcome::ValidationError(unrelated)));
        assert_eq!(effects, vec![Effect::Notify(GENERIC_POST_ERROR.into())]);
        assert_eq!(c.draft(), "🎉");
    }

    #[test]
    fn create_from_before_reset_blocks_submit_but_not_typing() {
        let mut c = typed("🎉");
        let old = submit(&mut c, ComposerEvent::EnterPressed);
        c.reset();
        assert!(!c.is_posting());

        c.update(ComposerEvent::Input("🎈".into()));
        assert_eq!(c.draft(), "🎈");
        assert!(!c.view(Some(&me())).unwrap().show_submit);
        assert!(c.update(ComposerEvent::EnterPressed).is_empty());

        let effects = c.update(finished(old, CreateOutcome::Created(post("🎉"))));
        assert_eq!(effects, vec![Effect::InvalidateFeed]);
        assert_eq!(c.draft(), "🎈");

        let new = submit(&mut c, ComposerEvent::EnterPressed);
        assert_ne!(old, new);
        assert!(c.is_posting());
    }

    #[test]
    fn failed_create_from_before_reset_still_notifies() {
        let mut c = typed("🎉");
        let old = submit(&mut c, ComposerEvent::EnterPressed);
        c.reset();
        c.update(ComposerEvent::Input("🎈".into()));

        let effects = c.update(finished(old, CreateOutcome::OtherError("expired".into())));
        assert_eq!(effects, vec![Effect::Notify(GENERIC_POST_ERROR.into())]);
        assert_eq!(c.draft(), "🎈");
        assert!(c.view(Some(&me())).unwrap().show_submit);
    }

    #[test]
    fn no_user_renders_nothing() {
        assert!(typed("🎉").view(None).is_none());
    }
}
