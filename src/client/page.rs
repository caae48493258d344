//! Home page shell: identity gating around the composer, plus the feed.

use chrono::{DateTime, Utc};

use crate::client::Effect;
use crate::client::composer::{Composer, ComposerEvent, ComposerView};
use crate::client::feed::{Feed, FeedView};
use crate::client::identity::IdentitySession;
use crate::models::post::PostWithAuthor;

/// Everything that can happen to the page: user input and async completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    IdentityChanged(IdentitySession),
    Composer(ComposerEvent),
    /// `None` when the fetch resolved without data.
    FeedFetched(Option<Vec<PostWithAuthor>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderView {
    SignIn,
    Composer(ComposerView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Identity not resolved yet.
    Empty,
    Ready { header: HeaderView, feed: FeedView },
}

#[derive(Debug, Default)]
pub struct HomePage {
    identity: IdentitySession,
    composer: Composer,
    feed: Feed,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The feed query starts right away, whatever the session status.
    pub fn mount(&mut self) -> Vec<Effect> {
        vec![Effect::FetchFeed]
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::IdentityChanged(session) => {
                if !session.is_signed_in() {
                    // a draft does not survive losing the session
                    self.composer.reset();
                }
                self.identity = session;
                Vec::new()
            }
            PageEvent::Composer(event @ ComposerEvent::CreateFinished { .. }) => {
                self.composer.update(event)
            }
            PageEvent::Composer(event) => {
                if self.identity.is_signed_in() {
                    self.composer.update(event)
                } else {
                    Vec::new()
                }
            }
            PageEvent::FeedFetched(rows) => {
                self.feed.fetched(rows);
                Vec::new()
            }
        }
    }

    pub fn identity(&self) -> &IdentitySession {
        &self.identity
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn view(&self, now: DateTime<Utc>) -> PageView {
        if !self.identity.is_loaded() {
            return PageView::Empty;
        }
        let header = match self.composer.view(self.identity.user()) {
            Some(composer) => HeaderView::Composer(composer),
            None => HeaderView::SignIn,
        };
        PageView::Ready { header, feed: self.feed.view(now) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::identity::SessionUser;
    use crate::client::rpc::CreateOutcome;
    use crate::models::post::Post;
    use uuid::Uuid;

    fn composer(event: ComposerEvent) -> PageEvent {
        PageEvent::Composer(event)
    }

    fn created(request_id: u64, content: &str) -> PageEvent {
        composer(ComposerEvent::CreateFinished {
            request_id,
            outcome: CreateOutcome::Created(Post {
                id: Uuid::new_v4(),
                author_id: Uuid::new_v4(),
                content: content.into(),
                created_at: Utc::now(),
            }),
        })
    }

    fn request_id(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::CreatePost { request_id, .. }] => *request_id,
            other => panic!("expected one create, got {:?}", other),
        }
    }

    fn signed_in() -> IdentitySession {
        IdentitySession::SignedIn(SessionUser { profile_image_url: "https://img/me.png".into() })
    }

    #[test]
    fn mount_prewarms_feed_before_identity() {
        let mut page = HomePage::new();
        assert_eq!(page.mount(), vec![Effect::FetchFeed]);
        assert_eq!(page.view(Utc::now()), PageView::Empty);
    }

    #[test]
    fn unresolved_identity_renders_nothing_even_with_feed() {
        let mut page = HomePage::new();
        page.dispatch(PageEvent::FeedFetched(Some(Vec::new())));
        assert_eq!(page.view(Utc::now()), PageView::Empty);
    }

    #[test]
    fn signed_out_sees_sign_in_and_feed() {
        let mut page = HomePage::new();
        page.dispatch(PageEvent::IdentityChanged(IdentitySession::SignedOut));
        match page.view(Utc::now()) {
            PageView::Ready { header, feed } => {
                assert_eq!(header, HeaderView::SignIn);
                assert_eq!(feed, FeedView::Loading);
            }
            PageView::Empty => panic!("expected a rendered page"),
        }
    }

    #[test]
    fn signed_in_sees_composer() {
        let mut page = HomePage::new();
        page.dispatch(PageEvent::IdentityChanged(signed_in()));
        let PageView::Ready { header, .. } = page.view(Utc::now()) else {
            panic!("expected a rendered page");
        };
        assert!(matches!(header, HeaderView::Composer(_)));
    }

    #[test]
    fn signed_out_viewer_cannot_compose() {
        let mut page = HomePage::new();
        page.dispatch(PageEvent::IdentityChanged(IdentitySession::SignedOut));
        page.dispatch(PageEvent::Composer(ComposerEvent::Input("🎉".into())));
        assert!(page.dispatch(PageEvent::Composer(ComposerEvent::EnterPressed)).is_empty());
    }

    #[test]
    fn losing_session_discards_draft_but_in_flight_create_completes() {
        let mut page = HomePage::new();
        page.dispatch(PageEvent::IdentityChanged(signed_in()));
        page.dispatch(composer(ComposerEvent::Input("🎉".into())));
        let id = request_id(&page.dispatch(composer(ComposerEvent::EnterPressed)));

        page.dispatch(PageEvent::IdentityChanged(IdentitySession::SignedOut));
        assert_eq!(page.composer().draft(), "");

        let effects = page.dispatch(composer(ComposerEvent::CreateFinished {
            request_id: id,
            outcome: CreateOutcome::OtherError("expired".into()),
        }));
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Notify(_)));
    }

    #[test]
    fn old_create_completing_after_relogin_keeps_new_draft() {
        let mut page = HomePage::new();
        page.dispatch(PageEvent::IdentityChanged(signed_in()));
        page.dispatch(composer(ComposerEvent::Input("🎉".into())));
        let first = request_id(&page.dispatch(composer(ComposerEvent::EnterPressed)));

        page.dispatch(PageEvent::IdentityChanged(IdentitySession::SignedOut));
        page.dispatch(PageEvent::IdentityChanged(signed_in()));
        page.dispatch(composer(ComposerEvent::Input("🎈".into())));

        // the first create is still outstanding
        assert!(page.dispatch(composer(ComposerEvent::EnterPressed)).is_empty());

        let effects = page.dispatch(created(first, "🎉"));
        assert_eq!(effects, vec![Effect::InvalidateFeed]);
        assert_eq!(page.composer().draft(), "🎈");
        assert!(!page.composer().is_posting());

        let second = request_id(&page.dispatch(composer(ComposerEvent::EnterPressed)));
        assert_ne!(first, second);
    }
}
