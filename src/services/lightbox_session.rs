//! Like and comment flow of the photo detail view
//!
//! A [`LightboxSession`] holds what the lightbox shows for one photo. Changes
//! go through three steps so the UI can keep the session in a signal without
//! holding it across an await: `begin_*` checks the guards and marks the
//! session as submitting, [`Mutation::send`] performs exactly one backend
//! write, and [`LightboxSession::finish`] applies the result.

use crate::error::AppError;
use contest_backend::{CommentRecord, ContestBackend};

#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Likes and comments are not known yet (or failed to load); no writes
    Loading,
    /// No user signed in; likes and comments open the login prompt
    Unauthenticated,
    Idle,
    Submitting,
    Settled(Settlement),
}

/// What the caller has to do next
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    LoginRequired,
    Send(Mutation),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    LoginRequired,
}

/// One backend write requested by the lightbox
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// `liked` is the state before the toggle
    Like {
        photo_id: String,
        user_id: String,
        liked: bool,
    },
    Comment {
        photo_id: String,
        user_id: String,
        text: String,
    },
}

/// Result of a successful [`Mutation`]
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    LikeToggled,
    Commented(CommentRecord),
}

impl Mutation {
    pub fn photo_id(&self) -> &str {
        match self {
            Mutation::Like { photo_id, .. } | Mutation::Comment { photo_id, .. } => photo_id,
        }
    }

    pub async fn send<B: ContestBackend>(&self, backend: &B) -> Result<Applied, AppError> {
        match self {
            Mutation::Like {
                photo_id,
                user_id,
                liked: true,
            } => {
                backend.remove_like(photo_id, user_id).await?;
                Ok(Applied::LikeToggled)
            }
            Mutation::Like {
                photo_id,
                user_id,
                liked: false,
            } => {
                backend.add_like(photo_id, user_id).await?;
                Ok(Applied::LikeToggled)
            }
            Mutation::Comment {
                photo_id,
                user_id,
                text,
            } => Ok(Applied::Commented(
                backend.add_comment(photo_id, user_id, text).await?,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightboxSession {
    pub photo_id: String,
    pub user_id: Option<String>,
    pub like_count: u32,
    pub has_liked: bool,
    /// Newest first
    pub comments: Vec<CommentRecord>,
    pub state: FlowState,
}

impl LightboxSession {
    /// Shown until [`LightboxSession::load`] succeeds; refuses every write
    pub fn placeholder(photo_id: &str, user_id: Option<&str>) -> Self {
        Self {
            state: FlowState::Loading,
            ..Self::new(photo_id, user_id)
        }
    }

    /// An empty, ready session
    pub fn new(photo_id: &str, user_id: Option<&str>) -> Self {
        Self {
            photo_id: photo_id.to_string(),
            user_id: user_id.map(str::to_string),
            like_count: 0,
            has_liked: false,
            comments: Vec::new(),
            state: if user_id.is_some() {
                FlowState::Idle
            } else {
                FlowState::Unauthenticated
            },
        }
    }

    /// Fetches likes and comments of the photo
    pub async fn load<B: ContestBackend>(
        backend: &B,
        photo_id: &str,
        user_id: Option<&str>,
    ) -> Result<Self, AppError> {
        let (likes, comments) = tokio::join!(
            backend.list_likes(Some(photo_id)),
            backend.list_comments(photo_id)
        );
        let likes = likes?;

        let mut session = Self::new(photo_id, user_id);
        session.like_count = likes.iter().filter(|l| l.photo_id == photo_id).count() as u32;
        session.has_liked =
            user_id.is_some_and(|uid| likes.iter().any(|l| l.photo_id == photo_id && l.user_id == uid));
        session.comments = comments?;

        log::debug!(
            "Loaded photo {}: {} likes, {} comments",
            photo_id,
            session.like_count,
            session.comments.len()
        );
        Ok(session)
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FlowState::Submitting
    }

    /// Likes and comments were loaded, so writes can follow the known like state
    pub fn is_ready(&self) -> bool {
        self.state != FlowState::Loading
    }

    fn guard(&self) -> Result<Option<String>, AppError> {
        if self.is_submitting() || !self.is_ready() {
            return Err(AppError::Busy);
        }
        Ok(self.user_id.clone())
    }

    pub fn begin_like(&mut self) -> Result<Step, AppError> {
        let Some(user_id) = self.guard()? else {
            return Ok(Step::LoginRequired);
        };
        self.state = FlowState::Submitting;
        Ok(Step::Send(Mutation::Like {
            photo_id: self.photo_id.clone(),
            user_id,
            liked: self.has_liked,
        }))
    }

    pub fn begin_comment(&mut self, text: &str) -> Result<Step, AppError> {
        let Some(user_id) = self.guard()? else {
            return Ok(Step::LoginRequired);
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Vui lòng nhập nội dung bình luận.".to_string()));
        }
        self.state = FlowState::Submitting;
        Ok(Step::Send(Mutation::Comment {
            photo_id: self.photo_id.clone(),
            user_id,
            text: text.to_string(),
        }))
    }

    /// Applies the result of `mutation`; on failure nothing but the flow
    /// state changes and the error is handed back
    pub fn finish(
        &mut self,
        mutation: &Mutation,
        result: Result<Applied, AppError>,
    ) -> Result<(), AppError> {
        if mutation.photo_id() != self.photo_id {
            log::debug!("Dropping result for photo {}", mutation.photo_id());
            return Ok(());
        }

        match result {
            Ok(applied) => {
                match (mutation, applied) {
                    (Mutation::Like { liked: true, .. }, Applied::LikeToggled) => {
                        self.like_count = self.like_count.saturating_sub(1);
                        self.has_liked = false;
                    }
                    (Mutation::Like { liked: false, .. }, Applied::LikeToggled) => {
                        self.like_count += 1;
                        self.has_liked = true;
                    }
                    (_, Applied::Commented(comment)) => self.comments.insert(0, comment),
                    (Mutation::Comment { .. }, Applied::LikeToggled) => {}
                }
                self.state = FlowState::Settled(Settlement::Success);
                Ok(())
            }
            Err(e) => {
                log::warn!("Lightbox update for {} failed: {}", self.photo_id, e);
                self.state = FlowState::Settled(Settlement::Error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Toggles the like of the current user
    pub async fn toggle_like<B: ContestBackend>(&mut self, backend: &B) -> Result<Outcome, AppError> {
        self.run(backend, |s| s.begin_like()).await
    }

    pub async fn submit_comment<B: ContestBackend>(
        &mut self,
        backend: &B,
        text: &str,
    ) -> Result<Outcome, AppError> {
        self.run(backend, |s| s.begin_comment(text)).await
    }

    async fn run<B, F>(&mut self, backend: &B, begin: F) -> Result<Outcome, AppError>
    where
        B: ContestBackend,
        F: FnOnce(&mut Self) -> Result<Step, AppError>,
    {
        match begin(self)? {
            Step::LoginRequired => Ok(Outcome::LoginRequired),
            Step::Send(mutation) => {
                let result = mutation.send(backend).await;
                self.finish(&mutation, result)?;
                Ok(Outcome::Applied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_backend::MemoryBackend;

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_access_token(Some("token".to_string()))
    }

    #[tokio::test]
    async fn test_load_counts_likes_and_own_like() {
        let backend = backend();
        backend.add_like("p1", "u1").await.unwrap();
        backend.add_like("p1", "u2").await.unwrap();
        backend.add_like("p2", "u1").await.unwrap();
        backend.add_comment("p1", "u2", "Đẹp quá").await.unwrap();

        let session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();
        assert_eq!(session.like_count, 2);
        assert!(session.has_liked);
        assert_eq!(session.comments.len(), 1);
        assert_eq!(session.state, FlowState::Idle);

        let anonymous = LightboxSession::load(&backend, "p1", None).await.unwrap();
        assert!(!anonymous.has_liked);
        assert_eq!(anonymous.state, FlowState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_like_toggle_round_trip() {
        let backend = backend();
        let mut session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();

        assert_eq!(session.toggle_like(&backend).await.unwrap(), Outcome::Applied);
        assert_eq!(session.like_count, 1);
        assert!(session.has_liked);
        assert_eq!(backend.list_likes(Some("p1")).await.unwrap().len(), 1);

        session.toggle_like(&backend).await.unwrap();
        assert_eq!(session.like_count, 0);
        assert!(!session.has_liked);
        assert!(backend.list_likes(Some("p1")).await.unwrap().is_empty());
        assert_eq!(session.state, FlowState::Settled(Settlement::Success));
    }

    #[tokio::test]
    async fn test_failed_like_changes_nothing() {
        let backend = backend();
        let mut session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();
        backend.set_failing(true).await;

        let result = session.toggle_like(&backend).await;
        assert!(matches!(result, Err(AppError::Backend(_))));
        assert_eq!(session.like_count, 0);
        assert!(!session.has_liked);
        assert!(matches!(
            session.state,
            FlowState::Settled(Settlement::Error(_))
        ));

        // the flow can be retried after a failure
        backend.set_failing(false).await;
        session.toggle_like(&backend).await.unwrap();
        assert_eq!(session.like_count, 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_requires_login() {
        let backend = backend();
        let mut session = LightboxSession::load(&backend, "p1", None).await.unwrap();

        assert_eq!(
            session.toggle_like(&backend).await.unwrap(),
            Outcome::LoginRequired
        );
        assert_eq!(
            session.submit_comment(&backend, "hello").await.unwrap(),
            Outcome::LoginRequired
        );
        assert!(backend.list_likes(None).await.unwrap().is_empty());
        assert!(backend.list_comments("p1").await.unwrap().is_empty());
        assert_eq!(session.state, FlowState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected_before_backend() {
        let backend = backend();
        let mut session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();

        let result = session.submit_comment(&backend, "   ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(session.state, FlowState::Idle);
        assert!(backend.list_comments("p1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_comment_is_prepended_trimmed() {
        let backend = backend();
        backend.add_comment("p1", "u2", "first").await.unwrap();
        let mut session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();

        session.submit_comment(&backend, "  second  ").await.unwrap();
        assert_eq!(session.comments.len(), 2);
        assert_eq!(session.comments[0].text, "second");
        assert_eq!(session.comments[0].user_id, "u1");
    }

    #[tokio::test]
    async fn test_failed_comment_keeps_list() {
        let backend = backend();
        let mut session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();
        backend.set_failing(true).await;

        assert!(session.submit_comment(&backend, "hi").await.is_err());
        assert!(session.comments.is_empty());
    }

    #[test]
    fn test_second_submission_while_submitting_is_busy() {
        let mut session = LightboxSession::new("p1", Some("u1"));
        let step = session.begin_like().unwrap();
        assert!(matches!(step, Step::Send(Mutation::Like { liked: false, .. })));
        assert!(session.is_submitting());

        assert!(matches!(session.begin_like(), Err(AppError::Busy)));
        assert!(matches!(session.begin_comment("hi"), Err(AppError::Busy)));
    }

    #[tokio::test]
    async fn test_unloaded_session_refuses_writes() {
        let backend = backend();
        backend.add_like("p1", "u1").await.unwrap();
        let mut session = LightboxSession::placeholder("p1", Some("u1"));
        assert!(!session.is_ready());

        assert!(matches!(session.begin_like(), Err(AppError::Busy)));
        assert!(matches!(
            session.submit_comment(&backend, "hi").await,
            Err(AppError::Busy)
        ));
        assert!(matches!(session.toggle_like(&backend).await, Err(AppError::Busy)));
        assert_eq!(backend.list_likes(Some("p1")).await.unwrap().len(), 1);
        assert!(backend.list_comments("p1").await.unwrap().is_empty());

        // a successful load replaces the placeholder
        let mut session = LightboxSession::load(&backend, "p1", Some("u1")).await.unwrap();
        assert!(session.is_ready());
        assert!(session.has_liked);
        session.toggle_like(&backend).await.unwrap();
        assert!(backend.list_likes(Some("p1")).await.unwrap().is_empty());
    }

    #[test]
    fn test_result_for_other_photo_is_ignored() {
        let mut session = LightboxSession::new("p2", Some("u1"));
        let stale = Mutation::Like {
            photo_id: "p1".to_string(),
            user_id: "u1".to_string(),
            liked: false,
        };
        session.finish(&stale, Ok(Applied::LikeToggled)).unwrap();
        assert_eq!(session.like_count, 0);
        assert_eq!(session.state, FlowState::Idle);
    }

    #[test]
    fn test_unlike_never_goes_below_zero() {
        let mut session = LightboxSession::new("p1", Some("u1"));
        session.has_liked = true;
        let Step::Send(mutation) = session.begin_like().unwrap() else {
            panic!("expected a backend write");
        };
        session.finish(&mutation, Ok(Applied::LikeToggled)).unwrap();
        assert_eq!(session.like_count, 0);
        assert!(!session.has_liked);
    }
}
