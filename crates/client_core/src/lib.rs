use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{DraftText, Username, TWEET_TOO_LONG_ALERT},
    error::ValidationError,
    protocol::NewTweetForm,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub mod dom;
pub mod error;
pub mod transport;

pub use dom::{Document, DocumentState, SubmitEvent, TweetForm, TWEET_FORM_ID};
pub use error::{AttachError, TransportError};
pub use transport::{HttpPageReloader, HttpTransport};

#[async_trait]
pub trait TweetTransport: Send + Sync {
    async fn post_tweet(&self, user: &Username, form: &NewTweetForm)
        -> Result<(), TransportError>;
}

pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[async_trait]
pub trait PageReloader: Send + Sync {
    async fn reload(&self) -> Result<()>;
}

/// Where delivery results are recorded. Failures never reach the user.
pub trait DiagnosticSink: Send + Sync {
    fn tweet_posted(&self, user: &Username);
    fn tweet_failed(&self, user: &Username, error: &TransportError);
}

pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn tweet_posted(&self, user: &Username) {
        info!(%user, "tweeted success");
    }

    fn tweet_failed(&self, user: &Username, error: &TransportError) {
        warn!(%user, %error, "tweeted error");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptorState {
    Idle,
    InFlight,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Ignored,
    Rejected(ValidationError),
    Posted,
    Failed(TransportError),
}

#[derive(Debug)]
pub enum Dispatched {
    Ignored,
    Rejected(ValidationError),
    Pending(JoinHandle<SubmitOutcome>),
}

pub struct SubmitInterceptor {
    user: Username,
    transport: Arc<dyn TweetTransport>,
    notifier: Arc<dyn Notifier>,
    page: Arc<dyn PageReloader>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl SubmitInterceptor {
    pub fn new(
        user: Username,
        transport: Arc<dyn TweetTransport>,
        notifier: Arc<dyn Notifier>,
        page: Arc<dyn PageReloader>,
    ) -> Self {
        Self {
            user,
            transport,
            notifier,
            page,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Registers on `#tweet-form`. The document must have finished loading.
    pub fn attach(self, document: &Document) -> Result<TweetFormListener, AttachError> {
        self.attach_to(document, TWEET_FORM_ID)
    }

    pub fn attach_to(
        self,
        document: &Document,
        form_id: &str,
    ) -> Result<TweetFormListener, AttachError> {
        if !document.is_ready() {
            return Err(AttachError::NotReady);
        }
        if document.form(form_id).is_none() {
            return Err(AttachError::FormNotFound {
                form_id: form_id.to_string(),
            });
        }

        debug!(user = %self.user, form_id, "submit listener attached");
        Ok(TweetFormListener {
            inner: Arc::new(ListenerInner {
                interceptor: self,
                form_id: form_id.to_string(),
                in_flight: AtomicUsize::new(0),
            }),
        })
    }
}

struct ListenerInner {
    interceptor: SubmitInterceptor,
    form_id: String,
    in_flight: AtomicUsize,
}

/// Holds the listener in `InFlight` until dropped.
struct InFlight {
    inner: Arc<ListenerInner>,
}

impl InFlight {
    fn begin(inner: Arc<ListenerInner>) -> Self {
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        Self { inner }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

enum Intercepted {
    Ignored,
    Rejected(ValidationError),
    Deliver(InFlight, DraftText),
}

#[derive(Clone)]
pub struct TweetFormListener {
    inner: Arc<ListenerInner>,
}

impl TweetFormListener {
    pub fn form_id(&self) -> &str {
        &self.inner.form_id
    }

    pub fn state(&self) -> InterceptorState {
        if self.in_flight() == 0 {
            InterceptorState::Idle
        } else {
            InterceptorState::InFlight
        }
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub async fn handle(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        match self.intercept(event) {
            Intercepted::Ignored => SubmitOutcome::Ignored,
            Intercepted::Rejected(err) => SubmitOutcome::Rejected(err),
            Intercepted::Deliver(in_flight, draft) => deliver(in_flight, draft).await,
        }
    }

    /// Validates and prevents the default synchronously, then sends the
    /// request on a spawned task. Requires a tokio runtime.
    pub fn dispatch(&self, event: &mut SubmitEvent) -> Dispatched {
        match self.intercept(event) {
            Intercepted::Ignored => Dispatched::Ignored,
            Intercepted::Rejected(err) => Dispatched::Rejected(err),
            Intercepted::Deliver(in_flight, draft) => {
                Dispatched::Pending(tokio::spawn(deliver(in_flight, draft)))
            }
        }
    }

    fn intercept(&self, event: &mut SubmitEvent) -> Intercepted {
        if event.form_id() != self.inner.form_id {
            return Intercepted::Ignored;
        }

        let interceptor = &self.inner.interceptor;
        if let Err(err) = event.draft().validate() {
            debug!(user = %interceptor.user, length = err.length, "draft rejected");
            interceptor.notifier.alert(TWEET_TOO_LONG_ALERT);
            event.prevent_default();
            event.stop_propagation();
            return Intercepted::Rejected(err);
        }

        event.prevent_default();
        let in_flight = InFlight::begin(Arc::clone(&self.inner));
        Intercepted::Deliver(in_flight, event.draft().clone())
    }
}

async fn deliver(in_flight: InFlight, draft: DraftText) -> SubmitOutcome {
    let interceptor = &in_flight.inner.interceptor;
    let form = NewTweetForm::from(draft);

    match interceptor
        .transport
        .post_tweet(&interceptor.user, &form)
        .await
    {
        Ok(()) => {
            interceptor.diagnostics.tweet_posted(&interceptor.user);
            if let Err(error) = interceptor.page.reload().await {
                warn!(user = %interceptor.user, %error, "page reload failed after tweet");
            }
            SubmitOutcome::Posted
        }
        Err(error) => {
            interceptor
                .diagnostics
                .tweet_failed(&interceptor.user, &error);
            SubmitOutcome::Failed(error)
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
