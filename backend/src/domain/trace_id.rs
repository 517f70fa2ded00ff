//! Correlation identifier for a single todo API request.
//!
//! The trace middleware mints one `TraceId` per request and runs the handler
//! inside [`TraceId::scope`]. Any [`crate::domain::Error`] built while the
//! scope is active copies the identifier into its `traceId` field, and the
//! same value is echoed in the `trace-id` response header, so a client error
//! body can be matched to the server log line that redacted it.
//!
//! The identifier lives in a Tokio task-local. Work moved onto another task
//! or a blocking thread sees no identifier unless it is wrapped in
//! [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    pub(crate) static TRACE_ID: TraceId;
}

/// Identifier shared by a request's error body, response header and logs.
///
/// Rendered as a lowercase hyphenated UUID.
///
/// # Examples
/// ```
/// use todos::TraceId;
///
/// fn trace_field() -> Option<String> {
///     TraceId::current().map(|id| id.to_string())
/// }
///
/// assert_eq!(trace_field(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    /// Mint a fresh identifier for an incoming request.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Identifier of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current request identifier.
    ///
    /// # Examples
    /// ```
    /// use todos::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id: TraceId = "3fa85f64-5717-4562-b3fc-2c963f66afa6"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
