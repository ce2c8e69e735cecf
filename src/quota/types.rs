/// A parsed per-client quota: `calls` admissions per fixed window of
/// `period_seconds`. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSpec {
    /// Number of calls admitted per window. Always positive.
    pub calls: u32,
    /// Window length in seconds: 1, 60 or 3600.
    pub period_seconds: u64,
}
