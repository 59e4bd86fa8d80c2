/// The two reference timestamps shared by every file in a single run.
/// Computed once at startup and passed by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampPair {
    pub today: String,
    pub yesterday: String,
}
