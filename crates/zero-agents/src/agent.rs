//! Agent base trait

/// Base trait for agents
///
/// An agent is identified by name. How an agent uses its language models is
/// left entirely to the implementor; this trait declares no behavior beyond
/// identity so it can be shared across tasks.
pub trait Agent: Send + Sync {
    /// Get the agent's name
    fn name(&self) -> &str;
}
