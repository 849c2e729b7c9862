//! Port to the command dispatcher.

use async_trait::async_trait;

use crate::domain::System;
use crate::error::DomainError;
use crate::reply::{Embed, Reply};

/// Everything a handler needs from the surrounding dispatcher: who is acting,
/// the unparsed argument text, and a way to answer.
#[async_trait]
pub trait CommandContext: Send {
    /// The acting system, if the caller has one.
    fn system(&self) -> Option<&System>;

    /// Whether non-flag input remains.
    fn has_next(&self) -> bool;

    /// Remaining input with flags removed, or `None` when nothing is left.
    fn remainder_or_none(&mut self) -> Option<String>;

    /// Consumes a `-name` flag if any of `names` is present.
    fn match_flag(&mut self, names: &[&str]) -> bool;

    /// Consumes a clear keyword or `-clear` flag.
    fn match_clear(&mut self) -> bool;

    async fn reply(&mut self, reply: Reply) -> Result<(), DomainError>;

    /// Sends an already rendered, multi-page reply.
    async fn reply_pages(&mut self, pages: Vec<Embed>) -> Result<(), DomainError>;
}
