//! Console implementation of the dispatcher port.

use async_trait::async_trait;

use groupbot_core::context::CommandContext;
use groupbot_core::reply::{Embed, Reply};
use groupbot_core::{DomainError, System};

use crate::args::Arguments;

/// One request: the acting system, the unread arguments, and the replies
/// collected so far.
pub struct ConsoleContext {
    system: Option<System>,
    args: Arguments,
    replies: Vec<Reply>,
}

impl ConsoleContext {
    pub fn new(system: Option<System>, args: Arguments) -> Self {
        Self {
            system,
            args,
            replies: Vec::new(),
        }
    }

    pub fn args_mut(&mut self) -> &mut Arguments {
        &mut self.args
    }

    pub fn into_replies(self) -> Vec<Reply> {
        self.replies
    }
}

#[async_trait]
impl CommandContext for ConsoleContext {
    fn system(&self) -> Option<&System> {
        self.system.as_ref()
    }

    fn has_next(&self) -> bool {
        self.args.has_next()
    }

    fn remainder_or_none(&mut self) -> Option<String> {
        self.args.remainder_or_none()
    }

    fn match_flag(&mut self, names: &[&str]) -> bool {
        self.args.match_flag(names)
    }

    /// `clear` only counts as a keyword when it is the last word left, so a
    /// description such as "clear skies" is still set as text.
    fn match_clear(&mut self) -> bool {
        if self.args.remaining_words() == 1 && self.args.match_word(&["clear"]) {
            return true;
        }
        self.args.match_flag(&["c", "clear"])
    }

    async fn reply(&mut self, reply: Reply) -> Result<(), DomainError> {
        self.replies.push(reply);
        Ok(())
    }

    async fn reply_pages(&mut self, pages: Vec<Embed>) -> Result<(), DomainError> {
        self.replies.extend(pages.into_iter().map(Reply::Embed));
        Ok(())
    }
}
