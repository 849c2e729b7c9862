// ============================================================================
// Groupbot Console - Dispatcher
// File: apps/groupbot-console/src/dispatcher.rs
// ============================================================================
//! Routes one input line to a group command and renders the outcome.

use std::sync::Arc;
use tracing::{debug, error, info};

use groupbot_core::context::CommandContext;
use groupbot_core::reply::Reply;
use groupbot_core::repositories::{GroupRepository, SystemRepository};
use groupbot_core::services::GroupCommands;
use groupbot_core::{DomainError, ErrorKind, Group, System, SystemId};

use crate::args::Arguments;
use crate::context::ConsoleContext;
use crate::render::render_reply;

/// Holds the acting system between lines; everything else is loaded per line.
pub struct Dispatcher<G: GroupRepository, S: SystemRepository> {
    commands: GroupCommands<G, S>,
    groups: Arc<G>,
    systems: Arc<S>,
    acting: Option<SystemId>,
}

impl<G: GroupRepository, S: SystemRepository> Dispatcher<G, S> {
    pub fn new(groups: Arc<G>, systems: Arc<S>, prefix: impl Into<String>) -> Self {
        Self {
            commands: GroupCommands::new(groups.clone(), systems.clone(), prefix),
            groups,
            systems,
            acting: None,
        }
    }

    pub fn acting_system(&self) -> Option<SystemId> {
        self.acting
    }

    /// Switches the acting system by human id.
    pub async fn act_as(&mut self, hid: &str) -> Result<System, DomainError> {
        let system = self
            .systems
            .find_by_hid(hid)
            .await?
            .ok_or_else(|| DomainError::SystemNotFound(hid.to_string()))?;
        self.acting = Some(system.id);
        info!("Acting as system {}", system.hid);
        Ok(system)
    }

    /// Runs one line and returns the rendered replies, one string per reply.
    pub async fn handle_line(&mut self, line: &str) -> Vec<String> {
        let line = line.trim();
        let line = line.strip_prefix(self.commands.prefix()).unwrap_or(line);
        if line.is_empty() {
            return Vec::new();
        }

        let system = match self.load_acting_system().await {
            Ok(system) => system,
            Err(e) => return vec![self.render_error(&e)],
        };
        let mut ctx = ConsoleContext::new(system, Arguments::new(line));

        match self.route(&mut ctx).await {
            Ok(()) => ctx.into_replies().iter().map(render_reply).collect(),
            Err(e) => {
                let mut output: Vec<String> = ctx.into_replies().iter().map(render_reply).collect();
                output.push(self.render_error(&e));
                output
            }
        }
    }

    async fn load_acting_system(&self) -> Result<Option<System>, DomainError> {
        match self.acting {
            Some(id) => self.systems.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn route(&mut self, ctx: &mut ConsoleContext) -> Result<(), DomainError> {
        let args = ctx.args_mut();

        if args.match_word(&["help", "h"]) {
            return send(ctx, Reply::text(self.help_text())).await;
        }

        if args.match_word(&["as"]) {
            let hid = args
                .pop()
                .ok_or_else(|| DomainError::Syntax("You must pass a system id.".into()))?;
            let system = self.act_as(&hid).await?;
            return send(ctx, Reply::success(format!("Now acting as system `{}`.", system.hid))).await;
        }

        if args.match_word(&["system", "s"]) {
            if !args.match_word(&["new", "n", "create"]) {
                return Err(DomainError::Syntax(format!(
                    "Unknown system command. Try `{}system new [name]`.",
                    self.commands.prefix()
                )));
            }
            let name = args.remainder_or_none();
            let system = self.systems.create_system(name).await?;
            self.acting = Some(system.id);
            return send(
                ctx,
                Reply::success(format!(
                    "System `{}` registered. You are now acting as it.",
                    system.hid
                )),
            )
            .await;
        }

        if !args.match_word(&["group", "g"]) {
            return Err(DomainError::Syntax(format!(
                "Unknown command. Type `{}help` for a list of commands.",
                self.commands.prefix()
            )));
        }

        if args.match_word(&["new", "n", "create"]) {
            self.commands.create_group(ctx).await?;
            return Ok(());
        }

        if args.match_word(&["list", "l"]) {
            let target = match ctx.args_mut().pop() {
                Some(hid) => Some(self.resolve_system(&hid).await?),
                None => None,
            };
            return self.commands.list_system_groups(ctx, target.as_ref()).await;
        }

        let hid = args.pop().ok_or_else(|| {
            DomainError::Syntax(format!(
                "You must pass a group id or a subcommand. Try `{}group new <name>`.",
                self.commands.prefix()
            ))
        })?;
        let target = self.resolve_group(&hid).await?;
        debug!("Resolved group {} for command", target.hid);

        let args = ctx.args_mut();
        if args.match_word(&["rename", "name", "changename", "setname"]) {
            self.commands.rename_group(ctx, &target).await?;
        } else if args.match_word(&["description", "desc", "describe", "d"]) {
            self.commands.group_description(ctx, &target).await?;
        } else if !args.has_next() {
            self.commands.show_group_card(ctx, &target).await?;
        } else {
            let word = args.peek().unwrap_or_default().to_string();
            return Err(DomainError::Syntax(format!("Unknown group subcommand `{}`.", word)));
        }
        Ok(())
    }

    async fn resolve_group(&self, hid: &str) -> Result<Group, DomainError> {
        self.groups
            .find_by_hid(hid)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(hid.to_string()))
    }

    async fn resolve_system(&self, hid: &str) -> Result<System, DomainError> {
        self.systems
            .find_by_hid(hid)
            .await?
            .ok_or_else(|| DomainError::SystemNotFound(hid.to_string()))
    }

    fn render_error(&self, error: &DomainError) -> String {
        match error.kind() {
            _ if !error.is_user_error() => {
                error!("Command failed: {}", error);
                render_reply(&Reply::error("An internal error occurred. Please try again later."))
            }
            ErrorKind::Authorization if matches!(error, DomainError::Unauthenticated) => {
                render_reply(&Reply::error(format!(
                    "{} To create one, type `{}system new`.",
                    error,
                    self.commands.prefix()
                )))
            }
            _ => render_reply(&Reply::error(error.to_string())),
        }
    }

    fn help_text(&self) -> String {
        let p = self.commands.prefix();
        [
            format!("{p}system new [name]            register a system and act as it"),
            format!("{p}as <system id>               act as an existing system"),
            format!("{p}group new <name>             create a group"),
            format!("{p}group list [system id]       list groups"),
            format!("{p}group <id>                   show a group card"),
            format!("{p}group <id> rename <name>     rename a group"),
            format!("{p}group <id> description [clear | -clear | -raw | <text>]"),
        ]
        .join("\n")
    }
}

async fn send(ctx: &mut ConsoleContext, reply: Reply) -> Result<(), DomainError> {
    ctx.reply(reply).await
}
