// ============================================================================
// Groupbot Core - Group Commands
// File: crates/groupbot-core/src/services/group_commands.rs
// ============================================================================
//! Handlers for the `group` command family: create, rename, description,
//! list and card.

use std::sync::Arc;
use tracing::{debug, info, warn};

use groupbot_shared::constants::{GROUP_LIST_PAGE_SIZE, MAX_GROUP_NAME_LENGTH};
use groupbot_shared::text::char_len;

use crate::context::CommandContext;
use crate::domain::{Group, GroupPatch, System};
use crate::error::DomainError;
use crate::guard;
use crate::paginator::paginate;
use crate::reply::{Embed, Reply, ZonedTimestamp, BLANK_FIELD_NAME};
use crate::repositories::{GroupRepository, SystemRepository};

/// Group command handlers. Each call is one request: entities come in
/// resolved, go through the guards, and leave through a single reply.
pub struct GroupCommands<G: GroupRepository, S: SystemRepository> {
    groups: Arc<G>,
    systems: Arc<S>,
    prefix: String,
}

impl<G: GroupRepository, S: SystemRepository> GroupCommands<G, S> {
    pub fn new(groups: Arc<G>, systems: Arc<S>, prefix: impl Into<String>) -> Self {
        Self {
            groups,
            systems,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `group new <name>`
    pub async fn create_group(&self, ctx: &mut dyn CommandContext) -> Result<Group, DomainError> {
        let system_id = guard::require_system(ctx.system())?.id;

        let name = ctx
            .remainder_or_none()
            .ok_or_else(|| DomainError::Syntax("You must pass a group name.".into()))?;
        check_group_name(&name)?;

        let group = self.groups.create_group(system_id, &name).await?;
        info!("Group {} created in system {}", group.hid, system_id);

        ctx.reply(Reply::success(format!(
            "Group \"**{}**\" (`{}`) registered!\nYou can now start adding members to the group:\n- **{}group {} add <members...>**",
            name, group.hid, self.prefix, group.hid
        )))
        .await?;
        Ok(group)
    }

    /// `group <target> rename <name>`
    pub async fn rename_group(
        &self,
        ctx: &mut dyn CommandContext,
        target: &Group,
    ) -> Result<Group, DomainError> {
        guard::require_own_group(ctx.system(), target)?;

        let new_name = ctx
            .remainder_or_none()
            .ok_or_else(|| DomainError::Syntax("You must pass a new group name.".into()))?;
        check_group_name(&new_name)?;

        let patch = GroupPatch::rename(new_name.as_str());
        patch.validate()?;
        let updated = self.groups.update_group(target.id, &patch).await?;
        info!("Group {} renamed", target.hid);

        ctx.reply(Reply::success(format!(
            "Group name changed from \"**{}**\" to \"**{}**\".",
            target.name, new_name
        )))
        .await?;
        Ok(updated)
    }

    /// `group <target> description [clear | -raw | <text>]`
    pub async fn group_description(
        &self,
        ctx: &mut dyn CommandContext,
        target: &Group,
    ) -> Result<(), DomainError> {
        if ctx.match_clear() {
            guard::require_own_group(ctx.system(), target)?;

            let patch = GroupPatch::clear_description();
            self.groups.update_group(target.id, &patch).await?;
            info!("Group {} description cleared", target.hid);

            return ctx.reply(Reply::success("Group description cleared.")).await;
        }

        if !ctx.has_next() {
            return self.show_description(ctx, target).await;
        }

        guard::require_own_group(ctx.system(), target)?;

        let raw = ctx.remainder_or_none().unwrap_or_default();
        let patch = GroupPatch::set_description(&raw);
        if let Err(e) = patch.validate() {
            warn!("Rejected description for group {}: {}", target.hid, e);
            return Err(e);
        }

        self.groups.update_group(target.id, &patch).await?;
        info!("Group {} description changed", target.hid);

        ctx.reply(Reply::success("Group description changed.")).await
    }

    async fn show_description(
        &self,
        ctx: &mut dyn CommandContext,
        target: &Group,
    ) -> Result<(), DomainError> {
        let is_owner = guard::is_own_group(ctx.system(), target);

        let reply = match &target.description {
            None if is_owner => Reply::text(format!(
                "This group does not have a description set. To set one, type `{}group {} description <description>`.",
                self.prefix, target.hid
            )),
            None => Reply::text("This group does not have a description set."),
            Some(description) if ctx.match_flag(&["r", "raw"]) => {
                Reply::text(format!("```\n{}\n```", description))
            }
            Some(description) => {
                let mut hint = format!(
                    "To print the description with formatting, type `{}group {} description -raw`.",
                    self.prefix, target.hid
                );
                if is_owner {
                    hint.push_str(&format!(
                        " To clear it, type `{}group {} description -clear`.",
                        self.prefix, target.hid
                    ));
                }
                Reply::Embed(
                    Embed::new()
                        .title("Group description")
                        .description(description.as_str())
                        .field(BLANK_FIELD_NAME, hint),
                )
            }
        };

        ctx.reply(reply).await
    }

    /// `group list [system]`. Falls back to the caller's own system.
    pub async fn list_system_groups(
        &self,
        ctx: &mut dyn CommandContext,
        target: Option<&System>,
    ) -> Result<(), DomainError> {
        let system = match target {
            Some(system) => system.clone(),
            None => guard::require_system(ctx.system())?.clone(),
        };
        let is_own_system = ctx.system().is_some_and(|s| s.id == system.id);

        let groups = self.groups.query_groups_in_system(system.id).await?;
        debug!("Listing {} groups of system {}", groups.len(), system.hid);

        if groups.is_empty() {
            let reply = if is_own_system {
                Reply::text(format!(
                    "This system has no groups. To create one, use the command `{}group new <name>`.",
                    self.prefix
                ))
            } else {
                Reply::text("This system has no groups.")
            };
            return ctx.reply(reply).await;
        }

        let title = match &system.name {
            Some(name) => format!("Groups of {} (`{}`)", name, system.hid),
            None => format!("Groups of `{}`", system.hid),
        };
        let total = groups.len();

        paginate(ctx, &groups, GROUP_LIST_PAGE_SIZE, &title, |embed, page| {
            let lines: String = page
                .iter()
                .map(|g| format!("[`{}`] **{}**\n", g.hid, g.name))
                .collect();
            embed.description(lines).footer(format!("{} total", total))
        })
        .await?;
        Ok(())
    }

    /// `group <target>`
    pub async fn show_group_card(
        &self,
        ctx: &mut dyn CommandContext,
        target: &Group,
    ) -> Result<(), DomainError> {
        let system = self.group_system(ctx.system(), target).await?;

        let author = match &system.name {
            Some(system_name) => format!("{} ({})", target.name, system_name),
            None => target.name.clone(),
        };

        let mut embed = Embed::new().author(author);
        if let Some(description) = &target.description {
            embed = embed.field("Description", description.as_str());
        }
        let embed = embed.footer_with_timestamp(
            format!("System ID: {} | Group ID: {}", system.hid, target.hid),
            ZonedTimestamp {
                at: target.created_at,
                time_zone: system.time_zone.clone(),
            },
        );

        ctx.reply(Reply::Embed(embed)).await
    }

    /// Reuses the caller's system when it owns the group.
    async fn group_system(
        &self,
        caller: Option<&System>,
        target: &Group,
    ) -> Result<System, DomainError> {
        if let Some(system) = caller.filter(|s| s.id == target.system) {
            return Ok(system.clone());
        }
        self.systems
            .find_by_id(target.system)
            .await?
            .ok_or_else(|| DomainError::SystemNotFound(target.system.to_string()))
    }
}

fn check_group_name(name: &str) -> Result<(), DomainError> {
    let length = char_len(name);
    if length > MAX_GROUP_NAME_LENGTH {
        warn!("Rejected group name of {} characters", length);
        return Err(DomainError::GroupNameTooLong {
            length,
            max: MAX_GROUP_NAME_LENGTH,
        });
    }
    Ok(())
}
