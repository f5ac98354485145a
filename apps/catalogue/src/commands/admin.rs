//! Admin table and form: list, add, edit, remove.

use super::print_json;
use crate::{context::AppContext, ui};
use anyhow::{Result, bail};
use catalogue_async::types::{ToolCreate, ToolUpdate};
use catalogue_core::CoreError;
use clap::{Args, Subcommand};
use colored::Colorize;

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Show every tool as a table
    List,

    /// Add a tool
    Add(AddArgs),

    /// Change fields of a tool; omitted fields are left as they are
    Edit(EditArgs),

    /// Delete a tool
    Remove {
        /// Tool id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// What the tool is for
    #[arg(long)]
    description: String,

    /// Primary link
    #[arg(long)]
    link: String,

    /// Emoji, short label or image URL
    #[arg(long)]
    icon: Option<String>,

    /// Documentation link
    #[arg(long)]
    docs: Option<String>,

    /// Comma-separated hints for AI search
    #[arg(long)]
    keywords: Option<String>,

    /// Tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Tool id
    id: String,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New primary link
    #[arg(long)]
    link: Option<String>,

    /// New icon
    #[arg(long)]
    icon: Option<String>,

    /// New documentation link
    #[arg(long)]
    docs: Option<String>,

    /// New AI-search hints
    #[arg(long)]
    keywords: Option<String>,

    /// Replace all tags (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Option<Vec<String>>,
}

impl From<AddArgs> for ToolCreate {
    fn from(a: AddArgs) -> Self {
        Self {
            name: a.name,
            description: a.description,
            icon: a.icon,
            tool_link: a.link,
            documentation_link: a.docs,
            keywords: a.keywords,
            tags: a.tags,
        }
    }
}

impl EditArgs {
    fn into_update(self) -> (String, ToolUpdate) {
        let update = ToolUpdate {
            name: self.name,
            description: self.description,
            icon: self.icon,
            tool_link: self.link,
            documentation_link: self.docs,
            keywords: self.keywords,
            tags: self.tags,
        };
        (self.id, update)
    }
}

pub async fn execute(ctx: &AppContext, cmd: AdminCommands) -> Result<()> {
    let (mut ctrl, _) = ctx.controller().await?;
    if !ctrl.state.is_admin {
        return Err(CoreError::Forbidden("admin access required".into()).into());
    }

    match cmd {
        AdminCommands::List => {
            if ctx.json {
                return print_json(&ctrl.state.tools);
            }
            print!("{}", ui::table::render(&ctrl.state.tools));
        }
        AdminCommands::Add(args) => {
            let tool = ctrl.create_tool(&args.into()).await?;
            if ctx.json {
                return print_json(&tool);
            }
            println!("{} Created {} [{}]", "OK".green(), tool.name.cyan(), tool.id);
        }
        AdminCommands::Edit(args) => {
            let (id, update) = args.into_update();
            if update.is_empty() {
                bail!("Nothing to change; pass at least one field");
            }
            let tool = ctrl.update_tool(&id, &update).await?;
            if ctx.json {
                return print_json(&tool);
            }
            println!("{} Updated {} [{}]", "OK".green(), tool.name.cyan(), tool.id);
        }
        AdminCommands::Remove { id, yes } => {
            if !yes {
                bail!("Refusing to delete {id} without --yes");
            }
            ctrl.delete_tool(&id).await?;
            println!("{} Deleted {id}", "OK".green());
        }
    }
    Ok(())
}
