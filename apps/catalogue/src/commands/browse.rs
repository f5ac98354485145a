//! Read-only commands: list, search, show, tags.

use super::print_json;
use crate::{context::AppContext, ui};
use anyhow::Result;
use catalogue_core::HybridOutcome;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct ListArgs {
    /// Filter by text
    #[arg(short, long)]
    query: Option<String>,

    /// Only tools with this tag (repeatable; any tag matches)
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search text
    query: String,

    /// Only tools with this tag (repeatable; any tag matches)
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Combine metadata and documentation search on the server
    #[arg(long)]
    hybrid: bool,
}

pub async fn list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let (mut ctrl, _) = ctx.controller().await?;
    ctrl.select_tags(args.tags);
    ctrl.set_query(args.query.unwrap_or_default());
    render_view(ctx, &ctrl.state)
}

pub async fn search(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let (mut ctrl, _) = ctx.controller().await?;
    ctrl.select_tags(args.tags);
    ctrl.set_query(args.query);

    if args.hybrid {
        match ctrl.hybrid_search().await? {
            HybridOutcome::FellBack { reason } => {
                tracing::debug!("Hybrid search fallback: {reason}");
                if let Some(notice) = &ctrl.state.notice {
                    eprintln!("{} {notice}", "WARN".yellow());
                }
            }
            HybridOutcome::Applied { results } => tracing::debug!(results, "Hybrid search"),
            HybridOutcome::Unfiltered | HybridOutcome::Stale => {}
        }
    }
    render_view(ctx, &ctrl.state)
}

fn render_view(ctx: &AppContext, state: &catalogue_core::state::CatalogueState) -> Result<()> {
    if ctx.json {
        return print_json(&state.view);
    }
    let header = ui::grid::GridHeader {
        query: Some(state.query.as_str()),
        tags: &state.selected_tags,
        hybrid: state.is_hybrid,
    };
    print!("{}", ui::grid::render(&state.view, &header, ctx.link_token().as_ref()));
    Ok(())
}

pub async fn show(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.require_session().await?;
    let tool = ctx.client.tools().get(id).await?;
    if ctx.json {
        return print_json(&tool);
    }
    print!("{}", ui::card::render(&tool, ctx.link_token().as_ref()));
    Ok(())
}

pub async fn tags(ctx: &AppContext, with_stats: bool) -> Result<()> {
    let (ctrl, _) = ctx.controller().await?;

    if !with_stats {
        if ctx.json {
            return print_json(&ctrl.state.tags);
        }
        for tag in &ctrl.state.tags {
            println!("{tag}");
        }
        return Ok(());
    }

    let stats = match ctx.client.tags().stats().await {
        Ok(stats) => stats,
        Err(e) if e.is_unauthorized() => return Err(e.into()),
        Err(e) => {
            tracing::warn!("Tag stats unavailable, counting locally: {e}");
            catalogue_core::tags::stats(&ctrl.state.tools)
        }
    };
    if ctx.json {
        return print_json(&stats);
    }
    println!("{}", format!("{} tags", stats.total_tags).bold());
    let width = stats.tags.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    for tag in &stats.tags {
        println!("  {:<width$}  {}", tag.name, tag.count);
    }
    Ok(())
}
