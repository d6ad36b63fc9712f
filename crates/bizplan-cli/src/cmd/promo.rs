use crate::clock;
use crate::output::{print_json, print_table};
use anyhow::Context;
use bizplan_core::{
    banner,
    config::Config,
    promotion::{format_price_with_symbol, LAUNCH},
    storage::LocalStore,
    types::{Phase, PlanKey},
};
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum PromoSubcommand {
    /// Show the active phase, discount and countdown
    Status {
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Show plan prices for the active phase
    Pricing {
        /// Only this plan (plus, pro, premium)
        #[arg(long)]
        plan: Option<String>,
        #[arg(long)]
        at: Option<String>,
    },

    /// Dismiss or restore the promotion banner
    Banner {
        #[command(subcommand)]
        subcommand: BannerSubcommand,
    },
}

#[derive(Subcommand)]
pub enum BannerSubcommand {
    /// Hide the banner for `promotion.banner_dismiss_hours`
    Dismiss,
    /// Show the banner again
    Restore,
    /// Report whether the banner is currently hidden
    Status,
}

pub fn run(root: &Path, subcmd: PromoSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PromoSubcommand::Status { at } => status(at.as_deref(), json),
        PromoSubcommand::Pricing { plan, at } => pricing(plan.as_deref(), at.as_deref(), json),
        PromoSubcommand::Banner { subcommand } => banner_cmd(root, subcommand, json),
    }
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

fn status(at: Option<&str>, json: bool) -> anyhow::Result<()> {
    let now = clock::now_or(at)?;
    let status = LAUNCH.status(now);

    if json {
        return print_json(&status);
    }

    match status.phase {
        Phase::Ended => println!("Launch promotion has ended. Regular prices apply."),
        phase => {
            println!("Phase {phase}: {}% off", status.discount_rate);
            if let (Some(ends), Some(c)) = (status.phase_ends_at, status.countdown) {
                println!("Ends:  {}", ends.to_rfc3339());
                println!(
                    "Left:  {}d {:02}:{:02}:{:02}",
                    c.days, c.hours, c.minutes, c.seconds
                );
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// pricing
// ---------------------------------------------------------------------------

fn pricing(plan: Option<&str>, at: Option<&str>, json: bool) -> anyhow::Result<()> {
    let now = clock::now_or(at)?;
    let rows = match plan {
        Some(p) => {
            let key: PlanKey = p.parse()?;
            vec![LAUNCH.plan_pricing(key, now)]
        }
        None => LAUNCH.all_plan_pricing(now),
    };

    if json {
        return print_json(&rows);
    }

    let table = rows
        .iter()
        .map(|p| {
            vec![
                p.plan.display_name().to_string(),
                format_price_with_symbol(p.original_price),
                format_price_with_symbol(p.current_price),
                format!("{}%", p.discount_rate),
                format_price_with_symbol(p.savings),
            ]
        })
        .collect();
    print_table(&["PLAN", "ORIGINAL", "PRICE", "DISCOUNT", "SAVINGS"], table);
    Ok(())
}

// ---------------------------------------------------------------------------
// banner
// ---------------------------------------------------------------------------

fn banner_cmd(root: &Path, subcmd: BannerSubcommand, json: bool) -> anyhow::Result<()> {
    let store = LocalStore::new(root);
    let now = chrono::Utc::now();

    match subcmd {
        BannerSubcommand::Dismiss => {
            let config = Config::load_or_default(root)?;
            let until = banner::dismiss(&store, now, config.promotion.banner_dismiss_hours)
                .context("failed to dismiss banner")?;
            if json {
                print_json(&serde_json::json!({ "dismissed_until": until }))?;
            } else {
                println!("Banner hidden until {}", until.to_rfc3339());
            }
        }
        BannerSubcommand::Restore => {
            banner::restore(&store).context("failed to restore banner")?;
            if json {
                print_json(&serde_json::json!({ "dismissed": false }))?;
            } else {
                println!("Banner restored");
            }
        }
        BannerSubcommand::Status => {
            let dismissed = banner::is_dismissed(&store, now)?;
            let until = banner::dismissed_until(&store)?;
            if json {
                print_json(&serde_json::json!({
                    "dismissed": dismissed,
                    "dismissed_until": until,
                }))?;
            } else if dismissed {
                let until = until.map(|u| u.to_rfc3339()).unwrap_or_default();
                println!("Banner hidden until {until}");
            } else {
                println!("Banner visible");
            }
        }
    }
    Ok(())
}
