use crate::clock;
use crate::output::{print_json, print_table};
use anyhow::Context;
use bizplan_core::{
    promotion::{format_price_with_symbol, LAUNCH},
    registration::{self, PreRegistrationRequest},
    storage::LocalStore,
};
use std::path::Path;

pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub plan: String,
    pub at: Option<String>,
}

pub fn run(root: &Path, args: RegisterArgs, json: bool) -> anyhow::Result<()> {
    let now = clock::now_or(args.at.as_deref())?;
    let store = LocalStore::new(root);
    let req = PreRegistrationRequest {
        name: args.name,
        email: args.email,
        phone: args.phone,
        organization: args.organization,
        plan: args.plan.parse()?,
    };

    let reg = registration::register(&store, &LAUNCH, req, now)?;
    tracing::info!(id = %reg.id, plan = %reg.plan, "pre-registration recorded");

    if json {
        return print_json(&reg);
    }

    println!("Registered {} <{}>", reg.name, reg.email);
    println!(
        "Plan {} locked at {} ({}% off, phase {})",
        reg.plan.display_name(),
        format_price_with_symbol(reg.locked_price),
        reg.discount_rate,
        reg.phase
    );
    Ok(())
}

pub fn stats(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = LocalStore::new(root);
    let all = registration::list(&store).context("failed to read pre-registrations")?;
    let stats = registration::stats(&all);

    if json {
        return print_json(&stats);
    }

    println!("Total pre-registrations: {}", stats.total);
    println!(
        "Committed revenue:       {}",
        format_price_with_symbol(stats.committed_revenue)
    );
    if stats.total == 0 {
        return Ok(());
    }
    println!();
    let rows = stats
        .by_plan
        .iter()
        .map(|(plan, n)| vec![plan.display_name().to_string(), n.to_string()])
        .collect();
    print_table(&["PLAN", "COUNT"], rows);
    println!();
    let rows = stats
        .by_phase
        .iter()
        .map(|(phase, n)| vec![phase.to_string(), n.to_string()])
        .collect();
    print_table(&["PHASE", "COUNT"], rows);
    Ok(())
}
