use anyhow::Result;
use std::process;

use sugarlog_core::service::SugarService;

use super::helpers::{format_level, print_json, print_notification};

pub(crate) fn cmd_add(
    svc: &SugarService,
    date: &str,
    time: &str,
    level: &str,
    json: bool,
) -> Result<()> {
    let outcome = svc.add_entry(date, time, level);

    if json {
        print_json(&outcome)?;
    } else {
        print_notification(&outcome.notification);
        if let Some(r) = &outcome.saved {
            println!("  {} — {} mg/dL", r.timestamp, format_level(r.level));
        }
    }

    if outcome.saved.is_none() {
        process::exit(1);
    }
    Ok(())
}

pub(crate) fn cmd_reset(svc: &SugarService, yes: bool, json: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to erase all readings without --yes");
    }
    svc.reset()?;

    if json {
        println!("{}", serde_json::json!({ "reset": true }));
    } else {
        println!(
            "Erased all readings in {}",
            svc.database().path().display()
        );
    }
    Ok(())
}
