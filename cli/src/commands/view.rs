use anyhow::Result;
use std::process;

use sugarlog_core::models::Notification;
use sugarlog_core::service::{Outcome, SugarService};

use super::helpers::{notice_exit_code, print_json, print_notification, reading_table};
use crate::shell;

pub(crate) fn cmd_list(svc: &SugarService, json: bool) -> Result<()> {
    match svc.view_entries() {
        Outcome::Render(table) => {
            if json {
                print_json(&table.rows)?;
            } else {
                println!("{}", reading_table(&table.rows));
            }
            Ok(())
        }
        Outcome::Notify(n) => exit_with_notice(&n, json),
    }
}

pub(crate) fn cmd_plot(svc: &SugarService, json: bool) -> Result<()> {
    match svc.plot_entries() {
        Outcome::Render(plot) => {
            if json {
                print_json(&plot)
            } else {
                shell::show_plot(&plot)
            }
        }
        Outcome::Notify(n) => exit_with_notice(&n, json),
    }
}

fn exit_with_notice(n: &Notification, json: bool) -> Result<()> {
    if json {
        print_json(n)?;
    } else {
        print_notification(n);
    }
    if let Some(code) = notice_exit_code(n.severity) {
        process::exit(code);
    }
    Ok(())
}
