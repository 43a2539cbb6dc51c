mod entry;
mod helpers;
mod view;

pub(crate) use entry::{cmd_add, cmd_reset};
pub(crate) use helpers::format_level;
pub(crate) use view::{cmd_list, cmd_plot};
