//! CLI command handlers, one file per command.

mod add;
mod completions;
mod list;
mod live;
mod remove;
mod rename;
mod search;
mod show;

pub use add::run_add;
pub use completions::run_completions;
pub use list::run_list;
pub use live::run_live;
pub use remove::run_remove;
pub use rename::run_rename;
pub use search::run_search;
pub use show::run_show;

use heroes_core::{Hero, MessageLog};
use std::io::{self, Write};

pub(crate) fn print_heroes(heroes: &[Hero]) {
    // A closed stdout (e.g. `| head`) is not worth failing the command over.
    let _ = write_heroes(&mut io::stdout().lock(), heroes);
}

pub(crate) fn write_heroes(out: &mut impl Write, heroes: &[Hero]) -> io::Result<()> {
    if heroes.is_empty() {
        return writeln!(out, "No heroes.");
    }
    writeln!(out, "{:<6} {}", "ID", "NAME")?;
    for h in heroes {
        writeln!(out, "{:<6} {}", h.id, h.name)?;
    }
    Ok(())
}

/// Prints messages not yet shown, to stderr so stdout stays pipeable.
pub fn print_messages(messages: &MessageLog) {
    for m in messages.drain() {
        eprintln!("{m}");
    }
}
