//! CLI output formatting

use crate::core::{Pickle, PickleArg};
use console::Emoji;

pub use console::style;

pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Format a pickle with its tags and steps for `cuke list`
pub fn format_pickle(pickle: &Pickle) -> String {
    let mut out = format!("  {} {}", style(&pickle.name).bold(), style(&pickle.id).dim());

    let tags = pickle.tag_names();
    if !tags.is_empty() {
        out.push_str(&format!(" {}", style(tags.join(" ")).cyan()));
    }

    for step in &pickle.steps {
        out.push_str(&format!("\n    - {}", step.text));
        match &step.argument {
            Some(PickleArg::DocString(doc)) => {
                out.push_str(&format!(" {}", style(format!("[doc string, {} lines]", doc.content.lines().count())).dim()));
            }
            Some(PickleArg::DataTable(table)) => {
                out.push_str(&format!(" {}", style(format!("[table, {} rows]", table.rows.len())).dim()));
            }
            None => {}
        }
    }

    out
}
