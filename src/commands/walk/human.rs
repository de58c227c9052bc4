use super::WalkResult;
use crate::cli::Cli;

/// Output in human-readable format: one cid per line, indented by depth
pub fn output_human(cli: &Cli, result: &WalkResult) {
    for visit in &result.visits {
        println!("{}{}", "  ".repeat(visit.depth), visit.cid);
    }

    if cli.quiet {
        return;
    }
    for skipped in &result.skipped {
        println!("skipped {}: {}", skipped.cid, skipped.error);
    }
}
