use super::WalkResult;
use dagwalk_core::format::escape_quotes;

/// Output in records format
///
/// ```text
/// H dagwalk=1 records=1 mode=walk root=R order=dfs-pre skip_duplicates=false visits=2 skipped=1
/// N 0 R links=2
/// N 1 A links=0
/// S lost "node not found: lost"
/// ```
pub fn output_records(result: &WalkResult) {
    for line in build_lines(result) {
        println!("{}", line);
    }
}

fn build_lines(result: &WalkResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.visits.len() + result.skipped.len() + 1);

    lines.push(format!(
        "H dagwalk=1 records=1 mode=walk root={} order={} skip_duplicates={} visits={} skipped={}",
        result.root,
        result.order,
        result.skip_duplicates,
        result.visits.len(),
        result.skipped.len()
    ));

    for visit in &result.visits {
        lines.push(format!("N {} {} links={}", visit.depth, visit.cid, visit.links));
    }

    for skipped in &result.skipped {
        lines.push(format!(
            "S {} \"{}\"",
            skipped.cid,
            escape_quotes(&skipped.error)
        ));
    }

    lines
}
