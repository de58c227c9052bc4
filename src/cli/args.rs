use super::parse::{parse_cid, parse_on_error, parse_order};
use clap::Args;
use dagwalk_core::{Cid, OnError, Order};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct WalkArgs {
    /// Path to a JSON DAG manifest
    pub manifest: PathBuf,

    /// Start from this cid instead of the manifest root
    #[arg(long, value_parser = parse_cid)]
    pub root: Option<Cid>,

    /// Traversal order [dfs-pre, dfs-post, bfs]
    #[arg(long, short, value_parser = parse_order)]
    pub order: Option<Order>,

    /// Visit each distinct node at most once
    #[arg(long)]
    pub skip_duplicates: bool,

    /// Visit shared nodes once per link, even if the config says otherwise
    #[arg(long, conflicts_with = "skip_duplicates")]
    pub keep_duplicates: bool,

    /// What to do when a linked node cannot be fetched [abort, skip]
    #[arg(long, value_parser = parse_on_error)]
    pub on_error: Option<OnError>,
}
