//! Walk command
mod human;
mod json;
mod records;

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, WalkArgs};
use dagwalk_core::config::Config;
use dagwalk_core::error::{DagwalkError, Result};
use dagwalk_core::format::OutputFormat;
use dagwalk_core::store::{Manifest, MemoryNode, MemoryStore, StoreError};
use dagwalk_core::{log_fetch_metrics, traverse, OnError, Options, Order, State};

/// Effective walk settings after merging flags over config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSettings {
    pub order: Order,
    pub skip_duplicates: bool,
    pub on_error: OnError,
}

impl WalkSettings {
    pub fn resolve(args: &WalkArgs, config: &Config) -> Self {
        let skip_duplicates = if args.keep_duplicates {
            false
        } else {
            args.skip_duplicates || config.walk.skip_duplicates
        };

        Self {
            order: args.order.unwrap_or(config.walk.order),
            skip_duplicates,
            on_error: args.on_error.unwrap_or(config.walk.on_error),
        }
    }
}

/// One visited node in the output
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    pub cid: String,
    pub depth: usize,
    pub links: usize,
}

/// A link that could not be fetched and was skipped
#[derive(Debug, Clone, Serialize)]
pub struct Skipped {
    pub cid: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalkResult {
    pub root: String,
    pub order: Order,
    pub skip_duplicates: bool,
    pub visits: Vec<Visit>,
    pub skipped: Vec<Skipped>,
}

/// Execute the walk command
pub fn execute(cli: &Cli, args: &WalkArgs, config: &Config, start: Instant) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;

    let (root, store) = match &args.root {
        Some(cid) => {
            let store = manifest.build_store()?;
            let node = store
                .node(cid)
                .ok_or_else(|| DagwalkError::NodeNotFound {
                    cid: cid.to_string(),
                })?;
            (node, store)
        }
        None => manifest.into_store()?,
    };

    if cli.verbose {
        debug!(elapsed = ?start.elapsed(), nodes = store.len(), "load_manifest");
    }

    let settings = WalkSettings::resolve(args, config);
    let result = walk(root, &store, settings)?;

    log_fetch_metrics!(store.metrics(), "walk");
    debug!(elapsed = ?start.elapsed(), visits = result.visits.len(), "walk");

    match cli.format {
        OutputFormat::Human => human::output_human(cli, &result),
        OutputFormat::Json => json::output_json(&result)?,
        OutputFormat::Records => records::output_records(&result),
    }

    Ok(())
}

/// Traverse the store, collecting visits and skipped links
fn walk(root: Arc<MemoryNode>, store: &MemoryStore, settings: WalkSettings) -> Result<WalkResult> {
    let root_cid = root.cid.to_string();
    let mut visits = Vec::new();
    let mut skipped = Vec::new();

    let mut opts = Options::new(store, |s: &State<Arc<MemoryNode>>| {
        visits.push(Visit {
            cid: s.node.cid.to_string(),
            depth: s.depth,
            links: s.node.links.len(),
        });
        Ok(())
    })
    .with_order(settings.order)
    .with_skip_duplicates(settings.skip_duplicates);

    if settings.on_error == OnError::Skip {
        opts = opts.with_recover(|err: StoreError| {
            skipped.push(Skipped {
                cid: err.cid().to_string(),
                error: err.to_string(),
            });
            Ok(())
        });
    }

    traverse(root, opts).map_err(|e| DagwalkError::traversal(&e))?;

    Ok(WalkResult {
        root: root_cid,
        order: settings.order,
        skip_duplicates: settings.skip_duplicates,
        visits,
        skipped,
    })
}
