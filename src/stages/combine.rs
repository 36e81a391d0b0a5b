//! Combine: fetch subscriptions, merge them with the local lists and write
//! `netsource` and `allsource`.

use crate::app::{AppContext, Result};
use crate::domain::{Origin, SourceList};
use crate::fetcher::{fetch_subscriptions, read_subscriptions};
use crate::merge::{dedup, merge};
use crate::normalizer::sanitize_all;
use crate::store::{read_source_list, Columns, WriteOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub subscriptions: usize,
    pub failed_subscriptions: usize,
    /// Unique network entries written to `netsource`
    pub network_entries: usize,
    /// False when `netsource` could not be written and network entries were left out
    pub network_trusted: bool,
    pub merged_entries: usize,
    pub merged_written: bool,
}

pub async fn combine_sources(ctx: &AppContext) -> Result<CombineSummary> {
    let paths = &ctx.config.paths;
    let normalizer = &ctx.normalizer;

    let result = read_source_list(&paths.user_result, Origin::Result, normalizer);
    let local = read_source_list(&paths.local_source, Origin::Local, normalizer);
    let own = read_source_list(&paths.own_source, Origin::Own, normalizer);

    let urls = read_subscriptions(&paths.subscribe);
    let harvest = fetch_subscriptions(ctx.fetcher.as_ref(), &urls, normalizer).await;
    if harvest.failed.len() == urls.len() && !urls.is_empty() {
        tracing::warn!("Every subscription failed, no network entries this run");
    }

    let network = sanitize_all(harvest.entries);
    let network_unique = dedup(network.iter().cloned());
    let net_outcome = ctx
        .writer
        .write_or_dump(&paths.net_source, &network_unique, Columns::WithExtra);

    // Network data that could not be written cleanly is kept out of the merge.
    let network_trusted = net_outcome.is_written();
    if !network_trusted {
        tracing::warn!(
            "Leaving {} network entries out of {}",
            network.len(),
            paths.all_source.display()
        );
    }

    let mut lists: Vec<SourceList> = [result, local, own]
        .into_iter()
        .map(|list| SourceList::new(list.origin, sanitize_all(list.entries)))
        .collect();
    if network_trusted {
        lists.push(SourceList::new(Origin::Network, network));
    }

    let merged = merge(lists);
    let all_outcome = ctx
        .writer
        .write_or_dump(&paths.all_source, &merged, Columns::NameAddress);
    if let WriteOutcome::Written(report) = &all_outcome {
        tracing::info!(
            "Wrote {} entries to {}",
            report.records,
            paths.all_source.display()
        );
    }

    Ok(CombineSummary {
        subscriptions: urls.len(),
        failed_subscriptions: harvest.failed.len(),
        network_entries: network_unique.len(),
        network_trusted,
        merged_entries: merged.len(),
        merged_written: all_outcome.is_written(),
    })
}
