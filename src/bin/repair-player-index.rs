//! Reassign the player indices of a match document from the order of each slot's first question.
//!
//! Usage: `repair-player-index <storage_root> <match_id>`
//!
//! The document is rewritten outside the mutation queue: run it while the node is stopped.

use std::env;

use anyhow::{Context, bail};
use quiz_data_node::{
    dao::match_store::{MatchStore, fs::FsMatchStore},
    state::{sections::SectionKind, statistics},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let (Some(root), Some(match_id)) = (args.next(), args.next()) else {
        bail!("usage: repair-player-index <storage_root> <match_id>");
    };

    let store = FsMatchStore::open(&root)
        .await
        .with_context(|| format!("opening storage root {root}"))?;
    let mut document = store
        .load(&match_id)
        .await
        .with_context(|| format!("loading match {match_id}"))?;

    for kind in SectionKind::ALL {
        if let Some(section) = document.sections.partitioned_mut(kind) {
            section.reindex_by_first_order();
            let indices: Vec<_> = section
                .players
                .iter()
                .map(|slot| (slot.player_index, slot.questions.len()))
                .collect();
            println!("{kind}: {indices:?}");
        }
    }

    statistics::refresh(&mut document).context("refreshing statistics")?;
    store
        .save(&match_id, document)
        .await
        .with_context(|| format!("saving match {match_id}"))?;
    println!("match {match_id} repaired");
    Ok(())
}
