use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use social_graph_core::{GraphStore, SharedGraph};
use tracing::info;

use crate::config::Settings;

/// Read both dataset files and parse them into a store.
pub fn read_datasets(settings: &Settings) -> social_graph_core::Result<GraphStore> {
    let persons = std::fs::read_to_string(&settings.person_file)?;
    let relationships = std::fs::read_to_string(&settings.relationship_file)?;
    Ok(social_graph_core::load(&persons, &relationships)?)
}

/// Load, check the memory cap, and publish. Nothing is published on error.
pub fn load_and_publish(shared: &SharedGraph, settings: &Settings) -> anyhow::Result<Duration> {
    let start = Instant::now();
    info!(
        persons = %settings.person_file.display(),
        relationships = %settings.relationship_file.display(),
        "loading graph"
    );

    let graph = read_datasets(settings).with_context(|| {
        format!(
            "loading {} and {}",
            settings.person_file.display(),
            settings.relationship_file.display()
        )
    })?;

    let memory_mb = graph.memory_usage() / (1024 * 1024);
    if memory_mb > settings.max_memory_mb as usize {
        bail!(
            "loaded graph uses {}MB, exceeds max_memory_mb={}MB",
            memory_mb,
            settings.max_memory_mb
        );
    }

    let load_time = start.elapsed();
    shared.publish(graph, load_time);
    Ok(load_time)
}
