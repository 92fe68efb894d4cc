//! Search orchestration: lookup, flatten, then recommendations per result.

use tokio::task::JoinSet;

use finrisk_core::config::SearchSettings;
use finrisk_core::{EntityResult, ExploreResult, RelatedEntity, SearchTerm};
use finrisk_graph::{GraphClient, GraphError};

use crate::error::Result;

/// Runs the two search flows against the knowledge graph.
#[derive(Debug, Clone)]
pub struct SearchService {
    graph: GraphClient,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(graph: GraphClient, settings: SearchSettings) -> Self {
        Self { graph, settings }
    }

    /// Matching entities, each with its first-degree related entities attached.
    ///
    /// Issues one lookup plus one recommendation query per result. Any
    /// failing query fails the whole search.
    pub async fn search(&self, term: &SearchTerm) -> Result<Vec<EntityResult>> {
        let mut results = self
            .graph
            .search_entities(term, self.settings.property_mode)
            .await?;

        let related = self.fetch_recommendations(&results).await?;
        for (result, related) in results.iter_mut().zip(related) {
            result.recommendations = Some(related);
        }

        tracing::info!(term = %term, results = results.len(), "Search complete");
        Ok(results)
    }

    /// Two-hop exploration from entities named like `term`.
    pub async fn explore(&self, term: &SearchTerm) -> Result<Vec<ExploreResult>> {
        let results = self.graph.explore(term).await?;
        tracing::info!(term = %term, results = results.len(), "Exploration complete");
        Ok(results)
    }

    /// Fetch recommendations for every result, at most `fan_out` in flight.
    /// The returned lists line up with `results`; blank-node results get an
    /// empty list without a query.
    async fn fetch_recommendations(
        &self,
        results: &[EntityResult],
    ) -> Result<Vec<Vec<RelatedEntity>>> {
        let limit = self.settings.fan_out();
        let mut slots: Vec<Vec<RelatedEntity>> = vec![Vec::new(); results.len()];
        let mut pending: JoinSet<std::result::Result<(usize, Vec<RelatedEntity>), GraphError>> =
            JoinSet::new();

        for (index, result) in results.iter().enumerate() {
            // Blank node labels don't survive into a second query.
            if result.blank_node {
                continue;
            }

            while pending.len() >= limit {
                if let Some(joined) = pending.join_next().await {
                    let (i, related) = joined??;
                    slots[i] = related;
                }
            }

            let graph = self.graph.clone();
            let entity = result.entity.clone();
            pending.spawn(async move {
                graph
                    .recommendations(&entity)
                    .await
                    .map(|related| (index, related))
            });
        }

        while let Some(joined) = pending.join_next().await {
            let (i, related) = joined??;
            slots[i] = related;
        }

        Ok(slots)
    }
}
