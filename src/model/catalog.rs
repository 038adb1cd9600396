use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::MountPoint;
use crate::transition::TransitionChart;

use super::{ChartDefinition, ChartModel, TransitionDefinition};

/// Built charts by name; transitions borrow their endpoints from here.
#[derive(Debug, Default)]
pub struct ChartCatalog {
    charts: IndexMap<String, ChartModel>,
}

impl ChartCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `chart`, returning the chart it replaced.
    pub fn insert(&mut self, chart: ChartModel) -> Option<ChartModel> {
        self.charts.insert(chart.name().to_owned(), chart)
    }

    /// Builds a chart and stores it; nothing is stored when the build fails.
    pub fn build(
        &mut self,
        definition: &ChartDefinition,
        mount: MountPoint,
    ) -> ChartResult<&ChartModel> {
        let chart = ChartModel::build(definition, mount)?;
        let name = chart.name().to_owned();
        self.charts.insert(name.clone(), chart);
        self.get(&name)
    }

    pub fn get(&self, name: &str) -> ChartResult<&ChartModel> {
        self.charts.get(name).ok_or_else(|| ChartError::ChartNotFound {
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.charts.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    /// Resolves the transition's endpoints by name and builds it on `mount`.
    pub fn transition(
        &self,
        definition: &TransitionDefinition,
        mount: MountPoint,
    ) -> ChartResult<TransitionChart<'_>> {
        let from = self.get(&definition.from)?;
        let to = self.get(&definition.to)?;
        debug!(from = %definition.from, to = %definition.to, "resolved transition endpoints");
        TransitionChart::build(definition, from, to, mount)
    }
}
