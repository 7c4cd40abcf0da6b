use std::collections::BTreeSet;
use std::path::Path;

use airport_explorer::config::ExplorerConfig;
use airport_explorer::data::query::count_by_type;
use airport_explorer::data::summary::PivotTable;
use airport_explorer::data::{
    loader, AirportQuery, AirportType, Dataset, ElevationRange, QueryEngine, RegionMode,
    RegionSelector,
};

use crate::color::TypeColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// Query engine over the loaded file (None until a load succeeds).
    pub engine: Option<QueryEngine>,

    /// Region codes offered in the selector.
    pub regions: Vec<String>,
    /// Selected region in single-region mode.
    pub selected_region: String,
    /// Selected regions in multi-region mode.
    pub selected_regions: BTreeSet<String>,

    /// Slider extent, taken from the dataset.
    pub elevation_bounds: (f64, f64),
    pub elevation_min: f64,
    pub elevation_max: f64,

    /// Types present in the dataset, first-seen order.
    pub available_types: Vec<AirportType>,
    pub selected_types: BTreeSet<AirportType>,

    /// Rows passing the current filters, and derived figures.
    pub result: Dataset,
    pub result_count: usize,
    pub type_counts: Vec<(AirportType, usize)>,
    pub pivot: Option<PivotTable>,

    pub type_colors: TypeColors,

    /// Status / error message shown in the UI. Replaced on every refilter.
    pub status_message: Option<String>,
    /// Problem with the config file; stays until the app exits.
    pub config_warning: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        let selected_region = config.regions.first().cloned().unwrap_or_default();
        Self {
            regions: config.regions.clone(),
            selected_regions: config.regions.iter().cloned().collect(),
            selected_region,
            config,
            engine: None,
            elevation_bounds: (0.0, 0.0),
            elevation_min: 0.0,
            elevation_max: 0.0,
            available_types: Vec::new(),
            selected_types: BTreeSet::new(),
            result: Dataset::default(),
            result_count: 0,
            type_counts: Vec::new(),
            pivot: None,
            type_colors: TypeColors::default(),
            status_message: None,
            config_warning: None,
        }
    }

    /// Load a file, replacing whatever was loaded before. On failure the
    /// engine is cleared and the error is kept for display.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} airports across regions {:?}",
                    dataset.len(),
                    dataset.regions()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load airports: {e}");
                self.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the filters around it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.available_types = dataset.types();
        self.selected_types = self
            .available_types
            .iter()
            .take(self.config.default_type_count)
            .cloned()
            .collect();
        self.type_colors = TypeColors::new(&self.available_types);

        self.regions = self.config.regions.clone();
        for region in dataset.regions() {
            if !self.regions.contains(&region) {
                self.regions.push(region);
            }
        }
        if !self.regions.contains(&self.selected_region) {
            self.selected_region = self.regions.first().cloned().unwrap_or_default();
        }

        let (lo, hi) = dataset.elevation_extent().unwrap_or((0.0, 0.0));
        self.elevation_bounds = (lo.floor(), hi.ceil());
        (self.elevation_min, self.elevation_max) = self.elevation_bounds;

        self.engine = Some(QueryEngine::new(
            dataset,
            self.config.buckets.clone(),
            self.config.effective_cache_capacity(),
        ));
        self.status_message = None;
        self.refilter();
    }

    fn clear(&mut self) {
        self.engine = None;
        self.available_types.clear();
        self.selected_types.clear();
        self.result = Dataset::default();
        self.result_count = 0;
        self.type_counts.clear();
        self.pivot = None;
    }

    pub fn region_selector(&self) -> RegionSelector {
        match self.config.region_mode {
            RegionMode::Single => RegionSelector::One(self.selected_region.clone()),
            RegionMode::Multi => RegionSelector::Any(self.selected_regions.clone()),
        }
    }

    /// Heading text for the current region selection.
    pub fn region_label(&self) -> String {
        match self.config.region_mode {
            RegionMode::Single => self.selected_region.clone(),
            RegionMode::Multi => self
                .selected_regions
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Re-run the query after any filter change.
    pub fn refilter(&mut self) {
        if self.engine.is_none() {
            return;
        }

        let elevation = match ElevationRange::new(self.elevation_min, self.elevation_max) {
            Ok(range) => range,
            Err(e) => {
                self.status_message = Some(e.to_string());
                self.result = Dataset::default();
                self.result_count = 0;
                self.type_counts.clear();
                self.pivot = None;
                return;
            }
        };

        let query = AirportQuery::new(
            self.region_selector(),
            elevation,
            self.selected_types.iter().cloned(),
        );
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let (result, count) = engine.filter(&query);

        self.pivot = Some(engine.pivot(&result));
        self.type_counts = count_by_type(&result);
        self.result = result;
        self.result_count = count;
        self.status_message = None;
    }

    pub fn toggle_type(&mut self, kind: &AirportType) {
        if !self.selected_types.remove(kind) {
            self.selected_types.insert(kind.clone());
        }
        self.refilter();
    }

    pub fn select_all_types(&mut self) {
        self.selected_types = self.available_types.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_no_types(&mut self) {
        self.selected_types.clear();
        self.refilter();
    }

    pub fn toggle_region(&mut self, region: &str) {
        if !self.selected_regions.remove(region) {
            self.selected_regions.insert(region.to_string());
        }
        self.refilter();
    }
}
