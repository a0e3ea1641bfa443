//! Main DataLens struct and public API.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::input::{Dataset, Loader, LoaderConfig, SourceMetadata};
use crate::insight::{self, InsightReport, NarrativeGenerator};
use crate::profile::{self, CorrelationMatrix, Eda, Profile};
use crate::schema::ColumnType;

/// Configuration for DataLens analysis.
#[derive(Debug, Clone, Default)]
pub struct DataLensConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
}

/// Result of analyzing one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source bytes.
    pub source: SourceMetadata,
    /// Shape, types and missing values.
    pub profile: Profile,
    /// Pairwise correlation of numeric columns.
    pub correlation: CorrelationMatrix,
    /// Text summary the insight was built from.
    pub summary: String,
    /// Insight text and how it was produced.
    pub insight: InsightReport,
}

impl AnalysisResult {
    /// The response body returned to upload clients.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            shape: self.profile.shape(),
            columns: self.profile.column_names.clone(),
            eda: self.profile.eda(),
            data_types: self.profile.data_types.clone(),
            correlation: self.correlation.clone(),
            ai_insights: self.insight.text.clone(),
        }
    }
}

/// Analysis response body.
///
/// `shape` serializes as a two-element `[rows, columns]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    pub eda: Eda,
    pub data_types: IndexMap<String, ColumnType>,
    pub correlation: CorrelationMatrix,
    pub ai_insights: String,
}

/// The main DataLens profiling engine.
///
/// Cheap to share behind an `Arc`; every call is independent.
pub struct DataLens {
    config: DataLensConfig,
    loader: Loader,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl DataLens {
    /// Create a new DataLens instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(DataLensConfig::default())
    }

    /// Create a DataLens instance with custom configuration.
    pub fn with_config(config: DataLensConfig) -> Self {
        let loader = Loader::with_config(config.loader.clone());
        Self {
            config,
            loader,
            narrator: None,
        }
    }

    /// Add a narrative generator for AI insights.
    ///
    /// Without one, insights are assembled locally from the summary.
    pub fn with_narrator(self, narrator: impl NarrativeGenerator + 'static) -> Self {
        self.with_shared_narrator(Arc::new(narrator))
    }

    /// Add a narrative generator that is also held elsewhere.
    pub fn with_shared_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn config(&self) -> &DataLensConfig {
        &self.config
    }

    /// The configured narrative generator, if any.
    pub fn narrator(&self) -> Option<&dyn NarrativeGenerator> {
        self.narrator.as_deref()
    }

    /// Load uploaded bytes under their declared file name.
    pub fn load(&self, bytes: &[u8], filename: &str) -> Result<(Dataset, SourceMetadata)> {
        self.loader.load(bytes, filename)
    }

    /// Produce an insight for a summary. Never fails.
    pub fn generate_insight(&self, summary: &str) -> InsightReport {
        insight::generate_insight(summary, self.narrator())
    }

    /// Analyze uploaded bytes.
    pub fn analyze_bytes(&self, bytes: &[u8], filename: &str) -> Result<AnalysisResult> {
        let (dataset, source) = self.load(bytes, filename)?;
        Ok(self.analyze_dataset(&dataset, source))
    }

    /// Analyze a data file on disk.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (dataset, source) = self.loader.load_file(path)?;
        Ok(self.analyze_dataset(&dataset, source))
    }

    fn analyze_dataset(&self, dataset: &Dataset, source: SourceMetadata) -> AnalysisResult {
        let profile = profile::profile(dataset);
        let correlation = profile::correlate(dataset);
        let summary = profile::summarize(&profile);
        let insight = self.generate_insight(&summary);

        info!(
            file = %source.file,
            rows = profile.rows,
            columns = profile.columns,
            numeric = correlation.len(),
            insight = %insight.source,
            "analysis complete"
        );

        AnalysisResult {
            source,
            profile,
            correlation,
            summary,
            insight,
        }
    }
}

impl Default for DataLens {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataLens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataLens")
            .field("config", &self.config)
            .field("narrator", &self.narrator.as_ref().map(|n| n.name()))
            .finish()
    }
}
