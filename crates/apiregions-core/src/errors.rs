use thiserror::Error;

/// Result type alias using ApiRegionsError
pub type Result<T> = std::result::Result<T, ApiRegionsError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CI output. Kinds are grouped into coarse
/// [`ErrorCategory`] buckets for callers that only care about the class of
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Usage
    MissingRegionAllowList,
    NoFeaturesSelected,

    // Configuration
    UnknownParentRegion,
    CycleDetected,
    DuplicateRegion,
    MalformedExtension,
    InvalidDescriptor,
    InvalidArtifactId,
    MalformedExportHeader,
    InvalidConfig,

    // Analysis outcome
    OverlapFound,

    // Integration/IO
    NotFound,
    Io,
    Serialization,

    // Internal
    Internal,
}

/// Coarse classification of an [`ExErrorKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller invoked the analysis incorrectly; no work was attempted
    Usage,
    /// A feature, header or config file is structurally wrong
    Configuration,
    /// A collaborator failed to read something
    Io,
    /// The analysis ran and found a policy violation
    Analysis,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingRegionAllowList => "ERR_MISSING_REGION_ALLOW_LIST",
            ExErrorKind::NoFeaturesSelected => "ERR_NO_FEATURES_SELECTED",
            ExErrorKind::UnknownParentRegion => "ERR_UNKNOWN_PARENT_REGION",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::DuplicateRegion => "ERR_DUPLICATE_REGION",
            ExErrorKind::MalformedExtension => "ERR_MALFORMED_EXTENSION",
            ExErrorKind::InvalidDescriptor => "ERR_INVALID_DESCRIPTOR",
            ExErrorKind::InvalidArtifactId => "ERR_INVALID_ARTIFACT_ID",
            ExErrorKind::MalformedExportHeader => "ERR_MALFORMED_EXPORT_HEADER",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::OverlapFound => "ERR_OVERLAP_FOUND",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Get the coarse category of this kind
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExErrorKind::MissingRegionAllowList | ExErrorKind::NoFeaturesSelected => {
                ErrorCategory::Usage
            }
            ExErrorKind::UnknownParentRegion
            | ExErrorKind::CycleDetected
            | ExErrorKind::DuplicateRegion
            | ExErrorKind::MalformedExtension
            | ExErrorKind::InvalidDescriptor
            | ExErrorKind::InvalidArtifactId
            | ExErrorKind::MalformedExportHeader
            | ExErrorKind::InvalidConfig => ErrorCategory::Configuration,
            ExErrorKind::OverlapFound => ErrorCategory::Analysis,
            ExErrorKind::NotFound | ExErrorKind::Io | ExErrorKind::Serialization => {
                ErrorCategory::Io
            }
            ExErrorKind::Internal => ErrorCategory::Internal,
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the feature /
/// region context the failure happened in.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    feature_id: Option<String>,
    region: Option<String>,
    bundle_id: Option<String>,
    message: String,
    regions: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            feature_id: None,
            region: None,
            bundle_id: None,
            message: String::new(),
            regions: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add feature ID context
    pub fn with_feature_id(mut self, id: impl Into<String>) -> Self {
        self.feature_id = Some(id.into());
        self
    }

    /// Add region name context
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Add bundle coordinate context
    pub fn with_bundle_id(mut self, id: impl Into<String>) -> Self {
        self.bundle_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the region names involved (the members of a parent cycle)
    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the coarse category
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the feature ID context, if any
    pub fn feature_id(&self) -> Option<&str> {
        self.feature_id.as_deref()
    }

    /// Get the region context, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Get the bundle coordinate context, if any
    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the involved region names, if any (populated on CycleDetected)
    pub fn regions(&self) -> Option<&[String]> {
        self.regions.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(feature_id) = &self.feature_id {
            write!(f, " (feature: {})", feature_id)?;
        }
        if let Some(region) = &self.region {
            write!(f, " (region: {})", region)?;
        }
        if let Some(bundle_id) = &self.bundle_id {
            write!(f, " (bundle: {})", bundle_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for API region resolution and overlap checking
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiRegionsError {
    // ===== Usage Errors =====
    /// The region allow-list is absent or empty
    #[error("Please specify at least one region to check for duplicate exports")]
    NoRegionsSpecified,

    /// The feature selection matched nothing
    #[error("No features selected for comparison: {selection}")]
    NoFeaturesSelected { selection: String },

    // ===== Configuration Errors =====
    /// A region names a parent that the feature does not declare
    #[error("Region {region} in feature {feature_id} declares unknown parent region {parent}")]
    UnknownParentRegion {
        feature_id: String,
        region: String,
        parent: String,
    },

    /// Region parents form a cycle
    #[error("Cycle detected in parent regions of feature {feature_id}: {cycle:?}")]
    RegionParentCycle {
        feature_id: String,
        cycle: Vec<String>,
    },

    /// Two regions of one feature share a name
    #[error("Region {region} is declared more than once in feature {feature_id}")]
    DuplicateRegion { feature_id: String, region: String },

    /// The region extension has a structure the resolver cannot use
    #[error("Malformed api-regions extension in feature {feature_id}: {reason}")]
    MalformedExtension { feature_id: String, reason: String },

    /// A feature descriptor could not be read into the model
    #[error("Invalid feature descriptor {source_name}: {reason}")]
    InvalidDescriptor { source_name: String, reason: String },

    /// An artifact coordinate is not of the form group:artifact[:type[:classifier]]:version
    #[error("Invalid artifact id '{value}': {reason}")]
    InvalidArtifactId { value: String, reason: String },

    /// An Export-Package style header does not parse
    #[error("Malformed export header '{header}': {reason}")]
    MalformedExportHeader { header: String, reason: String },

    /// A bundle manifest exists but cannot be parsed
    #[error("Malformed manifest at {location}: {reason}")]
    MalformedManifest { location: String, reason: String },

    /// A check configuration value is invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // ===== Analysis Outcome =====
    /// At least one pair of (feature, region) keys exports the same package
    #[error("Errors found: {count} overlapping export pair(s)\n{summary}")]
    OverlapFound { count: usize, summary: String },

    // ===== IO Errors =====
    /// A bundle could not be located in the manifest source
    #[error("Bundle {bundle_id} not found at {location}")]
    BundleNotFound { bundle_id: String, location: String },

    /// A file could not be read
    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON/YAML encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiRegionsError {
    /// Build an I/O error for `path` from a `std::io::Error`
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        ApiRegionsError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from ApiRegionsError to ExError
impl From<ApiRegionsError> for ExError {
    fn from(err: ApiRegionsError) -> Self {
        match err {
            ApiRegionsError::NoRegionsSpecified => {
                ExError::new(ExErrorKind::MissingRegionAllowList)
                    .with_message("no region allow-list supplied")
            }

            ApiRegionsError::NoFeaturesSelected { selection } => {
                ExError::new(ExErrorKind::NoFeaturesSelected)
                    .with_message(format!("selection matched no features: {}", selection))
            }

            ApiRegionsError::UnknownParentRegion {
                feature_id,
                region,
                parent,
            } => ExError::new(ExErrorKind::UnknownParentRegion)
                .with_op("resolve_regions")
                .with_feature_id(feature_id)
                .with_region(region)
                .with_message(format!("unknown parent region {}", parent)),

            ApiRegionsError::RegionParentCycle { feature_id, cycle } => {
                ExError::new(ExErrorKind::CycleDetected)
                    .with_op("resolve_regions")
                    .with_feature_id(feature_id)
                    .with_message("region parents form a cycle")
                    .with_regions(cycle)
            }

            ApiRegionsError::DuplicateRegion { feature_id, region } => {
                ExError::new(ExErrorKind::DuplicateRegion)
                    .with_op("resolve_regions")
                    .with_feature_id(feature_id)
                    .with_region(region)
                    .with_message("region declared more than once")
            }

            ApiRegionsError::MalformedExtension { feature_id, reason } => {
                ExError::new(ExErrorKind::MalformedExtension)
                    .with_op("resolve_regions")
                    .with_feature_id(feature_id)
                    .with_message(reason)
            }

            ApiRegionsError::InvalidDescriptor {
                source_name,
                reason,
            } => ExError::new(ExErrorKind::InvalidDescriptor)
                .with_op("read_descriptor")
                .with_feature_id(source_name)
                .with_message(reason),

            ApiRegionsError::InvalidArtifactId { value, reason } => {
                ExError::new(ExErrorKind::InvalidArtifactId)
                    .with_bundle_id(value)
                    .with_message(reason)
            }

            ApiRegionsError::MalformedExportHeader { header, reason } => {
                ExError::new(ExErrorKind::MalformedExportHeader)
                    .with_op("parse_export_header")
                    .with_message(format!("{} in '{}'", reason, header))
            }

            ApiRegionsError::MalformedManifest { location, reason } => {
                ExError::new(ExErrorKind::Io)
                    .with_op("read_manifest")
                    .with_message(format!("{}: {}", location, reason))
            }

            ApiRegionsError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            ApiRegionsError::OverlapFound { count, .. } => ExError::new(ExErrorKind::OverlapFound)
                .with_op("detect_overlaps")
                .with_message(format!("{} overlapping export pair(s)", count)),

            ApiRegionsError::BundleNotFound {
                bundle_id,
                location,
            } => ExError::new(ExErrorKind::NotFound)
                .with_op("export_header")
                .with_bundle_id(bundle_id)
                .with_message(format!("bundle not found at {}", location)),

            ApiRegionsError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_message(format!("{}: {}", path, message)),

            ApiRegionsError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            ApiRegionsError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ApiRegionsError
impl From<serde_json::Error> for ApiRegionsError {
    fn from(err: serde_json::Error) -> Self {
        ApiRegionsError::Serialization {
            message: err.to_string(),
        }
    }
}
