//! # semtrace: Cross-Diagram Semantic Validation for Design Models
//!
//! Checks that a software design model (actors and use cases on the
//! behavioral side, classes and methods on the structural side) is internally
//! consistent:
//!
//! - **Naming Rules**: part-of-speech conventions for actor, use case, class
//!   and method names
//! - **Similarity Graph**: pairwise term-frequency cosine similarity between
//!   element names, clustered by greedy modularity agglomeration
//! - **Traceability**: a dense use-case × class matrix, implementing classes,
//!   missing functionality and actor-to-method mapping checks
//! - **Reporting**: violations grouped by category with a summary,
//!   recommendations and optional precision/recall against ground truth
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  API Layer (ModelValidator)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Rules      │  Similarity  │  Traceability  │  Report       │
//! │ • Naming    │ • Cosine     │ • Matrix       │ • Aggregator  │
//! │             │ • Graph      │ • Coverage     │ • Metrics     │
//! │             │ • Community  │ • Checks       │               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Linguistic service + per-run cache  │  I/O (JSON/YAML/XMI) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use semtrace::{DesignModel, ModelValidator, SemtraceConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = DesignModel::from_path("model.yaml")?;
//!     let validator = ModelValidator::new(SemtraceConfig::default())?;
//!     let outcome = validator.validate(&model)?;
//!
//!     println!("{} violations", outcome.report.summary.total_violations);
//!     Ok(())
//! }
//! ```

#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

// Model, configuration and error types
pub mod core {
    //! Core data model, configuration and errors.

    pub mod config;
    pub mod errors;
    pub mod model;
    pub mod violation;
}

pub mod linguistic {
    //! Linguistic service interface, the built-in tagger and the per-run cache.

    pub mod cache;
    pub mod features;
    pub mod lexicon;
    pub mod roles;
}

pub mod rules {
    //! Part-of-speech naming rules.

    pub mod naming;
}

pub mod similarity {
    //! Name similarity, the similarity graph and clustering.

    pub mod community;
    pub mod cosine;
    pub mod graph;
}

pub mod traceability {
    //! Use-case to class traceability.

    pub mod checks;
    pub mod coverage;
    pub mod lexical;
    pub mod matrix;
}

pub mod report {
    //! Violation aggregation and evaluation metrics.

    pub mod aggregator;
    pub mod metrics;
}

pub mod io {
    //! Model loaders and report writers.

    pub mod ground_truth;
    pub mod model_loader;
    pub mod reports;
    pub mod xmi;
}

pub mod api {
    //! High-level validation entry point.

    pub mod engine;
}

pub use api::engine::{ModelValidator, ValidationOutcome};
pub use core::config::SemtraceConfig;
pub use core::errors::{Result, ResultExt, SemtraceError};
pub use core::model::{DesignModel, Method, ModelElement, Relationship};
pub use core::violation::{RuleId, Severity, Violation, ViolationCategory};
pub use linguistic::features::{LinguisticFeatures, LinguisticService};
pub use report::aggregator::ValidationReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
