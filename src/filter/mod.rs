//! Filter state and natural-language filter extraction
//!
//! Search constraints are held in a single immutable [`FilterConfig`] value.
//! The config is never mutated field-by-field; every change goes through the
//! [`FilterEvent`] reducer and produces a fresh value.
//!
//! # Query keywords
//!
//! Free-text queries are mapped onto filter fields by a fixed rule table:
//!
//! ```text
//! low molecular weight, small molecule     mol weight 100-300
//! high molecular weight, large molecule    mol weight 400-600
//! high activity, active                    experimentally active only
//! inactive, low activity                   experimentally inactive only
//! predicted active / predicted inactive    model prediction flag
//! tpsa below 90, tpsa < 90                 TPSA 0-90
//! tpsa above 50, tpsa > 50                 TPSA 50-160
//! high lipophilicity, lipophilic           LogP 3-5
//! low lipophilicity, hydrophilic           LogP -1-1
//! egfr, hiv, covid, sars                   target name
//! ```
//!
//! Rules run top-to-bottom against the lower-cased text; when several rules
//! write the same field, the last one wins.

pub mod error;
pub mod matcher;
pub mod nlq;
pub mod state;

pub use error::FilterError;
pub use matcher::{matches_compound, to_search_query};
pub use nlq::extract;
pub use state::{FilterConfig, FilterEvent, FilterPatch, Range};
