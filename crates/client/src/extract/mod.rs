//! Field-level extraction primitives shared by the site parsers.
//!
//! ### Fallback Chains
//! - Every vacancy field is resolved by an ordered [`FallbackChain`] of
//!   strategies, from precise selectors down to keyword heuristics.
//! - The first strategy yielding a present value wins.
//!
//! ### Text Heuristics
//! - Salary ranges, currencies and the per-site single-figure policy.
//! - Work format keyword classification with a fixed priority.
//! - "N+ years" experience requirements.
//!
//! ### Skills
//! - A dictionary of canonical skill names and non-skill stop words, used to
//!   normalize raw tag lists and to scan free text.

pub mod chain;
pub mod dom;
pub mod experience;
pub mod salary;
pub mod skills;
pub mod work_format;

pub use chain::{FallbackChain, Present};
pub use experience::YearsPattern;
pub use salary::{Salary, SalaryParser, SingleFigure};
pub use skills::{SkillDictionary, dedup_case_insensitive};
