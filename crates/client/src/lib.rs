//! Client code for jobparse.
//!
//! This crate provides the HTTP fetch pipeline, the per-site vacancy parsers
//! and the dispatcher that routes a URL to the right parser.

pub mod dispatch;
pub mod extract;
pub mod fetch;
pub mod sites;

pub use dispatch::Dispatcher;
pub use extract::{SingleFigure, SkillDictionary};
pub use fetch::{FetchClient, FetchConfig, FetchedPage, PageFetcher};
pub use sites::{GetmatchHints, GetmatchParser, HabrParser, HhParser, Site, SiteParser};
