//! Core library for deckgen: plan a slide outline from free-form text with a
//! language model, then render it to a static HTML deck.
//!
//! ```text
//! text --Planner::plan--> DeckOutline --Generator::generate--> output/
//!                              |                                 index.html
//!                         plan.json                              slides.json
//!                                                                pages/NN/index.html
//! ```

pub mod assets;
pub mod completion;
pub mod config;
pub mod files;
pub mod generator;
pub mod outline;
pub mod planner;
pub mod template;

pub use config::DeckConfig;
pub use generator::{GenerationReport, Generator};
pub use outline::{DeckOutline, Layout, Slide, SlideKind};
pub use planner::{PlanSource, PlannedDeck, Planner};
