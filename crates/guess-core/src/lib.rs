#![deny(warnings)]
pub mod belief;
pub mod compile;
pub mod integrate;
pub mod model;
pub mod select;

pub use belief::BeliefState;
pub use compile::{ItemEntry, QuestionIndex, compile};
pub use integrate::integrate;
pub use model::catalog::{Catalog, CatalogError, Credit, Item, ItemUpdate, ReleaseUpdate, Tag};
pub use model::question::{Expectation, Question, QuestionGroup, QuestionId};
pub use select::select_next;
