pub mod catalog;
pub mod priorities;
pub mod responses;
pub mod types;

pub use catalog::{load_catalog, load_submission, Catalog, SurveySubmission};
pub use priorities::{FamilyPriorities, PriorityRank};
pub use responses::{Responder, Responses};
pub use types::{
    Category, ChildDevelopment, EmotionalLabor, Frequency, Invisibility, Question, QuestionRecord,
};
