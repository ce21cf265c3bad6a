//! Verse-by-verse study: pagination, assembly and orchestration, plus the
//! sectioned chapter study.

pub mod assemble;
pub mod batch;
pub mod rubrics;
pub mod service;
pub mod theology;

pub use assemble::{assemble, AssemblyMode, StudyHeading, Verse};
pub use batch::{page, PageBounds, VerseStats};
pub use service::{
    BootstrapError, FullStudy, HealthSnapshot, ProgressivePage, ProgressiveRequest, RubricRequest, RubricStudy,
    StudyError, StudyRequest, StudyService,
};
