pub mod snapshot;

pub use snapshot::{DegreeSnapshot, PendingCourse, ProjectionDetails};
