//! Project domain module.

mod model;
mod repository;

pub use model::{Project, ProjectUpdate};
pub use repository::ProjectRepository;
