//! Typed repositories over the [`DocumentStore`](crate::store::DocumentStore).

mod document_repo;
mod user_repo;

pub use document_repo::DocumentRepo;

use crate::models::blog_post::BlogPost;
use crate::models::project::Project;
use crate::models::service::Service;
use crate::models::user::User;

pub type ProjectRepo = DocumentRepo<Project>;
pub type BlogPostRepo = DocumentRepo<BlogPost>;
pub type ServiceRepo = DocumentRepo<Service>;
pub type UserRepo = DocumentRepo<User>;
