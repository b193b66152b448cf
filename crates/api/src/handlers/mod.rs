pub mod blog_post;
pub mod project;
pub mod service;
pub mod user;
