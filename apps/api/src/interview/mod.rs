// Interview screening: answer scoring, the admission pipeline, and the
// passed-candidate registry behind the HR endpoints.

pub mod admission;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod scoring;
