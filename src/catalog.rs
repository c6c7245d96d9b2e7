pub(crate) mod model;
pub mod templates;
