pub(crate) mod frame;
pub(crate) mod logo;
pub(crate) mod orchestrator;
pub(crate) mod plan;
pub(crate) mod text;
