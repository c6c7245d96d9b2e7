pub(crate) mod backend;
pub(crate) mod blur_cpu;
pub(crate) mod composite_cpu;
pub(crate) mod cpu;
pub(crate) mod export;
