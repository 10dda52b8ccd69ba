pub(crate) mod batch;
pub(crate) mod builder;
pub(crate) mod cache;
pub(crate) mod factory;
