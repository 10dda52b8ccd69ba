pub(crate) mod meter;
