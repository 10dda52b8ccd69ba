pub(crate) mod rotozoom;
