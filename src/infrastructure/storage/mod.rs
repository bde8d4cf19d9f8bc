pub(crate) mod fs_store;
pub(crate) mod sqlite_store;
