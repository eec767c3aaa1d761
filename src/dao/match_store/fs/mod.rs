mod paths;
mod store;

pub use store::FsMatchStore;
