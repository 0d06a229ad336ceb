// Items in this module are only used in test code.

mod temp_repo;

pub(crate) use temp_repo::TempRepo;
