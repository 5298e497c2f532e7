pub(crate) mod assignments;
pub(crate) mod contents;
pub(crate) mod grades;
pub(crate) mod materials;
pub(crate) mod store;
pub(crate) mod students;
