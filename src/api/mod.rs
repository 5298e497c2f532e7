pub(crate) mod admin;
pub(crate) mod ai;
pub(crate) mod contents;
pub(crate) mod errors;
pub(crate) mod grades;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod materials;
pub(crate) mod reference;
pub(crate) mod router;
pub(crate) mod students;
pub(crate) mod validation;
