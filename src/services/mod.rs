pub(crate) mod grading;
pub(crate) mod judge;
pub(crate) mod question_import;
