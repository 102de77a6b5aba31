pub(crate) mod colleges;
pub(crate) mod questions;
pub(crate) mod student_answers;
pub(crate) mod users;
