mod exam_result;

pub use exam_result::{ExamResultDetail, Medium};
