pub mod docx;
pub mod pdf;
pub mod xlsx;
