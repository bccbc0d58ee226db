pub mod section_ops;
pub mod task_ops;
pub mod trash_ops;
