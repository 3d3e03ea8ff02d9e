pub mod dto;
pub mod task_list;
pub mod task_service;
