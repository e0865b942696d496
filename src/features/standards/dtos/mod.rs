mod standard_dto;

pub use standard_dto::{
    CreateStandardDto, ListStandardsQuery, StandardResponseDto, UpdateStandardDto,
};
