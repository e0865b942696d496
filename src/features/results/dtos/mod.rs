mod result_dto;

pub use result_dto::{
    ListResultsQuery, ResultResponseDto, SubmitResultDto, UpdateResultDto,
};
