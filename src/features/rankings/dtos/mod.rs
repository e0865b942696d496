mod ranking_dto;

pub use ranking_dto::{
    GroupBy, GroupCountDto, GroupQuery, RankedResultDto, RankingQuery, StandardGroupDto,
    SummaryDto,
};
