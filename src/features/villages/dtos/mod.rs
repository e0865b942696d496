mod village_dto;

pub use village_dto::{CreateVillageDto, ListVillagesQuery, UpdateVillageDto, VillageResponseDto};
