use cosmwasm_std::Empty;

pub mod transaction;

pub type Response = cosmwasm_std::Response<Empty>;
pub type CosmosMsg = cosmwasm_std::CosmosMsg<Empty>;
pub type SubMsg = cosmwasm_std::SubMsg<Empty>;
