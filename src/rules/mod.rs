//! Stateless rule engines behind the planning tools: bid suggestions,
//! audience sizing, budget ranges and the advice attached to campaigns and
//! creatives.

pub mod audience;
pub mod bidding;
pub mod budget;
pub mod endpoints;
pub mod insights;
pub mod recommendations;
