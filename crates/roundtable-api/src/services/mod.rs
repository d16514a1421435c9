// Business logic services

mod chat;
mod model;

pub use chat::ChatService;
pub use model::ModelService;
