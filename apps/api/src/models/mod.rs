pub mod assessment;
pub mod company;
pub mod conversation;
pub mod prompt;
