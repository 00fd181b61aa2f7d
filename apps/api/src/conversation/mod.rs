// Conversation threads: the follow-up discussion attached to each generated
// assessment. Continuation goes through assessment::service so history
// replay and write ordering stay in one place.

pub mod handlers;
