/// User primary keys are UUIDs, stored as hyphenated lowercase TEXT.
pub type UserId = uuid::Uuid;
