#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No user id set. Log in, then pass --user-id or set FORUMHUB_USER_ID")]
    MissingSession,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Topic {0} is locked and does not accept replies")]
    TopicLocked(u64),
}
