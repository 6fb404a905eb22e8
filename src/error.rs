pub type RippleResult<T> = Result<T, RippleError>;

#[derive(thiserror::Error, Debug)]
pub enum RippleError {
    #[error("config error: {0}")]
    Config(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("load error: {0}")]
    Load(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RippleError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }
}
