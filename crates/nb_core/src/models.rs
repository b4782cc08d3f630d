use async_trait::async_trait;
use std::fmt;

use crate::Result;

#[async_trait]
pub trait GenerativeModel: Send + Sync + fmt::Debug {
    /// Short human readable name, used in logs.
    fn name(&self) -> &str;

    /// Send one prompt to the model and return its raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
