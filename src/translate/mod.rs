//! Remote translation.
//!
//! - `Translator`: the black-box remote call (text in, text or nothing out)
//! - `GoogleTranslator`: Cloud Translation v3 over REST
//! - `PlaceholderTranslator`: wraps any translator with a timeout and
//!   placeholder reconciliation

mod google;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::placeholder::{Reconciled, reconcile};

pub use google::{DEFAULT_ENDPOINT, DEFAULT_LOCATION, GoogleTranslator};

/// A remote text translation service.
///
/// `Ok(None)` means the service answered without a translation.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_one(&self, text: &str, source: &str, target: &str)
    -> Result<Option<String>>;
}

/// Result of translating a single string.
#[derive(Debug)]
pub enum Translation {
    Done(Reconciled),
    /// The service returned nothing, or an empty string.
    Empty,
    Failed(anyhow::Error),
}

/// Translator that protects `{placeholders}` and `@:references`.
pub struct PlaceholderTranslator<T> {
    inner: T,
    timeout: Duration,
}

impl<T: Translator> PlaceholderTranslator<T> {
    pub fn new(inner: T, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub async fn translate(&self, text: &str, source: &str, target: &str) -> Translation {
        let call = self.inner.translate_one(text, source, target);
        let raw = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(Some(raw))) if !raw.is_empty() => raw,
            Ok(Ok(_)) => return Translation::Empty,
            Ok(Err(err)) => return Translation::Failed(err),
            Err(_) => {
                return Translation::Failed(anyhow::anyhow!(
                    "timed out after {}s",
                    self.timeout.as_secs_f32()
                ));
            }
        };
        Translation::Done(reconcile(text, raw))
    }
}
