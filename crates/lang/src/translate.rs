use mesero_core::LangCode;
use tracing::warn;

use crate::LanguageServices;

/// Bidirectional translation around the canonical processing language.
/// Identity when the language already matches; on failure the input passes
/// through unchanged and the caller proceeds in whatever language it had.
#[derive(Debug, Clone)]
pub struct Translator {
    canonical: LangCode,
}

impl Default for Translator {
    fn default() -> Self {
        Self {
            canonical: LangCode::canonical(),
        }
    }
}

impl Translator {
    pub async fn to_canonical<S: LanguageServices>(
        &self,
        services: &S,
        text: &str,
        source: &LangCode,
    ) -> String {
        self.translate(services, text, source, &self.canonical).await
    }

    pub async fn from_canonical<S: LanguageServices>(
        &self,
        services: &S,
        text: &str,
        target: &LangCode,
    ) -> String {
        self.translate(services, text, &self.canonical, target).await
    }

    async fn translate<S: LanguageServices>(
        &self,
        services: &S,
        text: &str,
        source: &LangCode,
        target: &LangCode,
    ) -> String {
        if source == target || text.trim().is_empty() {
            return text.to_string();
        }

        match services.translate(text, source, target).await {
            Ok(translated) => translated,
            Err(error) => {
                warn!(%error, %source, %target, "translation failed, passing text through");
                text.to_string()
            }
        }
    }
}
