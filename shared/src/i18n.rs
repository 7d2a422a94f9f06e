//! Localization lookup
//!
//! Pure key→phrase mapping with a process-wide current-language selector.
//! The language set is closed (Portuguese and English); unknown keys fall
//! back to the key itself so a missing entry never breaks the UI.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }

    /// Parse a persisted language value, falling back to the default
    /// for anything outside the closed set.
    pub fn from_persisted(value: &str) -> Self {
        match value {
            "pt" => Language::Pt,
            "en" => Language::En,
            _ => Language::default(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static CURRENT: AtomicU8 = AtomicU8::new(0);

/// Set the process-wide UI language
pub fn set_language(lang: Language) {
    CURRENT.store(lang as u8, Ordering::Relaxed);
}

/// Get the process-wide UI language
pub fn current_language() -> Language {
    match CURRENT.load(Ordering::Relaxed) {
        1 => Language::En,
        _ => Language::Pt,
    }
}

/// Translate a key using the current language
///
/// Unknown keys are returned verbatim.
pub fn tr(key: &str) -> &str {
    phrase(current_language(), key).unwrap_or(key)
}

/// Translate a key in an explicit language
pub fn phrase(lang: Language, key: &str) -> Option<&'static str> {
    let (pt, en) = match key {
        "catalog_load_failed" => ("Não foi possível carregar os anúncios", "Could not load listings"),
        "access_restricted" => ("Inicie sessão para ver o catálogo", "Sign in to view the catalog"),
        "account_pending" => ("A sua conta aguarda aprovação", "Your account is pending approval"),
        "purchase_success" => ("Compra registada com sucesso", "Purchase completed successfully"),
        "purchase_failed" => ("Não foi possível concluir a compra", "Could not complete the purchase"),
        "product_saved" => ("Anúncio guardado", "Listing saved"),
        "product_unsaved" => ("Anúncio removido dos guardados", "Listing removed from saved"),
        "save_failed" => ("Não foi possível atualizar os guardados", "Could not update saved listings"),
        "listing_not_found" => ("Anúncio não encontrado", "Listing not found"),
        "listing_created" => ("Anúncio criado e enviado para aprovação", "Listing created and sent for approval"),
        "listing_updated" => ("Anúncio atualizado", "Listing updated"),
        "image_upload_failed" => ("Falha ao carregar a imagem", "Image upload failed"),
        "approval_applied" => ("Decisão registada", "Decision recorded"),
        "approval_failed" => ("Não foi possível registar a decisão", "Could not record the decision"),
        "profile_updated" => ("Perfil atualizado", "Profile updated"),
        "generic_error" => ("Ocorreu um erro, tente novamente", "Something went wrong, please retry"),
        _ => return None,
    };
    Some(match lang {
        Language::Pt => pt,
        Language::En => en,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip() {
        assert_eq!(Language::from_persisted("en"), Language::En);
        assert_eq!(Language::from_persisted("pt"), Language::Pt);
    }

    #[test]
    fn test_unrecognized_value_falls_back() {
        assert_eq!(Language::from_persisted("fr"), Language::Pt);
        assert_eq!(Language::from_persisted(""), Language::Pt);
    }

    #[test]
    fn test_phrase_lookup() {
        assert_eq!(
            phrase(Language::En, "purchase_success"),
            Some("Purchase completed successfully")
        );
        assert!(phrase(Language::Pt, "purchase_success").is_some());
    }

    #[test]
    fn test_unknown_key_returns_key() {
        set_language(Language::En);
        assert_eq!(tr("no_such_key"), "no_such_key");
    }
}
