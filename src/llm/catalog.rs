/// Static description of every backend the relay knows how to talk to.
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Credential env var slots, in rotation order. The first populated
    /// slot is the primary key.
    pub key_env_vars: &'static [&'static str],
    pub model_env_var: &'static str,
    pub base_url_env_var: &'static str,
    pub default_model: &'static str,
    pub default_base_url: &'static str,
    pub supports_vision: bool,
}

pub static PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "gemini",
        name: "Google Gemini",
        key_env_vars: &["GEMINI_API_KEY", "GEMINI_API_KEY_2"],
        model_env_var: "GEMINI_MODEL",
        base_url_env_var: "GEMINI_BASE_URL",
        default_model: "gemini-2.5-flash",
        default_base_url: "https://generativelanguage.googleapis.com",
        supports_vision: true,
    },
    ProviderInfo {
        id: "sambanova",
        name: "SambaNova",
        key_env_vars: &["SAMBANOVA_API_KEY"],
        model_env_var: "SAMBANOVA_MODEL",
        base_url_env_var: "SAMBANOVA_BASE_URL",
        default_model: "Meta-Llama-3.3-70B-Instruct",
        default_base_url: "https://api.sambanova.ai/v1",
        supports_vision: false,
    },
    ProviderInfo {
        id: "openrouter",
        name: "OpenRouter",
        key_env_vars: &["OPENROUTER_API_KEY"],
        model_env_var: "OPENROUTER_MODEL",
        base_url_env_var: "OPENROUTER_BASE_URL",
        default_model: "meta-llama/llama-3.3-70b-instruct:free",
        default_base_url: "https://openrouter.ai/api/v1",
        supports_vision: false,
    },
];

pub const DEFAULT_ORDER: &str = "gemini,sambanova,openrouter";

pub fn get_provider(id: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_provider() {
        let info = get_provider("gemini").unwrap();
        assert!(info.supports_vision);
        assert_eq!(info.key_env_vars.len(), 2);
    }

    #[test]
    fn test_lookup_unknown_provider() {
        assert!(get_provider("pollinations").is_none());
    }

    #[test]
    fn test_only_gemini_has_vision() {
        let vision: Vec<_> = PROVIDERS.iter().filter(|p| p.supports_vision).collect();
        assert_eq!(vision.len(), 1);
        assert_eq!(vision[0].id, "gemini");
    }
}
