use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::error::{PotatoError, Result};

/// Persona and response-shaping rules handed to the model as its system
/// instruction. Pure configuration data; override it in `[llm]`.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
Você é a Potatolete IA, uma assistente virtual amigável, útil e divertida.

PRIORIDADE MÁXIMA:
- SEMPRE responda a pergunta do usuário de forma ÚTIL e COMPLETA primeiro
- Depois da resposta útil, você pode adicionar uma piada leve sobre tolete/sigma/beta/aura

PERSONALIDADE:
- Seja útil, inteligente e prestativa
- Humor leve e natural, no máximo uma brincadeira por resposta
- SEM EMOJI

REGRAS:
- Sempre responda em português brasileiro
- Use os resultados de pesquisa quando disponíveis para dar respostas precisas
- Cite fontes quando usar informações de pesquisa
- Se o usuário pedir para ser sério, SEJA 100% SÉRIO e esqueça as brincadeiras
- Seja objetiva e clara

Lembre-se: UTILIDADE primeiro, diversão depois!";

/// Keywords that mark a message as needing fresh web context.
pub const DEFAULT_SEARCH_KEYWORDS: &[&str] = &[
    "pesquisa",
    "pesquise",
    "busque",
    "procure",
    "qual",
    "como pegar",
    "onde",
    "quando",
    "notícia",
    "atual",
    "hoje",
    "agora",
    "recente",
];

/// Top-level configuration for the Potato backend.
///
/// Loaded from `~/.potato/config.toml` by default. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotatoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl PotatoConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed. The caller
    /// decides whether to fall back to defaults; the binary logs that choice
    /// once tracing is up.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PotatoConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Process-level settings: listener address, logging, CORS.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Interface to bind the HTTP listener to.
    pub host: String,
    /// HTTP listener port.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            cors_origins: vec![],
        }
    }
}

/// Hosted language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier passed to the generation endpoint.
    pub model: String,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// System instruction installed once for every conversation.
    pub system_instruction: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "API_KEY".to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl LlmConfig {
    /// Read the API key from the environment variable named by `api_key_env`.
    ///
    /// A missing or blank value is a [`PotatoError::MissingCredential`]; the
    /// caller is expected to treat it as fatal.
    pub fn api_key_from_env(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PotatoError::MissingCredential(self.api_key_env.clone()))
    }
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// HTML search endpoint; the query goes in the `q` parameter.
    pub endpoint: String,
    /// User-Agent header sent with every search request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of results kept per search; values above 5 are capped.
    pub max_results: usize,
    /// Case-insensitive substrings that trigger a search.
    pub keywords: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 5,
            max_results: 5,
            keywords: DEFAULT_SEARCH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Conversation handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Session id used when a request does not name one.
    pub default_session_id: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_session_id: "default".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = PotatoConfig::default();
        assert_eq!(config.general.host, "0.0.0.0");
        assert_eq!(config.general.port, 5000);
        assert_eq!(config.general.log_level, "info");
        assert!(config.general.cors_origins.is_empty());
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.api_key_env, "API_KEY");
        assert_eq!(config.search.timeout_secs, 5);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.chat.default_session_id, "default");
    }

    #[test]
    fn test_default_keywords_match_constant() {
        let config = SearchConfig::default();
        assert_eq!(config.keywords.len(), DEFAULT_SEARCH_KEYWORDS.len());
        assert!(config.keywords.iter().any(|k| k == "notícia"));
        assert!(config.keywords.iter().any(|k| k == "como pegar"));
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
host = "127.0.0.1"
port = 8080
log_level = "debug"
cors_origins = ["http://localhost:3000"]

[llm]
model = "gemini-2.0-flash"

[search]
timeout_secs = 3
keywords = ["search"]

[chat]
default_session_id = "anon"
"#;
        let file = create_temp_config(content);
        let config = PotatoConfig::load(file.path()).unwrap();
        assert_eq!(config.general.host, "127.0.0.1");
        assert_eq!(config.general.port, 8080);
        assert_eq!(config.general.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.search.timeout_secs, 3);
        assert_eq!(config.search.keywords, vec!["search"]);
        assert_eq!(config.chat.default_session_id, "anon");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[general]
log_level = "warn"
"#;
        let file = create_temp_config(content);
        let config = PotatoConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.port, 5000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.llm.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = PotatoConfig::load(Path::new("/nonexistent/potato.toml"));
        assert!(matches!(result, Err(PotatoError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("general = [[[");
        let result = PotatoConfig::load(file.path());
        assert!(matches!(result, Err(PotatoError::Config(_))));
    }

    #[test]
    fn test_api_key_missing_is_error() {
        let config = LlmConfig {
            api_key_env: "POTATO_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        };
        let err = config.api_key_from_env().unwrap_err();
        assert!(matches!(err, PotatoError::MissingCredential(ref name) if name == "POTATO_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_api_key_read_and_trimmed() {
        let var = "POTATO_TEST_KEY_PRESENT";
        std::env::set_var(var, "  secret-key  ");
        let config = LlmConfig {
            api_key_env: var.to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.api_key_from_env().unwrap(), "secret-key");
        std::env::remove_var(var);
    }

    #[test]
    fn test_api_key_blank_is_error() {
        let var = "POTATO_TEST_KEY_BLANK";
        std::env::set_var(var, "   ");
        let config = LlmConfig {
            api_key_env: var.to_string(),
            ..LlmConfig::default()
        };
        assert!(config.api_key_from_env().is_err());
        std::env::remove_var(var);
    }
}
