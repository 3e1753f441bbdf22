//! Application constants
//!
//! User-facing messages are kept in Portuguese to match the server's own
//! `detail` texts, so prompts never mix languages.

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Prompt text after a forced sign-out
pub const SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";
/// 401 without a usable body
pub const UNAUTHORIZED_FALLBACK: &str = "Não autorizado";
/// Non-2xx without a body or a known status phrase
pub const UNEXPECTED_ERROR: &str = "Erro inesperado";
/// Shown when the dashboard cannot be loaded at startup
pub const CONNECTION_FAILED: &str =
    "Erro ao conectar na API. Verifique se o servidor está rodando.";
/// Command issued without an authenticated session
pub const LOGIN_REQUIRED: &str = "Faça login para continuar.";
/// Sign-in reply that arrived after the session was reset
pub const LOGIN_INTERRUPTED: &str = "O login foi interrompido. Tente novamente.";

pub const MISSING_CREDENTIALS: &str = "Informe usuário e senha.";
pub const INVALID_BALANCE: &str = "Informe um valor válido.";
pub const INVALID_CARD_VALUE: &str = "Informe um valor maior que zero.";
pub const INVALID_URGENCY: &str = "Informe uma urgência válida (1 ou mais).";
pub const INVALID_DUE_DATE: &str = "Informe uma data válida (AAAA-MM-DD).";
pub const INVALID_EXPENSE_TYPE: &str = "Informe um tipo de despesa válido.";
pub const INVALID_STATUS: &str = "Informe um status válido (pendente ou pago).";
